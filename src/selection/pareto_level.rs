use tracing::{debug, trace};

use crate::error::{Result, SelectionError};
use crate::objectives::{sort_by_objectives, Dominance};
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::{validate_population, SelectionStrategy};
use crate::selection::Selection;

/// A selection strategy that fills the next generation Pareto level by Pareto level.
///
/// Individuals are grouped by how many others dominate them. Levels are
/// admitted whole, best level first, while they fit. The level that does
/// not fit is sampled: its top-ranked individual always gets in, and the
/// remaining slots are drawn with a log-scaled bias toward the top of the
/// level. The result holds `target_size` distinct individuals.
///
/// # Examples
///
/// ```
/// use genselect::individual::Individual;
/// use genselect::objectives::ObjectiveSet;
/// use genselect::population::ObjectivePopulation;
/// use genselect::rng::RandomNumberGenerator;
/// use genselect::selection::{ParetoLevelSelection, SelectionStrategy};
/// use genselect::error::Result;
///
/// fn main() -> Result<()> {
///     let individuals = vec![
///         Individual::new(0, 10.0, 5),
///         Individual::new(1, 5.0, 1),
///         Individual::new(2, 9.0, 6),
///         Individual::new(3, 4.0, 2),
///     ];
///     let population = ObjectivePopulation::new(individuals, 3, ObjectiveSet::fitness_and_age());
///     let mut rng = RandomNumberGenerator::from_seed(8);
///
///     let selection = ParetoLevelSelection::new().select(&population, &mut rng)?;
///
///     assert_eq!(selection.chosen(), &[0, 1, 2]);
///
///     Ok(())
/// }
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParetoLevelSelection;

impl ParetoLevelSelection {
    pub fn new() -> Self {
        Self
    }

    /// Fills `slots` positions from a level larger than `slots`.
    ///
    /// Rank `i` of a level of length `L` carries probability mass
    /// `(ln(i + 1) - ln(i)) / ln(L)`. Each draw is taken from that
    /// distribution restricted to the ranks not yet admitted, so every draw
    /// admits a new individual.
    fn fill_boundary_level(
        level: &[usize],
        slots: usize,
        output: &mut Vec<usize>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()> {
        let top = level.first().copied().ok_or_else(|| {
            SelectionError::Invariant("Boundary level is empty".to_string())
        })?;
        output.push(top);

        let log_len = (level.len() as f64).ln();
        let weight = |rank: usize| ((rank + 1) as f64).ln() / log_len - (rank as f64).ln() / log_len;

        let mut open_ranks: Vec<usize> = (1..level.len()).collect();
        for _ in 1..slots {
            if open_ranks.is_empty() {
                return Err(SelectionError::Invariant(format!(
                    "Boundary level of {} ran out of ranks while filling {} slots",
                    level.len(),
                    slots
                )));
            }

            let total: f64 = open_ranks.iter().map(|&rank| weight(rank)).sum();
            let mut r = rng.uniform() * total;
            let mut pick = open_ranks.len() - 1;
            for (pos, &rank) in open_ranks.iter().enumerate() {
                let w = weight(rank);
                if r < w {
                    pick = pos;
                    break;
                }
                r -= w;
            }

            let rank = open_ranks.remove(pick);
            trace!(rank, level_size = level.len(), "Admitted from boundary level");
            output.push(level[rank]);
        }

        Ok(())
    }
}

impl<P> SelectionStrategy<P> for ParetoLevelSelection
where
    P: Population,
{
    fn select(&self, population: &P, rng: &mut RandomNumberGenerator) -> Result<Selection> {
        validate_population(population)?;

        let n = population.individuals().len();
        let target_size = population.target_size();
        if target_size > n {
            return Err(SelectionError::Configuration(format!(
                "Target size ({}) exceeds population size ({}); Pareto-level selection does not repeat individuals",
                target_size, n
            )));
        }

        let dominance = population.dominance()?;
        if dominance.len() != n {
            return Err(SelectionError::Invariant(format!(
                "Dominance covers {} individuals, population has {}",
                dominance.len(),
                n
            )));
        }

        let counts = dominance.dominance_counts();
        let mut order: Vec<usize> = (0..n).collect();
        sort_by_objectives(&dominance, &counts, &mut order);

        let deepest = counts.iter().copied().max().unwrap_or(0);
        let mut output = Vec::with_capacity(target_size);

        for level in 0..=deepest {
            let this_level: Vec<usize> = order
                .iter()
                .copied()
                .filter(|&i| counts[i] == level)
                .collect();
            if this_level.is_empty() {
                continue;
            }

            let remaining = target_size - output.len();
            if this_level.len() <= remaining {
                output.extend_from_slice(&this_level);
                trace!(level, admitted = this_level.len(), "Admitted whole level");
            } else {
                debug!(
                    level,
                    level_size = this_level.len(),
                    slots = remaining,
                    "Sampling boundary level"
                );
                Self::fill_boundary_level(&this_level, remaining, &mut output, rng)?;
            }

            if output.len() == target_size {
                break;
            }
        }

        if output.len() != target_size {
            return Err(SelectionError::Invariant(format!(
                "Pareto-level selection produced {} of {} individuals",
                output.len(),
                target_size
            )));
        }

        debug!(
            individuals = n,
            target_size,
            levels = deepest + 1,
            "Pareto-level selection complete"
        );

        Ok(Selection::from_chosen(output, n))
    }
}
