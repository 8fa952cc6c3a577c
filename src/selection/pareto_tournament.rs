use tracing::debug;

use crate::error::{Result, SelectionError};
use crate::objectives::{non_dominated_size, sort_by_objectives, Dominance};
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::{validate_population, SelectionStrategy};
use crate::selection::Selection;

/// Consecutive non-removing rounds allowed per squared live size.
const STALL_FACTOR: usize = 50;
/// Lower bound on the derived stall limit.
const MIN_STALL_LIMIT: usize = 1000;

/// A reduction that culls the population through pairwise dominance tournaments.
///
/// Two distinct individuals are sampled at random; if one dominates the
/// other, the dominated one is removed. This repeats until the population
/// is down to `target_size` or to the size of the non-dominated front,
/// whichever comes first. Front members are never removed. Survivors are
/// returned in objective order.
///
/// Rounds where neither individual dominates the other remove nothing.
/// Consecutive rounds of that kind are capped by the stall limit; exceeding
/// it is an error.
///
/// # Examples
///
/// ```
/// use genselect::individual::Individual;
/// use genselect::objectives::ObjectiveSet;
/// use genselect::population::{ObjectivePopulation, Population};
/// use genselect::rng::RandomNumberGenerator;
/// use genselect::selection::{ParetoTournamentReduction, SelectionStrategy};
/// use genselect::error::Result;
///
/// fn main() -> Result<()> {
///     let individuals = vec![
///         Individual::new(0, 1.0, 4),
///         Individual::new(1, 8.0, 1),
///         Individual::new(2, 3.0, 3),
///     ];
///     let mut population =
///         ObjectivePopulation::new(individuals, 1, ObjectiveSet::fitness_and_age());
///     let mut rng = RandomNumberGenerator::from_seed(5);
///
///     let survivors = ParetoTournamentReduction::new().select(&population, &mut rng)?;
///     population.reduce(&survivors);
///
///     assert_eq!(population.len(), 1);
///     assert_eq!(population.individuals()[0].id, 1);
///
///     Ok(())
/// }
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParetoTournamentReduction {
    stall_limit: Option<usize>,
}

impl ParetoTournamentReduction {
    /// Creates a reduction whose stall limit is derived from the population size.
    pub fn new() -> Self {
        Self { stall_limit: None }
    }

    /// Caps the number of consecutive rounds without a removal.
    ///
    /// # Errors
    ///
    /// Returns a `SelectionError::Configuration` error if `stall_limit` is 0.
    pub fn with_stall_limit(mut self, stall_limit: usize) -> Result<Self> {
        if stall_limit == 0 {
            return Err(SelectionError::Configuration(
                "Stall limit must be at least 1".to_string(),
            ));
        }
        self.stall_limit = Some(stall_limit);
        Ok(self)
    }

    /// Stall limit used for a population of `population_size` individuals.
    pub fn stall_limit_for(&self, population_size: usize) -> usize {
        self.stall_limit.unwrap_or_else(|| {
            population_size
                .saturating_mul(population_size)
                .saturating_mul(STALL_FACTOR)
                .max(MIN_STALL_LIMIT)
        })
    }
}

impl<P> SelectionStrategy<P> for ParetoTournamentReduction
where
    P: Population,
{
    fn select(&self, population: &P, rng: &mut RandomNumberGenerator) -> Result<Selection> {
        validate_population(population)?;

        let n = population.individuals().len();
        let target_size = population.target_size();

        let dominance = population.dominance()?;
        if dominance.len() != n {
            return Err(SelectionError::Invariant(format!(
                "Dominance covers {} individuals, population has {}",
                dominance.len(),
                n
            )));
        }

        let counts = dominance.dominance_counts();
        let front_size = non_dominated_size(&counts);
        let stall_limit = self.stall_limit_for(n);

        let mut live: Vec<usize> = (0..n).collect();
        rng.shuffle(&mut live);

        let mut rounds = 0usize;
        let mut stalls = 0usize;
        while live.len() > target_size && live.len() > front_size {
            rounds += 1;
            let (a, b) = rng.pick_two_distinct(live.len())?;

            if dominance.dominates(live[b], live[a]) {
                live.swap_remove(a);
                stalls = 0;
            } else if dominance.dominates(live[a], live[b]) {
                live.swap_remove(b);
                stalls = 0;
            } else {
                stalls += 1;
                if stalls >= stall_limit {
                    return Err(SelectionError::MaxAttemptsReached(format!(
                        "{} consecutive tournament rounds without a removal at live size {} (front size {})",
                        stalls,
                        live.len(),
                        front_size
                    )));
                }
            }
        }

        sort_by_objectives(&dominance, &counts, &mut live);

        debug!(
            individuals = n,
            target_size,
            front_size,
            survivors = live.len(),
            rounds,
            "Pareto-tournament reduction complete"
        );

        Ok(Selection::from_chosen(live, n))
    }
}
