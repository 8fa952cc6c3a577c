use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::error::{OptionExt, Result, SelectionError};
use crate::individual::Candidate;
use crate::objectives::DEFAULT_PARALLEL_THRESHOLD;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::{validate_population, SelectionStrategy};
use crate::selection::Selection;
use crate::stats::median_absolute_deviation;

/// Per-case tolerance used when filtering candidates.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Epsilon {
    /// Median absolute deviation of the case's values across the whole population.
    #[default]
    MedianAbsoluteDeviation,
    /// The same tolerance for every case. `Fixed(0.0)` is plain lexicase selection.
    Fixed(f64),
}

/// One lexicase draw: the winner and the cases consumed to find it, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicaseDraw {
    pub winner: usize,
    pub cases: Vec<usize>,
}

/// A selection strategy that filters candidates case by case.
///
/// Every output slot is filled by an independent draw. A draw starts with
/// the whole population and walks the cases in a fresh random order; on
/// each case it keeps only the candidates within epsilon of the best
/// remaining candidate. It stops when one candidate is left or the cases
/// run out, then picks uniformly among the survivors. Individuals may be
/// chosen more than once. Higher performance values are better.
///
/// # Examples
///
/// ```
/// use genselect::individual::Individual;
/// use genselect::objectives::ObjectiveSet;
/// use genselect::population::ObjectivePopulation;
/// use genselect::rng::RandomNumberGenerator;
/// use genselect::selection::{EpsilonLexicaseSelection, SelectionStrategy};
/// use genselect::error::Result;
///
/// fn main() -> Result<()> {
///     let individuals = vec![
///         Individual::new(0, 0.0, 0).with_performance(vec![1.0, 5.0]),
///         Individual::new(1, 0.0, 0).with_performance(vec![1.0, 1.0]),
///         Individual::new(2, 0.0, 0).with_performance(vec![5.0, 1.0]),
///     ];
///     let population = ObjectivePopulation::new(individuals, 4, ObjectiveSet::fitness_and_age());
///     let mut rng = RandomNumberGenerator::from_seed(3);
///
///     let selection = EpsilonLexicaseSelection::new().select(&population, &mut rng)?;
///
///     assert_eq!(selection.len(), 4);
///     assert!(!selection.is_selected(1));
///
///     Ok(())
/// }
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EpsilonLexicaseSelection {
    epsilon: Epsilon,
    /// Minimum `individuals * cases` before per-case epsilons are computed in parallel.
    parallel_threshold: usize,
}

impl EpsilonLexicaseSelection {
    /// Creates a new strategy with median-absolute-deviation tolerances.
    pub fn new() -> Self {
        Self {
            epsilon: Epsilon::MedianAbsoluteDeviation,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Sets the tolerance policy.
    ///
    /// # Errors
    ///
    /// Returns a `SelectionError::Configuration` error if a fixed epsilon is
    /// negative or not finite.
    pub fn with_epsilon(mut self, epsilon: Epsilon) -> Result<Self> {
        if let Epsilon::Fixed(value) = epsilon {
            if !value.is_finite() || value < 0.0 {
                return Err(SelectionError::Configuration(format!(
                    "Fixed epsilon must be a non-negative finite number, got {}",
                    value
                )));
            }
        }
        self.epsilon = epsilon;
        Ok(self)
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    pub fn epsilon(&self) -> Epsilon {
        self.epsilon
    }

    /// Computes the tolerance of every case over the whole population.
    ///
    /// # Errors
    ///
    /// Fails if performance vectors differ in length or hold non-finite values.
    pub fn epsilons<C: Candidate>(&self, individuals: &[C]) -> Result<Vec<f64>> {
        let matrix = PerformanceMatrix::from_individuals(individuals)?;
        Ok(self.case_epsilons(&matrix))
    }

    /// Like `select`, but also returns every draw's winner and consumed cases.
    pub fn select_traced<P: Population>(
        &self,
        population: &P,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Selection, Vec<LexicaseDraw>)> {
        validate_population(population)?;

        let individuals = population.individuals();
        let target_size = population.target_size();
        let matrix = PerformanceMatrix::from_individuals(individuals)?;

        if matrix.cases == 0 {
            warn!(
                individuals = matrix.rows,
                "No performance cases; lexicase selection degenerates to uniform choice"
            );
        }

        let epsilons = self.case_epsilons(&matrix);

        let mut draws = Vec::with_capacity(target_size);
        for slot in 0..target_size {
            let draw = Self::draw(&matrix, &epsilons, rng)?;
            trace!(
                slot,
                winner = draw.winner,
                cases_used = draw.cases.len(),
                "Lexicase draw"
            );
            draws.push(draw);
        }

        let chosen = draws.iter().map(|draw| draw.winner).collect();
        let selection = Selection::from_chosen(chosen, matrix.rows);

        debug!(
            individuals = matrix.rows,
            cases = matrix.cases,
            target_size,
            distinct = selection.distinct_count(),
            "Epsilon-lexicase selection complete"
        );

        Ok((selection, draws))
    }

    fn case_epsilons(&self, matrix: &PerformanceMatrix) -> Vec<f64> {
        match self.epsilon {
            Epsilon::Fixed(value) => vec![value; matrix.cases],
            Epsilon::MedianAbsoluteDeviation => {
                let mad = |case: usize| {
                    median_absolute_deviation(&matrix.column(case)).unwrap_or(0.0)
                };
                if matrix.rows * matrix.cases >= self.parallel_threshold {
                    (0..matrix.cases).into_par_iter().map(mad).collect()
                } else {
                    (0..matrix.cases).map(mad).collect()
                }
            }
        }
    }

    fn draw(
        matrix: &PerformanceMatrix,
        epsilons: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<LexicaseDraw> {
        let mut candidates: Vec<usize> = (0..matrix.rows).collect();
        let mut order: Vec<usize> = (0..matrix.cases).collect();
        rng.shuffle(&mut order);

        let mut consumed = Vec::new();
        for case in order {
            if candidates.len() <= 1 {
                break;
            }

            let best = candidates
                .iter()
                .map(|&i| matrix.value(i, case))
                .fold(f64::NEG_INFINITY, f64::max);
            let threshold = best - epsilons[case];
            candidates.retain(|&i| matrix.value(i, case) >= threshold);
            consumed.push(case);
        }

        let pick = rng.index(candidates.len())?;
        let winner = candidates.get(pick).copied().ok_or_else_selection(|| {
            SelectionError::Invariant("Lexicase filter left no candidates".to_string())
        })?;

        Ok(LexicaseDraw {
            winner,
            cases: consumed,
        })
    }
}

impl Default for EpsilonLexicaseSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> SelectionStrategy<P> for EpsilonLexicaseSelection
where
    P: Population,
{
    fn select(&self, population: &P, rng: &mut RandomNumberGenerator) -> Result<Selection> {
        self.select_traced(population, rng)
            .map(|(selection, _)| selection)
    }
}

/// Row-major performance values, one row per individual.
struct PerformanceMatrix {
    values: Vec<f64>,
    rows: usize,
    cases: usize,
}

impl PerformanceMatrix {
    fn from_individuals<C: Candidate>(individuals: &[C]) -> Result<Self> {
        let cases = individuals
            .first()
            .map(|first| first.performance().len())
            .unwrap_or(0);

        let mut values = Vec::with_capacity(individuals.len() * cases);
        for (index, individual) in individuals.iter().enumerate() {
            let performance = individual.performance();
            if performance.len() != cases {
                return Err(SelectionError::PerformanceLengthMismatch {
                    index,
                    expected: cases,
                    found: performance.len(),
                });
            }
            if let Some(case) = performance.iter().position(|v| !v.is_finite()) {
                return Err(SelectionError::InvalidNumericValue(format!(
                    "Performance of individual {} on case {} is {}",
                    index, case, performance[case]
                )));
            }
            values.extend_from_slice(performance);
        }

        Ok(Self {
            values,
            rows: individuals.len(),
            cases,
        })
    }

    fn value(&self, row: usize, case: usize) -> f64 {
        self.values[row * self.cases + case]
    }

    fn column(&self, case: usize) -> Vec<f64> {
        (0..self.rows).map(|row| self.value(row, case)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::individual::Individual;
    use crate::objectives::ObjectiveSet;
    use crate::population::ObjectivePopulation;

    fn population(rows: &[&[f64]], target_size: usize) -> ObjectivePopulation<Individual> {
        let individuals = rows
            .iter()
            .enumerate()
            .map(|(i, row)| Individual::new(i as u64, 0.0, 0).with_performance(row.to_vec()))
            .collect();
        ObjectivePopulation::new(individuals, target_size, ObjectiveSet::fitness_and_age())
    }

    #[test]
    fn test_epsilons_use_whole_population() {
        let pop = population(&[&[1.0, 5.0], &[1.0, 1.0], &[5.0, 1.0], &[3.0, 3.0]], 4);
        let eps = EpsilonLexicaseSelection::new()
            .epsilons(pop.individuals())
            .unwrap();
        assert_eq!(eps, vec![1.0, 1.0]);
    }

    #[test]
    fn test_parallel_epsilons_match_sequential() {
        let rows: Vec<Vec<f64>> = (0..40)
            .map(|i| (0..8).map(|c| ((i * 7 + c * 3) % 11) as f64).collect())
            .collect();
        let refs: Vec<&[f64]> = rows.iter().map(|r| r.as_slice()).collect();
        let pop = population(&refs, 10);

        let sequential = EpsilonLexicaseSelection::new()
            .with_parallel_threshold(usize::MAX)
            .epsilons(pop.individuals())
            .unwrap();
        let parallel = EpsilonLexicaseSelection::new()
            .with_parallel_threshold(1)
            .epsilons(pop.individuals())
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_fixed_epsilon() {
        let pop = population(&[&[1.0, 2.0], &[3.0, 4.0]], 1);
        let selection = EpsilonLexicaseSelection::new()
            .with_epsilon(Epsilon::Fixed(0.5))
            .unwrap();
        assert_eq!(selection.epsilons(pop.individuals()).unwrap(), vec![0.5, 0.5]);
    }

    #[test]
    fn test_invalid_fixed_epsilon() {
        assert!(EpsilonLexicaseSelection::new()
            .with_epsilon(Epsilon::Fixed(-1.0))
            .is_err());
        assert!(EpsilonLexicaseSelection::new()
            .with_epsilon(Epsilon::Fixed(f64::INFINITY))
            .is_err());
    }

    #[test]
    fn test_plain_lexicase_picks_elite() {
        // Individual 2 is strictly best on every case.
        let pop = population(&[&[1.0, 1.0], &[2.0, 2.0], &[3.0, 3.0]], 10);
        let strategy = EpsilonLexicaseSelection::new()
            .with_epsilon(Epsilon::Fixed(0.0))
            .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(11);
        let selection = strategy.select(&pop, &mut rng).unwrap();
        assert!(selection.chosen().iter().all(|&i| i == 2));
    }

    #[test]
    fn test_draw_stops_once_single_candidate_remains() {
        let pop = population(&[&[9.0, 0.0, 0.0], &[0.0, 0.0, 0.0]], 1);
        let strategy = EpsilonLexicaseSelection::new()
            .with_epsilon(Epsilon::Fixed(0.0))
            .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(2);
        let (_, draws) = strategy.select_traced(&pop, &mut rng).unwrap();
        // Case 0 separates the pair; no case is consumed after that.
        assert_eq!(draws[0].winner, 0);
        assert_eq!(draws[0].cases.last(), Some(&0));
    }

    #[test]
    fn test_length_mismatch() {
        let pop = population(&[&[1.0, 2.0], &[1.0]], 2);
        let mut rng = RandomNumberGenerator::from_seed(0);
        let result = EpsilonLexicaseSelection::new().select(&pop, &mut rng);
        assert_eq!(
            result,
            Err(SelectionError::PerformanceLengthMismatch {
                index: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_non_finite_performance() {
        let pop = population(&[&[1.0], &[f64::NAN]], 2);
        let mut rng = RandomNumberGenerator::from_seed(0);
        let result = EpsilonLexicaseSelection::new().select(&pop, &mut rng);
        assert!(matches!(result, Err(SelectionError::InvalidNumericValue(_))));
    }
}
