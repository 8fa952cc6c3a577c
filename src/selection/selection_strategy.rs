use std::fmt::Debug;

use crate::error::{Result, SelectionError};
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::selection::Selection;

/// Trait for selection strategies.
///
/// A selection strategy decides which individuals of a population survive
/// or reproduce into the next generation. It reads the population, draws
/// randomness only from `rng`, and returns an immutable `Selection`; the
/// caller decides whether to write the marks back or shrink its collection.
///
/// # Examples
///
/// ```
/// use genselect::individual::Individual;
/// use genselect::objectives::ObjectiveSet;
/// use genselect::population::{ObjectivePopulation, Population};
/// use genselect::rng::RandomNumberGenerator;
/// use genselect::selection::{ParetoLevelSelection, SelectionStrategy};
/// use genselect::error::Result;
///
/// fn main() -> Result<()> {
///     let individuals = vec![
///         Individual::new(0, 0.9, 1),
///         Individual::new(1, 0.4, 0),
///         Individual::new(2, 0.2, 3),
///     ];
///     let mut population =
///         ObjectivePopulation::new(individuals, 2, ObjectiveSet::fitness_and_age());
///     let mut rng = RandomNumberGenerator::from_seed(1);
///
///     let selection = ParetoLevelSelection::new().select(&population, &mut rng)?;
///     population.apply(&selection);
///
///     assert_eq!(selection.len(), 2);
///     assert!(!population.individuals()[2].selected);
///
///     Ok(())
/// }
/// ```
pub trait SelectionStrategy<P>: Debug + Send + Sync
where
    P: Population,
{
    /// Selects `population.target_size()` individuals.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The population is empty
    /// - The target size is zero
    /// - The individuals carry malformed fitness data
    /// - A bounded sampling loop runs out of attempts
    fn select(&self, population: &P, rng: &mut RandomNumberGenerator) -> Result<Selection>;
}

/// Checks the preconditions shared by every strategy.
pub(crate) fn validate_population<P: Population>(population: &P) -> Result<()> {
    if population.individuals().is_empty() {
        return Err(SelectionError::EmptyPopulation);
    }

    if population.target_size() == 0 {
        return Err(SelectionError::Configuration(
            "Target size must be at least 1".to_string(),
        ));
    }

    Ok(())
}
