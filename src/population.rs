//! # Population
//!
//! The `Population` trait is everything a selection strategy needs from the
//! generational loop: the individuals, the target size of the next
//! generation, and a dominance view over the individuals.
//!
//! `ObjectivePopulation` is the bundled implementation. It owns its
//! individuals, judges dominance with an `ObjectiveSet`, and applies
//! selection results back onto itself.
//!
//! ## Example
//!
//! ```rust
//! use genselect::individual::Individual;
//! use genselect::objectives::ObjectiveSet;
//! use genselect::population::{ObjectivePopulation, Population};
//!
//! let individuals = vec![
//!     Individual::new(0, 3.0, 1),
//!     Individual::new(1, 1.0, 4),
//! ];
//! let population = ObjectivePopulation::new(individuals, 1, ObjectiveSet::fitness_and_age());
//!
//! assert_eq!(population.target_size(), 1);
//! assert_eq!(population.individuals().len(), 2);
//! ```

use crate::error::Result;
use crate::individual::Candidate;
use crate::objectives::{Dominance, ObjectiveMatrix, ObjectiveSet, DEFAULT_PARALLEL_THRESHOLD};
use crate::selection::Selection;

/// Source of individuals and dominance information for one selection call.
pub trait Population {
    type Individual: Candidate;
    type Dominance: Dominance;

    /// Individuals in their current order.
    fn individuals(&self) -> &[Self::Individual];

    /// Number of individuals the selection should produce.
    fn target_size(&self) -> usize;

    /// Builds the dominance view over `individuals()`, positions aligned.
    fn dominance(&self) -> Result<Self::Dominance>;
}

/// A population judged on a set of named objectives.
#[derive(Debug, Clone)]
pub struct ObjectivePopulation<C: Candidate> {
    individuals: Vec<C>,
    target_size: usize,
    objectives: ObjectiveSet,
    parallel_threshold: usize,
}

impl<C: Candidate> ObjectivePopulation<C> {
    pub fn new(individuals: Vec<C>, target_size: usize, objectives: ObjectiveSet) -> Self {
        Self {
            individuals,
            target_size,
            objectives,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Sets the population size from which dominance counting runs in parallel.
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    pub fn set_target_size(&mut self, target_size: usize) {
        self.target_size = target_size;
    }

    pub fn objectives(&self) -> &ObjectiveSet {
        &self.objectives
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn into_individuals(self) -> Vec<C> {
        self.individuals
    }

    /// Writes the `selected` marker of every individual from `selection`.
    pub fn apply(&mut self, selection: &Selection) {
        selection.apply_marks(&mut self.individuals);
    }

    /// Replaces the live collection with the individuals `selection` chose,
    /// in the selection's order, each marked as selected.
    ///
    /// Meant for reductions, whose chosen positions are distinct.
    pub fn reduce(&mut self, selection: &Selection) {
        let mut survivors = selection.individuals(&self.individuals);
        for survivor in &mut survivors {
            survivor.set_selected(true);
        }
        self.individuals = survivors;
    }
}

impl<C: Candidate> Population for ObjectivePopulation<C> {
    type Individual = C;
    type Dominance = ObjectiveMatrix;

    fn individuals(&self) -> &[C] {
        &self.individuals
    }

    fn target_size(&self) -> usize {
        self.target_size
    }

    fn dominance(&self) -> Result<ObjectiveMatrix> {
        Ok(self
            .objectives
            .evaluate(&self.individuals)?
            .with_parallel_threshold(self.parallel_threshold))
    }
}
