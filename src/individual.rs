//! # Candidate Trait
//!
//! The `Candidate` trait defines what selection reads from, and writes to,
//! an individual of the population: a stable identity, a per-case
//! performance vector, named objective values, and the `selected` marker.
//!
//! `Individual` is a ready-made implementation carrying the two objectives
//! of age-fitness Pareto search.
//!
//! ## Example
//!
//! ```rust
//! use genselect::individual::{Candidate, Individual};
//!
//! let ind = Individual::new(4, 0.75, 2).with_performance(vec![0.1, 0.9]);
//!
//! assert_eq!(ind.objective("fitness"), Some(0.75));
//! assert_eq!(ind.objective("age"), Some(2.0));
//! assert_eq!(ind.objective("speed"), None);
//! assert_eq!(ind.performance(), &[0.1, 0.9]);
//! ```

use std::fmt::Debug;

/// Objective name under which `Individual` exposes its fitness.
pub const FITNESS: &str = "fitness";
/// Objective name under which `Individual` exposes its age.
pub const AGE: &str = "age";

/// Trait for types that can take part in a selection call.
///
/// Types implementing this trait must also implement `Clone`, `Debug`, `Send`, and `Sync`
/// so selection results can be materialized and dominance computed in parallel.
pub trait Candidate: Clone + Debug + Send + Sync {
    /// Identity of the individual. Higher ids are newer individuals.
    fn id(&self) -> u64;

    /// Per-case performance values. Higher is better.
    fn performance(&self) -> &[f64];

    /// Value of the named objective, or `None` if the individual has no such objective.
    fn objective(&self, name: &str) -> Option<f64>;

    /// Records whether the last selection call kept this individual.
    ///
    /// The default implementation discards the marker.
    fn set_selected(&mut self, _selected: bool) {}
}

/// An individual scored on fitness and age, with an optional performance vector.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    pub id: u64,
    pub performance: Vec<f64>,
    pub fitness: f64,
    pub age: u64,
    pub selected: bool,
}

impl Individual {
    pub fn new(id: u64, fitness: f64, age: u64) -> Self {
        Self {
            id,
            performance: Vec::new(),
            fitness,
            age,
            selected: false,
        }
    }

    pub fn with_performance(mut self, performance: Vec<f64>) -> Self {
        self.performance = performance;
        self
    }
}

impl Candidate for Individual {
    fn id(&self) -> u64 {
        self.id
    }

    fn performance(&self) -> &[f64] {
        &self.performance
    }

    fn objective(&self, name: &str) -> Option<f64> {
        match name {
            FITNESS => Some(self.fitness),
            AGE => Some(self.age as f64),
            _ => None,
        }
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}
