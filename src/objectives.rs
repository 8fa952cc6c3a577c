//! # Objectives and Pareto Dominance
//!
//! An `ObjectiveSet` names the objectives that dominance is judged on, most
//! important first, each with its own direction. Evaluating it against a
//! population reads every objective value exactly once into an
//! `ObjectiveMatrix`, which then answers dominance and ordering queries as
//! pure functions of individual positions.
//!
//! ## Example
//!
//! ```rust
//! use genselect::individual::Individual;
//! use genselect::objectives::{Dominance, ObjectiveSet};
//!
//! let population = vec![
//!     Individual::new(0, 10.0, 1), // best fitness, youngest
//!     Individual::new(1, 5.0, 3),
//! ];
//!
//! let matrix = ObjectiveSet::fitness_and_age().evaluate(&population)?;
//! assert!(matrix.dominates(0, 1));
//! assert!(!matrix.dominates(1, 0));
//! assert_eq!(matrix.dominance_counts(), vec![0, 1]);
//! # Ok::<(), genselect::error::SelectionError>(())
//! ```

use std::cmp::Ordering;
use std::collections::HashSet;

use rayon::prelude::*;

use crate::error::{Result, SelectionError};
use crate::individual::{Candidate, AGE, FITNESS};

/// Default minimum population size before dominance counting runs in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// Direction in which an objective improves.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    Maximize,
    Minimize,
}

impl Goal {
    /// Orders two objective values best-first: `Less` means `a` is better than `b`.
    pub fn best_first(self, a: f64, b: f64) -> Ordering {
        let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        match self {
            Goal::Maximize => ord.reverse(),
            Goal::Minimize => ord,
        }
    }
}

/// A named objective with its direction.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Objective {
    pub name: String,
    pub goal: Goal,
}

impl Objective {
    pub fn maximize(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            goal: Goal::Maximize,
        }
    }

    pub fn minimize(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            goal: Goal::Minimize,
        }
    }
}

/// Ordered objectives used for dominance, most important first.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveSet {
    objectives: Vec<Objective>,
    prefer_newer_on_tie: bool,
}

impl ObjectiveSet {
    /// Creates a new objective set.
    ///
    /// # Errors
    ///
    /// Returns a `SelectionError::Configuration` error if `objectives` is empty
    /// or contains the same name twice.
    pub fn new(objectives: Vec<Objective>) -> Result<Self> {
        if objectives.is_empty() {
            return Err(SelectionError::Configuration(
                "At least one objective is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for objective in &objectives {
            if !seen.insert(objective.name.as_str()) {
                return Err(SelectionError::Configuration(format!(
                    "Objective '{}' is defined more than once",
                    objective.name
                )));
            }
        }

        Ok(Self {
            objectives,
            prefer_newer_on_tie: false,
        })
    }

    /// Age-fitness Pareto objectives: maximize fitness, then minimize age.
    pub fn fitness_and_age() -> Self {
        Self {
            objectives: vec![Objective::maximize(FITNESS), Objective::minimize(AGE)],
            prefer_newer_on_tie: false,
        }
    }

    /// When two individuals tie on every objective, let the newer one (higher id)
    /// dominate the older one.
    pub fn with_newer_preferred_on_tie(mut self) -> Self {
        self.prefer_newer_on_tie = true;
        self
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn prefers_newer_on_tie(&self) -> bool {
        self.prefer_newer_on_tie
    }

    /// Reads every objective of every individual into an `ObjectiveMatrix`.
    ///
    /// # Errors
    ///
    /// - `SelectionError::UnknownObjective` if an individual does not expose one of the objectives.
    /// - `SelectionError::InvalidNumericValue` if an objective value is NaN or infinite.
    pub fn evaluate<C: Candidate>(&self, individuals: &[C]) -> Result<ObjectiveMatrix> {
        let width = self.objectives.len();
        let mut values = Vec::with_capacity(individuals.len() * width);
        let mut ids = Vec::with_capacity(individuals.len());

        for (index, individual) in individuals.iter().enumerate() {
            for objective in &self.objectives {
                let value = individual.objective(&objective.name).ok_or_else(|| {
                    SelectionError::UnknownObjective {
                        index,
                        name: objective.name.clone(),
                    }
                })?;
                if !value.is_finite() {
                    return Err(SelectionError::InvalidNumericValue(format!(
                        "Objective '{}' of individual {} is {}",
                        objective.name, index, value
                    )));
                }
                values.push(value);
            }
            ids.push(individual.id());
        }

        Ok(ObjectiveMatrix {
            values,
            ids,
            goals: self.objectives.iter().map(|o| o.goal).collect(),
            prefer_newer_on_tie: self.prefer_newer_on_tie,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        })
    }
}

impl Default for ObjectiveSet {
    fn default() -> Self {
        Self::fitness_and_age()
    }
}

/// Pairwise dominance and ordering over the individuals of one selection call.
///
/// Individuals are addressed by their position in the population.
pub trait Dominance: Sync {
    /// Number of individuals covered.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `a` dominates `b`. False when neither dominates the other.
    fn dominates(&self, a: usize, b: usize) -> bool;

    /// Deterministic multi-key order: `Less` means `a` sorts before `b`.
    fn compare_by_objectives(&self, a: usize, b: usize) -> Ordering;

    /// For each individual, the number of others that dominate it.
    fn dominance_counts(&self) -> Vec<usize> {
        let n = self.len();
        (0..n)
            .map(|i| (0..n).filter(|&j| j != i && self.dominates(j, i)).count())
            .collect()
    }
}

/// Objective values of one population, row per individual.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveMatrix {
    values: Vec<f64>,
    ids: Vec<u64>,
    goals: Vec<Goal>,
    prefer_newer_on_tie: bool,
    parallel_threshold: usize,
}

impl ObjectiveMatrix {
    /// Sets the population size from which dominance counting runs on rayon.
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    fn row(&self, index: usize) -> &[f64] {
        let width = self.goals.len();
        &self.values[index * width..(index + 1) * width]
    }

    fn count_dominators(&self, index: usize) -> usize {
        (0..self.ids.len())
            .filter(|&other| other != index && self.dominates(other, index))
            .count()
    }
}

impl Dominance for ObjectiveMatrix {
    fn len(&self) -> usize {
        self.ids.len()
    }

    fn dominates(&self, a: usize, b: usize) -> bool {
        let mut strictly_better = false;
        for ((&va, &vb), goal) in self.row(a).iter().zip(self.row(b)).zip(&self.goals) {
            match goal.best_first(va, vb) {
                Ordering::Less => strictly_better = true,
                Ordering::Greater => return false,
                Ordering::Equal => {}
            }
        }
        strictly_better || (self.prefer_newer_on_tie && self.ids[a] > self.ids[b])
    }

    fn compare_by_objectives(&self, a: usize, b: usize) -> Ordering {
        self.row(a)
            .iter()
            .zip(self.row(b))
            .zip(&self.goals)
            .map(|((&va, &vb), goal)| goal.best_first(va, vb))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or_else(|| self.ids[a].cmp(&self.ids[b]))
    }

    fn dominance_counts(&self) -> Vec<usize> {
        let n = self.len();
        if n >= self.parallel_threshold {
            (0..n)
                .into_par_iter()
                .map(|i| self.count_dominators(i))
                .collect()
        } else {
            (0..n).map(|i| self.count_dominators(i)).collect()
        }
    }
}

/// Size of the non-dominated front given dominance counts.
pub fn non_dominated_size(counts: &[usize]) -> usize {
    counts.iter().filter(|&&count| count == 0).count()
}

/// Sorts positions by dominance count, then by the objective order.
///
/// The sort is stable, so positions that compare equal keep their relative order.
pub fn sort_by_objectives<D>(dominance: &D, counts: &[usize], indices: &mut [usize])
where
    D: Dominance + ?Sized,
{
    indices.sort_by(|&a, &b| {
        counts[a]
            .cmp(&counts[b])
            .then_with(|| dominance.compare_by_objectives(a, b))
    });
}
