//! # SelectionOptions
//!
//! The `SelectionOptions` struct holds the configuration for the selection
//! stage of a generational loop: which strategy runs, and the tuning knobs
//! the strategies expose. `strategy()` turns the options into a ready
//! `SelectionMethod`.
//!
//! ## Example
//!
//! ```rust
//! use genselect::options::{SelectionKind, SelectionOptions};
//! use genselect::selection::{Epsilon, SelectionMethod};
//!
//! let options = SelectionOptions::builder()
//!     .method(SelectionKind::EpsilonLexicase)
//!     .epsilon(Epsilon::Fixed(0.0))
//!     .parallel_threshold(500)
//!     .build();
//!
//! let strategy = options.strategy().unwrap();
//! assert!(matches!(strategy, SelectionMethod::EpsilonLexicase(_)));
//! ```
//!
//! ## Fields
//!
//! - `method`: which selection strategy runs, represented by the `SelectionKind` enum.
//! - `epsilon`: the lexicase tolerance policy.
//! - `parallel_threshold`: the minimum amount of work before rayon is used.
//! - `stall_limit`: the cap on consecutive non-removing tournament rounds.
//!   When unset, it is derived from the population size on every call.

use crate::error::Result;
use crate::objectives::DEFAULT_PARALLEL_THRESHOLD;
use crate::selection::{
    Epsilon, EpsilonLexicaseSelection, ParetoLevelSelection, ParetoTournamentReduction,
    SelectionMethod,
};

/// The selection strategies a caller can pick from.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionKind {
    EpsilonLexicase,
    #[default]
    ParetoLevel,
    ParetoTournament,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOptions {
    method: SelectionKind,
    epsilon: Epsilon,
    /// Minimum number of items to process in parallel
    parallel_threshold: usize,
    stall_limit: Option<usize>,
}

impl SelectionOptions {
    pub fn new(method: SelectionKind) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn get_method(&self) -> SelectionKind {
        self.method
    }

    pub fn get_epsilon(&self) -> Epsilon {
        self.epsilon
    }

    /// Returns the minimum number of items to process in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn get_stall_limit(&self) -> Option<usize> {
        self.stall_limit
    }

    /// Sets the selection method.
    pub fn set_method(&mut self, method: SelectionKind) {
        self.method = method;
    }

    /// Sets the lexicase tolerance policy.
    pub fn set_epsilon(&mut self, epsilon: Epsilon) {
        self.epsilon = epsilon;
    }

    /// Sets the parallel threshold.
    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    /// Sets the tournament stall limit.
    pub fn set_stall_limit(&mut self, stall_limit: Option<usize>) {
        self.stall_limit = stall_limit;
    }

    /// Builds the configured strategy.
    ///
    /// # Errors
    ///
    /// Returns a `SelectionError::Configuration` error if the epsilon or the
    /// stall limit is invalid for the chosen method.
    pub fn strategy(&self) -> Result<SelectionMethod> {
        let method: SelectionMethod = match self.method {
            SelectionKind::EpsilonLexicase => EpsilonLexicaseSelection::new()
                .with_epsilon(self.epsilon)?
                .with_parallel_threshold(self.parallel_threshold)
                .into(),
            SelectionKind::ParetoLevel => ParetoLevelSelection::new().into(),
            SelectionKind::ParetoTournament => match self.stall_limit {
                Some(limit) => ParetoTournamentReduction::new()
                    .with_stall_limit(limit)?
                    .into(),
                None => ParetoTournamentReduction::new().into(),
            },
        };
        Ok(method)
    }

    /// Returns a builder for creating a `SelectionOptions` instance.
    pub fn builder() -> SelectionOptionsBuilder {
        SelectionOptionsBuilder::default()
    }
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            method: SelectionKind::ParetoLevel,
            epsilon: Epsilon::MedianAbsoluteDeviation,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            stall_limit: None,
        }
    }
}

/// Builder for `SelectionOptions`.
///
/// Provides a fluent interface for constructing `SelectionOptions` instances.
#[derive(Debug, Clone, Default)]
pub struct SelectionOptionsBuilder {
    method: Option<SelectionKind>,
    epsilon: Option<Epsilon>,
    parallel_threshold: Option<usize>,
    stall_limit: Option<usize>,
}

impl SelectionOptionsBuilder {
    /// Sets the selection method.
    pub fn method(mut self, value: SelectionKind) -> Self {
        self.method = Some(value);
        self
    }

    /// Sets the lexicase tolerance policy.
    pub fn epsilon(mut self, value: Epsilon) -> Self {
        self.epsilon = Some(value);
        self
    }

    /// Sets the parallel threshold.
    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Sets the tournament stall limit.
    pub fn stall_limit(mut self, value: usize) -> Self {
        self.stall_limit = Some(value);
        self
    }

    /// Builds the `SelectionOptions` instance.
    pub fn build(self) -> SelectionOptions {
        SelectionOptions {
            method: self.method.unwrap_or_default(),
            epsilon: self.epsilon.unwrap_or_default(),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(DEFAULT_PARALLEL_THRESHOLD),
            stall_limit: self.stall_limit,
        }
    }
}
