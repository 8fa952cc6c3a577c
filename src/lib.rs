pub mod error;
pub mod individual;
pub mod objectives;
pub mod options;
pub mod population;
pub mod rng;
pub mod selection;
pub mod stats;

// Re-export commonly used types for convenience
pub use error::{OptionExt, Result, SelectionError};
pub use individual::{Candidate, Individual};
pub use objectives::{Dominance, Goal, Objective, ObjectiveMatrix, ObjectiveSet};
pub use options::{SelectionKind, SelectionOptions};
pub use population::{ObjectivePopulation, Population};
pub use rng::RandomNumberGenerator;
pub use selection::{
    Epsilon, EpsilonLexicaseSelection, ParetoLevelSelection, ParetoTournamentReduction, Selection,
    SelectionMethod, SelectionStrategy,
};
