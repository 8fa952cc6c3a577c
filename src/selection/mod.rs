pub mod lexicase;
pub mod method;
pub mod outcome;
pub mod pareto_level;
pub mod pareto_tournament;
pub mod selection_strategy;

pub use lexicase::{Epsilon, EpsilonLexicaseSelection, LexicaseDraw};
pub use method::SelectionMethod;
pub use outcome::Selection;
pub use pareto_level::ParetoLevelSelection;
pub use pareto_tournament::ParetoTournamentReduction;
pub use selection_strategy::SelectionStrategy;
