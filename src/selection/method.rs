use crate::error::Result;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::selection::{
    EpsilonLexicaseSelection, ParetoLevelSelection, ParetoTournamentReduction, Selection,
    SelectionStrategy,
};

/// One of the available selection strategies, chosen at runtime.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionMethod {
    EpsilonLexicase(EpsilonLexicaseSelection),
    ParetoLevel(ParetoLevelSelection),
    ParetoTournament(ParetoTournamentReduction),
}

impl Default for SelectionMethod {
    fn default() -> Self {
        SelectionMethod::ParetoLevel(ParetoLevelSelection::new())
    }
}

impl<P> SelectionStrategy<P> for SelectionMethod
where
    P: Population,
{
    fn select(&self, population: &P, rng: &mut RandomNumberGenerator) -> Result<Selection> {
        match self {
            SelectionMethod::EpsilonLexicase(strategy) => strategy.select(population, rng),
            SelectionMethod::ParetoLevel(strategy) => strategy.select(population, rng),
            SelectionMethod::ParetoTournament(strategy) => strategy.select(population, rng),
        }
    }
}

impl From<EpsilonLexicaseSelection> for SelectionMethod {
    fn from(strategy: EpsilonLexicaseSelection) -> Self {
        SelectionMethod::EpsilonLexicase(strategy)
    }
}

impl From<ParetoLevelSelection> for SelectionMethod {
    fn from(strategy: ParetoLevelSelection) -> Self {
        SelectionMethod::ParetoLevel(strategy)
    }
}

impl From<ParetoTournamentReduction> for SelectionMethod {
    fn from(strategy: ParetoTournamentReduction) -> Self {
        SelectionMethod::ParetoTournament(strategy)
    }
}
