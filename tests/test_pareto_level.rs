use std::collections::HashSet;

use genselect::{
    individual::Individual,
    objectives::{Dominance, Objective, ObjectiveSet},
    population::{ObjectivePopulation, Population},
    rng::RandomNumberGenerator,
    selection::{ParetoLevelSelection, SelectionStrategy},
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Dominance counts `[0, 0, 1, 1, 2]` under maximize fitness / minimize age.
fn ranked_five(target_size: usize) -> ObjectivePopulation<Individual> {
    ObjectivePopulation::new(
        vec![
            Individual::new(0, 10.0, 5),
            Individual::new(1, 5.0, 1),
            Individual::new(2, 9.0, 6),
            Individual::new(3, 4.0, 2),
            Individual::new(4, 8.0, 7),
        ],
        target_size,
        ObjectiveSet::fitness_and_age(),
    )
}

/// Fitness only; dominance counts `[0, 0, 2, 2, 2, 5]`.
fn sparse_levels(target_size: usize) -> ObjectivePopulation<Individual> {
    let objectives = ObjectiveSet::new(vec![Objective::maximize("fitness")]).unwrap();
    let individuals = [5.0, 5.0, 3.0, 3.0, 3.0, 1.0]
        .iter()
        .enumerate()
        .map(|(i, &fitness)| Individual::new(i as u64, fitness, 0))
        .collect();
    ObjectivePopulation::new(individuals, target_size, objectives)
}

#[test]
fn test_boundary_level_keeps_its_top_member() {
    init_tracing();
    let population = ranked_five(3);
    assert_eq!(
        population.dominance().unwrap().dominance_counts(),
        vec![0, 0, 1, 1, 2]
    );

    for seed in 0..200 {
        let mut rng = RandomNumberGenerator::from_seed(seed);
        let selection = ParetoLevelSelection::new()
            .select(&population, &mut rng)
            .unwrap();
        let chosen: HashSet<usize> = selection.chosen().iter().copied().collect();
        assert_eq!(chosen, HashSet::from([0, 1, 2]));
    }
}

#[test]
fn test_lower_ranks_favored_within_boundary_level() {
    // One front of ten; fitness rises with age so nobody dominates anybody.
    let individuals = (0..10).map(|i| Individual::new(i, i as f64, i)).collect();
    let population = ObjectivePopulation::new(individuals, 4, ObjectiveSet::fitness_and_age());

    let mut hits = [0usize; 10];
    for seed in 0..2000 {
        let mut rng = RandomNumberGenerator::from_seed(seed);
        let selection = ParetoLevelSelection::new()
            .select(&population, &mut rng)
            .unwrap();
        for &i in selection.chosen() {
            hits[i] += 1;
        }
    }

    // Individual 9 has the best fitness and tops the level.
    assert_eq!(hits[9], 2000);
    // Rank 1 is individual 8, rank 9 is individual 0.
    assert!(hits[8] > hits[0]);
    assert!(hits[7] > hits[0]);
    assert!(hits.iter().all(|&h| h > 0));
}

#[test]
fn test_whole_levels_admitted_exactly_and_empty_levels_skipped() {
    let population = sparse_levels(5);
    let mut rng = RandomNumberGenerator::from_seed(1);
    let selection = ParetoLevelSelection::new()
        .select(&population, &mut rng)
        .unwrap();

    assert_eq!(selection.chosen(), &[0, 1, 2, 3, 4]);
    assert!(!selection.is_selected(5));
}

#[test]
fn test_lower_levels_admitted_before_higher_ones() {
    let population = sparse_levels(4);
    for seed in 0..100 {
        let mut rng = RandomNumberGenerator::from_seed(seed);
        let selection = ParetoLevelSelection::new()
            .select(&population, &mut rng)
            .unwrap();

        assert_eq!(selection.len(), 4);
        assert_eq!(selection.distinct_count(), 4);
        assert!(selection.is_selected(0) && selection.is_selected(1));
        assert!(!selection.is_selected(5));
        let boundary = (2..5).filter(|&i| selection.is_selected(i)).count();
        assert_eq!(boundary, 2);
    }
}

#[test]
fn test_marks_written_back() {
    let mut population = ranked_five(2);
    let mut rng = RandomNumberGenerator::from_seed(0);
    let selection = ParetoLevelSelection::new()
        .select(&population, &mut rng)
        .unwrap();
    population.apply(&selection);

    let marked: Vec<u64> = population
        .individuals()
        .iter()
        .filter(|ind| ind.selected)
        .map(|ind| ind.id)
        .collect();
    assert_eq!(marked, vec![0, 1]);
}

#[test]
fn test_newer_preferred_on_tie_splits_clones() {
    // Three clones: with tie preference the newest is alone on the front.
    let objectives = ObjectiveSet::fitness_and_age().with_newer_preferred_on_tie();
    let population = ObjectivePopulation::new(
        vec![
            Individual::new(3, 1.0, 1),
            Individual::new(9, 1.0, 1),
            Individual::new(5, 1.0, 1),
        ],
        1,
        objectives,
    );
    let mut rng = RandomNumberGenerator::from_seed(2);
    let selection = ParetoLevelSelection::new()
        .select(&population, &mut rng)
        .unwrap();
    assert_eq!(selection.chosen(), &[1]);
}
