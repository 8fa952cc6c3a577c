use genselect::{
    error::SelectionError,
    individual::Individual,
    objectives::{non_dominated_size, Dominance, ObjectiveSet},
    options::{SelectionKind, SelectionOptions},
    population::{ObjectivePopulation, Population},
    rng::RandomNumberGenerator,
    selection::{ParetoTournamentReduction, SelectionStrategy},
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Ids 10 and 11 form the front; every other individual is dominated by one of them.
fn front_of_two(target_size: usize) -> ObjectivePopulation<Individual> {
    ObjectivePopulation::new(
        vec![
            Individual::new(20, 9.0, 6),
            Individual::new(10, 10.0, 5),
            Individual::new(21, 4.0, 2),
            Individual::new(22, 8.0, 7),
            Individual::new(11, 5.0, 1),
            Individual::new(23, 3.0, 8),
        ],
        target_size,
        ObjectiveSet::fitness_and_age(),
    )
}

fn ids(population: &ObjectivePopulation<Individual>) -> Vec<u64> {
    population.individuals().iter().map(|ind| ind.id).collect()
}

#[test]
fn test_reduces_to_front() {
    init_tracing();
    for seed in 0..100 {
        let mut population = front_of_two(2);
        let mut rng = RandomNumberGenerator::from_seed(seed);
        let survivors = ParetoTournamentReduction::new()
            .select(&population, &mut rng)
            .unwrap();
        population.reduce(&survivors);

        // Objective order puts the fitter front member first.
        assert_eq!(ids(&population), vec![10, 11]);
        assert!(population.individuals().iter().all(|ind| ind.selected));
    }
}

#[test]
fn test_stops_at_target_size_above_front() {
    for seed in 0..100 {
        let population = front_of_two(4);
        let mut rng = RandomNumberGenerator::from_seed(seed);
        let survivors = ParetoTournamentReduction::new()
            .select(&population, &mut rng)
            .unwrap();

        assert_eq!(survivors.len(), 4);
        // Front members (positions 1 and 4) are never culled.
        assert!(survivors.is_selected(1) && survivors.is_selected(4));
        assert_eq!(&survivors.chosen()[..2], &[1, 4]);
    }
}

#[test]
fn test_never_shrinks_below_front() {
    let population = front_of_two(1);
    let mut rng = RandomNumberGenerator::from_seed(6);
    let survivors = ParetoTournamentReduction::new()
        .select(&population, &mut rng)
        .unwrap();
    assert_eq!(survivors.chosen(), &[1, 4]);
}

#[test]
fn test_size_stays_within_bounds_on_larger_populations() {
    let mut data_rng = RandomNumberGenerator::from_seed(31);
    for round in 0..20 {
        let individuals: Vec<Individual> = (0..40)
            .map(|i| {
                let fitness = data_rng.fetch_uniform(0.0, 1.0, 1)[0];
                let age = data_rng.index(10).unwrap() as u64;
                Individual::new(i, fitness, age)
            })
            .collect();
        let population = ObjectivePopulation::new(individuals, 15, ObjectiveSet::fitness_and_age());
        let counts = population.dominance().unwrap().dominance_counts();
        let front = non_dominated_size(&counts);

        let mut rng = RandomNumberGenerator::from_seed(round);
        let survivors = ParetoTournamentReduction::new()
            .select(&population, &mut rng)
            .unwrap();

        assert_eq!(survivors.len(), front.max(15));
        assert_eq!(survivors.distinct_count(), survivors.len());
        for (i, &count) in counts.iter().enumerate() {
            if count == 0 {
                assert!(survivors.is_selected(i));
            }
        }
    }
}

#[test]
fn test_configured_through_options() {
    let options = SelectionOptions::builder()
        .method(SelectionKind::ParetoTournament)
        .build();
    let strategy = options.strategy().unwrap();

    let population = front_of_two(2);
    let mut rng = RandomNumberGenerator::from_seed(0);
    let survivors = strategy.select(&population, &mut rng).unwrap();
    assert_eq!(survivors.chosen(), &[1, 4]);
}

#[test]
fn test_invalid_populations() {
    let mut rng = RandomNumberGenerator::from_seed(0);
    let empty: ObjectivePopulation<Individual> =
        ObjectivePopulation::new(Vec::new(), 1, ObjectiveSet::fitness_and_age());
    assert_eq!(
        ParetoTournamentReduction::new().select(&empty, &mut rng),
        Err(SelectionError::EmptyPopulation)
    );

    let zero_target = front_of_two(0);
    assert!(matches!(
        ParetoTournamentReduction::new().select(&zero_target, &mut rng),
        Err(SelectionError::Configuration(_))
    ));
}
