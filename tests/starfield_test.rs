use eclipse_ngin::data_structures::starfield::{
    STARFIELD_EXTENT, generate_positions, generate_positions_with, sample_coordinate,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn three_coordinates_per_star() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    assert_eq!(generate_positions_with(3000, &mut rng).len(), 9000);
    assert_eq!(generate_positions_with(1, &mut rng).len(), 3);
}

#[test]
fn empty_field_is_allowed() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    assert!(generate_positions_with(0, &mut rng).is_empty());
    assert!(generate_positions(0).is_empty());
}

#[test]
fn coordinates_stay_inside_the_extent() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let positions = generate_positions_with(20_000, &mut rng);
    assert!(
        positions
            .iter()
            .all(|c| c.is_finite() && c.abs() < STARFIELD_EXTENT)
    );
}

#[test]
fn coordinates_cluster_near_the_centre() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let samples: Vec<f32> = (0..50_000).map(|_| sample_coordinate(&mut rng)).collect();
    let mean = samples.iter().sum::<f32>() / samples.len() as f32;
    let inner = samples.iter().filter(|c| c.abs() < 1.0).count();

    assert!(mean.abs() < 0.05, "mean drifted to {}", mean);
    // P(|x| < 1) = 0.2 - 0.2 ln 0.2, about 0.52
    assert!(inner * 2 > samples.len());
}

#[test]
fn same_seed_same_field() {
    let a = generate_positions_with(100, &mut ChaCha8Rng::seed_from_u64(9));
    let b = generate_positions_with(100, &mut ChaCha8Rng::seed_from_u64(9));
    assert_eq!(a, b);
}

#[test]
fn every_call_yields_a_new_field() {
    assert_ne!(generate_positions(64), generate_positions(64));
}
