use faultscape_core::{
    FaultFormation2D, HeightGrid, TerrainError, TerrainParams, Weathering2D, normalize_symmetric,
    regenerate, regenerate_seeded, synthesize_heights,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rstest::rstest;

fn params(grid_size: usize, fault_count: usize, weathering_iterations: usize, seed: u64) -> TerrainParams {
    TerrainParams {
        grid_size,
        fault_count,
        weathering_iterations,
        seed: Some(seed),
    }
}

#[test]
fn two_by_two_flat_terrain() {
    let mesh = regenerate_seeded(&params(2, 0, 0, 1)).unwrap();
    assert_eq!(mesh.vertex_count(), 4);
    assert!(mesh.positions.iter().all(|p| p.z == 0.0));
    assert_eq!(mesh.triangles, vec![[0, 1, 2], [1, 2, 3]]);
}

#[test]
fn single_fault_splits_three_by_three_into_two_levels() {
    let mut split_seen = false;
    for seed in 0..64 {
        let mut grid = HeightGrid::new(3).unwrap();
        FaultFormation2D::new(1).apply(&mut grid, &mut StdRng::seed_from_u64(seed));
        assert!(grid.as_slice().iter().all(|&h| h == 1.0 || h == -1.0));

        let (lo, hi) = grid.min_max();
        if lo == hi {
            // the fault line can miss every cell when it runs along a corner
            continue;
        }
        split_seen = true;
        assert_eq!((lo, hi), (-1.0, 1.0));
        normalize_symmetric(&mut grid);
        assert!(grid.as_slice().iter().all(|&h| h == -0.25 || h == 0.25));
        assert!(grid.as_slice().contains(&-0.25));
        assert!(grid.as_slice().contains(&0.25));
    }
    assert!(split_seen);
}

#[test]
fn weathering_lowers_variance_on_faulted_grid() {
    let rough = synthesize_heights(&params(5, 20, 0, 2025), &mut StdRng::seed_from_u64(2025)).unwrap();
    let smooth = synthesize_heights(&params(5, 20, 5, 2025), &mut StdRng::seed_from_u64(2025)).unwrap();
    assert!(rough.variance() > 0.0);
    assert!(smooth.variance() < rough.variance());
}

#[rstest]
#[case(2)]
#[case(3)]
#[case(17)]
#[case(128)]
#[case(255)]
fn mesh_counts_follow_grid_size(#[case] n: usize) {
    let mesh = regenerate_seeded(&params(n, 4, 1, 11)).unwrap();
    assert_eq!(mesh.positions.len(), n * n);
    assert_eq!(mesh.normals.len(), n * n);
    assert_eq!(mesh.triangles.len(), 2 * (n - 1) * (n - 1));
    assert!(mesh.indices().all(|k| (k as usize) < n * n));
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(256)]
fn out_of_range_sizes_are_rejected(#[case] n: usize) {
    let err = regenerate(&params(n, 1, 1, 0), &mut StdRng::seed_from_u64(0)).unwrap_err();
    assert!(matches!(err, TerrainError::InvalidGridSize { size, min: 2, max: 255 } if size == n));
}

#[rstest]
#[case(9, 0)]
#[case(9, 3)]
fn no_faults_means_flat_terrain(#[case] n: usize, #[case] weathering: usize) {
    let grid = synthesize_heights(&params(n, 0, weathering, 5), &mut StdRng::seed_from_u64(5)).unwrap();
    assert!(grid.as_slice().iter().all(|&h| h == 0.0));
}

#[rstest]
#[case(12, 30, 7)]
#[case(40, 100, 8)]
fn faulted_terrain_spans_quarter_range(#[case] n: usize, #[case] faults: usize, #[case] seed: u64) {
    let grid = synthesize_heights(&params(n, faults, 0, seed), &mut StdRng::seed_from_u64(seed)).unwrap();
    let (lo, hi) = grid.min_max();
    assert!((lo + 0.25).abs() < 1e-6);
    assert!((hi - 0.25).abs() < 1e-6);
}

#[test]
fn zero_weathering_matches_normalized_grid() {
    let p = params(20, 25, 0, 77);
    let mut manual = HeightGrid::new(20).unwrap();
    let mut rng = StdRng::seed_from_u64(77);
    FaultFormation2D::new(25).apply(&mut manual, &mut rng);
    normalize_symmetric(&mut manual);

    let piped = synthesize_heights(&p, &mut StdRng::seed_from_u64(77)).unwrap();
    assert_eq!(piped, manual);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn mesh_shape_and_indices_hold(n in 2usize..=255, faults in 0usize..6, weathering in 0usize..3, seed in any::<u64>()) {
        let mesh = regenerate_seeded(&params(n, faults, weathering, seed)).unwrap();
        prop_assert_eq!(mesh.vertex_count(), n * n);
        prop_assert_eq!(mesh.triangles.len(), 2 * (n - 1) * (n - 1));
        prop_assert!(mesh.indices().all(|k| (k as usize) < n * n));
    }

    #[test]
    fn normals_are_unit_or_zero(n in 2usize..40, faults in 0usize..30, weathering in 0usize..4, seed in any::<u64>()) {
        let mesh = regenerate_seeded(&params(n, faults, weathering, seed)).unwrap();
        for normal in &mesh.normals {
            let len = normal.length();
            prop_assert!(len == 0.0 || (len - 1.0).abs() < 1e-5, "normal length {}", len);
        }
    }

    #[test]
    fn weathering_never_raises_variance(
        n in 2usize..12,
        heights in prop::collection::vec(-10.0f32..10.0, 144),
    ) {
        let mut grid = HeightGrid::from_fn(n, |i, j| heights[i * n + j]).unwrap();
        for _ in 0..4 {
            let before = grid.variance();
            Weathering2D::new(1).apply(&mut grid);
            let after = grid.variance();
            prop_assert!(after <= before + 1e-4 * before.max(1.0), "{} > {}", after, before);
        }
    }
}
