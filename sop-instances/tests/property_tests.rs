use ndarray::s;
use proptest::prelude::*;
use sop_instances::scaler::{replicate, resize, tile};
use sop_instances::sentinel::reattach;
use sop_instances::validator::has_cycle;
use sop_instances::{CostMatrix, Edge, FORBIDDEN_COST};

fn arb_weights() -> impl Strategy<Value = CostMatrix> {
    (1usize..6).prop_flat_map(|n| {
        proptest::collection::vec(0u64..1000, n * n).prop_map(move |values| {
            CostMatrix::from_shape_vec((n, n), values.into_iter().map(Edge::Cost).collect())
                .unwrap()
        })
    })
}

proptest! {
    #[test]
    fn replicate_dimension_law(weights in arb_weights(), k in 1usize..5) {
        let scaled = replicate(&weights, k).unwrap();
        prop_assert_eq!(scaled.nrows(), weights.nrows() * k);
        prop_assert_eq!(scaled.ncols(), weights.ncols() * k);
    }

    #[test]
    fn replicate_tiling_fidelity(weights in arb_weights(), k in 1usize..4) {
        let u = weights.nrows();
        let scaled = replicate(&weights, k).unwrap();
        for a in 0..k {
            for b in 0..k {
                prop_assert_eq!(scaled.slice(s![a * u..(a + 1) * u, b * u..(b + 1) * u]), weights.view());
            }
        }
    }

    #[test]
    fn resize_dimension_and_truncation(weights in arb_weights(), size in 3usize..30) {
        let resized = resize(&weights, size).unwrap();
        let target = size - 2;
        prop_assert_eq!(resized.dim(), (target, target));
        let factor = (target + weights.nrows() - 1) / weights.nrows();
        let tiled = tile(&weights, factor.max(1));
        prop_assert_eq!(resized.view(), tiled.slice(s![..target, ..target]));
    }

    #[test]
    fn reattach_corrects_start_row(weights in arb_weights()) {
        let full = reattach(&weights, FORBIDDEN_COST);
        let last = full.ncols() - 1;
        prop_assert_eq!(full.dim(), (weights.nrows() + 2, weights.nrows() + 2));
        prop_assert_eq!(full[[0, 0]], Edge::Cost(0));
        prop_assert_eq!(full[[0, last]], Edge::Cost(FORBIDDEN_COST));
    }

    #[test]
    fn cost_only_weights_stay_acyclic(weights in arb_weights(), k in 1usize..4) {
        let full = reattach(&replicate(&weights, k).unwrap(), FORBIDDEN_COST);
        prop_assert!(!has_cycle(&full));
    }
}
