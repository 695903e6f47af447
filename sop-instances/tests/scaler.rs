use ndarray::s;
use sop_instances::scaler::{replicate, resize, scale, tile, tiled_side};
use sop_instances::{ceil_div, matrix_from_raw, CostMatrix, Edge, InstanceError, ScaleMode};

fn weights_2x2() -> CostMatrix {
    matrix_from_raw(&[vec![0, 3], vec![4, 0]])
}

fn weights_3x3() -> CostMatrix {
    matrix_from_raw(&[vec![0, 1, 2], vec![-1, 0, 5], vec![7, 8, 0]])
}

#[test]
fn test_ceil_div() {
    assert_eq!(ceil_div(7, 3), 3);
    assert_eq!(ceil_div(6, 3), 2);
    assert_eq!(ceil_div(1, 5), 1);
    assert_eq!(ceil_div(usize::MAX, 2), usize::MAX / 2 + 1);
}

#[test]
fn test_tiled_side() {
    assert_eq!(tiled_side(2, 3).unwrap(), 6);
    assert_eq!(tiled_side(7, 1).unwrap(), 7);
    for (unit, factor) in [(2, usize::MAX), (2, usize::MAX / 2), (1, 1 << 32)] {
        let err = tiled_side(unit, factor).unwrap_err();
        assert!(matches!(err, InstanceError::Configuration(_)), "{} {}", unit, factor);
    }
}

#[test]
fn test_huge_factors_are_configuration_errors() {
    let weights = weights_2x2();
    for times in [usize::MAX, usize::MAX / 2, usize::MAX / 4, 1 << 32] {
        let err = replicate(&weights, times).unwrap_err();
        assert!(matches!(err, InstanceError::Configuration(_)), "{}", times);
    }
    for size in [usize::MAX, usize::MAX / 2, 1 << 40] {
        let err = resize(&weights, size).unwrap_err();
        assert!(matches!(err, InstanceError::Configuration(_)), "{}", size);
    }
}

#[test]
fn test_replicate_dimension_and_blocks() {
    let weights = weights_2x2();
    let scaled = replicate(&weights, 3).unwrap();
    assert_eq!(scaled.dim(), (6, 6));
    for a in 0..3 {
        for b in 0..3 {
            assert_eq!(
                scaled.slice(s![a * 2..(a + 1) * 2, b * 2..(b + 1) * 2]),
                weights
            );
        }
    }
}

#[test]
fn test_replicate_by_one_is_identity() {
    let weights = weights_3x3();
    assert_eq!(replicate(&weights, 1).unwrap(), weights);
}

#[test]
fn test_replicate_rejects_zero() {
    let err = replicate(&weights_2x2(), 0).unwrap_err();
    assert!(matches!(err, InstanceError::Configuration(_)));
}

#[test]
fn test_resize_grows_with_truncation() {
    let weights = weights_3x3();
    // full size 9 -> 7 tasks -> factor 3, cut from 9x9
    let resized = resize(&weights, 9).unwrap();
    assert_eq!(resized.dim(), (7, 7));
    assert_eq!(resized, tile(&weights, 3).slice(s![..7, ..7]));
    assert_eq!(resized[[6, 6]], weights[[0, 0]]);
    assert_eq!(resized[[4, 3]], Edge::Precedence);
}

#[test]
fn test_resize_exact_multiple() {
    let weights = weights_2x2();
    let resized = resize(&weights, 6).unwrap();
    assert_eq!(resized, tile(&weights, 2));
}

#[test]
fn test_resize_shrinks_by_truncation_only() {
    let weights = weights_3x3();
    let resized = resize(&weights, 4).unwrap();
    assert_eq!(resized, weights.slice(s![..2, ..2]));
}

#[test]
fn test_resize_single_task() {
    let weights = matrix_from_raw(&[vec![0]]);
    let resized = resize(&weights, 3).unwrap();
    assert_eq!(resized.dim(), (1, 1));
    assert_eq!(resized[[0, 0]], Edge::Cost(0));
}

#[test]
fn test_resize_rejects_too_small() {
    let err = resize(&weights_2x2(), 2).unwrap_err();
    assert!(matches!(err, InstanceError::Configuration(_)));
}

#[test]
fn test_scale_rejects_empty_weights() {
    let empty = CostMatrix::default((0, 0));
    let err = scale(&empty, ScaleMode::ReplicateBy(2)).unwrap_err();
    assert!(matches!(err, InstanceError::Configuration(_)));
}

#[test]
fn test_scale_dispatches() {
    let weights = weights_2x2();
    assert_eq!(
        scale(&weights, ScaleMode::ReplicateBy(2)).unwrap().dim(),
        (4, 4)
    );
    assert_eq!(
        scale(&weights, ScaleMode::ResizeTo(7)).unwrap().dim(),
        (5, 5)
    );
}

#[test]
fn test_mode_suffix() {
    assert_eq!(ScaleMode::ReplicateBy(3).suffix(), "x3");
    assert_eq!(ScaleMode::ResizeTo(120).suffix(), "s120");
}
