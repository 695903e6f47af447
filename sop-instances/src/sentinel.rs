use crate::edge::{CostMatrix, Edge};
use ndarray::s;

/// Wraps an `m x m` weight matrix in the start row/column and end row/column.
///
/// Padding follows the instance convention:
/// - start row: no dependencies, zero cost to every task
/// - end row: depends on every node
/// - start column: every task depends on the start node
/// - end column: zero cost from every node
///
/// The start row is then corrected with [`correct_start_row`].
pub fn reattach(sub: &CostMatrix, forbidden_cost: u64) -> CostMatrix {
    let m = sub.nrows();
    let n = m + 2;
    let mut full = CostMatrix::from_elem((n, n), Edge::Cost(0));

    full.slice_mut(s![1..m + 1, 1..m + 1]).assign(sub);
    full.slice_mut(s![m + 1, 1..m + 1]).fill(Edge::Precedence);
    full.column_mut(0).fill(Edge::Precedence);
    full.column_mut(n - 1).fill(Edge::Cost(0));

    correct_start_row(&mut full, forbidden_cost);
    full
}

/// Sets `(0, 0)` to zero and `(0, last)` to the forbidden cost. Idempotent.
pub fn correct_start_row(full: &mut CostMatrix, forbidden_cost: u64) {
    let last = full.ncols() - 1;
    full[[0, 0]] = Edge::Cost(0);
    full[[0, last]] = Edge::Cost(forbidden_cost);
}
