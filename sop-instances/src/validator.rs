use crate::edge::CostMatrix;
use crate::error::{InstanceError, InstanceResult};
use std::collections::VecDeque;
use tracing::debug;

/// Orders nodes so that each comes after every node its row marks as a
/// precedence. Returns `None` when the precedence relation has a cycle.
///
/// A precedence marker on the diagonal counts as a self-loop.
pub fn topological_order(matrix: &CostMatrix) -> Option<Vec<usize>> {
    if matrix.nrows() != matrix.ncols() {
        return None;
    }
    let order = schedule(matrix);
    if order.len() == matrix.nrows() {
        Some(order)
    } else {
        None
    }
}

pub fn has_cycle(matrix: &CostMatrix) -> bool {
    topological_order(matrix).is_none()
}

pub fn ensure_acyclic(matrix: &CostMatrix) -> InstanceResult<()> {
    if matrix.nrows() != matrix.ncols() {
        return Err(InstanceError::format(format!(
            "Precedence matrix must be square, got {}x{}",
            matrix.nrows(),
            matrix.ncols()
        )));
    }
    let dimension = matrix.nrows();
    let scheduled = schedule(matrix).len();
    if scheduled == dimension {
        Ok(())
    } else {
        Err(InstanceError::DependencyCycle {
            remaining: dimension - scheduled,
            dimension,
        })
    }
}

// Kahn's algorithm over the rows: a node is free once every column it marks
// has been scheduled. Stops early when no node is free.
fn schedule(matrix: &CostMatrix) -> Vec<usize> {
    let n = matrix.nrows();
    let mut unmet = vec![0usize; n];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
    for ((i, j), edge) in matrix.indexed_iter() {
        if edge.is_precedence() {
            unmet[i] += 1;
            dependents[j].push(i);
        }
    }

    let mut queue: VecDeque<usize> = (0..n).filter(|&i| unmet[i] == 0).collect();
    let mut order = Vec::with_capacity(n);
    while let Some(node) = queue.pop_front() {
        order.push(node);
        for &dependent in &dependents[node] {
            unmet[dependent] -= 1;
            if unmet[dependent] == 0 {
                queue.push_back(dependent);
            }
        }
    }

    if order.len() < n {
        debug!(scheduled = order.len(), dimension = n, "topological scan stalled");
    }
    order
}
