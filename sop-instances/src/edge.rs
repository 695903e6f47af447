use ndarray::Array2;
use std::fmt;

/// Raw value written for a precedence cell.
pub const PRECEDENCE_MARKER: i64 = -1;

/// Cost of the direct start to end transition. Large enough to keep an empty
/// schedule from looking optimal on the benchmark suite's cost scale.
pub const FORBIDDEN_COST: u64 = 1_000_000;

/// Largest cost that survives a write and re-read; the format is signed.
pub const MAX_COST: u64 = i64::MAX as u64;

/// One cell of a cost matrix.
///
/// The instance format overloads a single signed integer: non-negative values
/// are transition costs, negative values mean the row's task has to wait for
/// the column's task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Cost(u64),
    Precedence,
}

pub type CostMatrix = Array2<Edge>;

impl Edge {
    pub fn from_raw(value: i64) -> Self {
        if value < 0 {
            Edge::Precedence
        } else {
            Edge::Cost(value as u64)
        }
    }

    /// Costs above [`MAX_COST`] saturate instead of wrapping into markers.
    pub fn raw(&self) -> i64 {
        match self {
            Edge::Cost(cost) => i64::try_from(*cost).unwrap_or(i64::MAX),
            Edge::Precedence => PRECEDENCE_MARKER,
        }
    }

    pub fn is_precedence(&self) -> bool {
        matches!(self, Edge::Precedence)
    }

    pub fn cost(&self) -> Option<u64> {
        match self {
            Edge::Cost(cost) => Some(*cost),
            Edge::Precedence => None,
        }
    }
}

impl Default for Edge {
    fn default() -> Self {
        Edge::Cost(0)
    }
}

impl From<i64> for Edge {
    fn from(value: i64) -> Self {
        Edge::from_raw(value)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Cost(cost) => write!(f, "{}", cost),
            Edge::Precedence => write!(f, "{}", PRECEDENCE_MARKER),
        }
    }
}

/// Builds a matrix from raw signed rows. Panics if the rows are ragged.
pub fn matrix_from_raw(rows: &[Vec<i64>]) -> CostMatrix {
    let height = rows.len();
    let width = rows.first().map_or(0, |row| row.len());
    CostMatrix::from_shape_fn((height, width), |(i, j)| Edge::from_raw(rows[i][j]))
}

pub fn matrix_to_raw(matrix: &CostMatrix) -> Vec<Vec<i64>> {
    matrix
        .rows()
        .into_iter()
        .map(|row| row.iter().map(Edge::raw).collect())
        .collect()
}
