use crate::edge::{CostMatrix, Edge};
use crate::error::{InstanceError, InstanceResult};
use ndarray::s;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the weight sub-matrix is enlarged.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    /// Tile the weights `k x k` times.
    ReplicateBy(usize),
    /// Tile, then cut to a full dimension of `s` (sentinels included).
    ResizeTo(usize),
}

impl ScaleMode {
    pub fn validate(&self) -> InstanceResult<()> {
        match *self {
            ScaleMode::ReplicateBy(0) => Err(InstanceError::configuration(
                "Replication factor must be at least 1",
            )),
            ScaleMode::ResizeTo(size) if size < 3 => Err(InstanceError::configuration(format!(
                "Target size must be at least 3 (two sentinels and one task), got {}",
                size
            ))),
            _ => Ok(()),
        }
    }

    /// Suffix embedded in the rewritten instance name, e.g. `x3` or `s120`.
    pub fn suffix(&self) -> String {
        match self {
            ScaleMode::ReplicateBy(k) => format!("x{}", k),
            ScaleMode::ResizeTo(size) => format!("s{}", size),
        }
    }
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaleMode::ReplicateBy(k) => write!(f, "replicate by {}", k),
            ScaleMode::ResizeTo(size) => write!(f, "resize to {}", size),
        }
    }
}

pub fn ceil_div(a: usize, b: usize) -> usize {
    a / b + usize::from(a % b != 0)
}

/// Side length of `factor x factor` tiles of width `unit`. Fails when the
/// padded matrix (sentinels included) would not fit in the address space.
pub fn tiled_side(unit: usize, factor: usize) -> InstanceResult<usize> {
    let too_large = || {
        InstanceError::configuration(format!(
            "Tiling {} tasks {} times per side exceeds the addressable matrix size",
            unit, factor
        ))
    };
    let side = unit.checked_mul(factor).ok_or_else(too_large)?;
    let full = side.checked_add(2).ok_or_else(too_large)?;
    let bytes = full
        .checked_mul(full)
        .and_then(|cells| cells.checked_mul(std::mem::size_of::<Edge>()))
        .ok_or_else(too_large)?;
    if bytes > isize::MAX as usize {
        return Err(too_large());
    }
    Ok(side)
}

/// Lays `factor x factor` copies of `weights` edge to edge.
pub fn tile(weights: &CostMatrix, factor: usize) -> CostMatrix {
    let (rows, cols) = weights.dim();
    CostMatrix::from_shape_fn((rows * factor, cols * factor), |(i, j)| {
        weights[[i % rows, j % cols]]
    })
}

pub fn replicate(weights: &CostMatrix, times: usize) -> InstanceResult<CostMatrix> {
    ensure_tileable(weights)?;
    ScaleMode::ReplicateBy(times).validate()?;
    tiled_side(weights.nrows(), times)?;
    Ok(tile(weights, times))
}

/// `size` is the full target dimension, so the weights end up `size - 2` wide.
/// Shrinking only truncates; the tile unit is never reduced.
pub fn resize(weights: &CostMatrix, size: usize) -> InstanceResult<CostMatrix> {
    ensure_tileable(weights)?;
    ScaleMode::ResizeTo(size).validate()?;
    let target = size - 2;
    let current = weights.nrows();
    let factor = if target > current {
        ceil_div(target, current)
    } else {
        1
    };
    tiled_side(current, factor)?;
    Ok(tile(weights, factor).slice(s![..target, ..target]).to_owned())
}

pub fn scale(weights: &CostMatrix, mode: ScaleMode) -> InstanceResult<CostMatrix> {
    match mode {
        ScaleMode::ReplicateBy(times) => replicate(weights, times),
        ScaleMode::ResizeTo(size) => resize(weights, size),
    }
}

fn ensure_tileable(weights: &CostMatrix) -> InstanceResult<()> {
    if weights.nrows() != weights.ncols() {
        return Err(InstanceError::format(format!(
            "Weight matrix must be square, got {}x{}",
            weights.nrows(),
            weights.ncols()
        )));
    }
    if weights.is_empty() {
        return Err(InstanceError::configuration(
            "Cannot scale an instance without tasks",
        ));
    }
    Ok(())
}
