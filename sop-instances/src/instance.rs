use crate::edge::{CostMatrix, Edge};
use crate::error::{InstanceError, InstanceResult};
use indexmap::IndexMap;
use ndarray::s;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::debug;

pub const SECTION_MARKER: &str = "EDGE_WEIGHT_SECTION";
pub const END_MARKER: &str = "EOF";

pub const NAME_KEY: &str = "NAME";
pub const DIMENSION_KEY: &str = "DIMENSION";
pub const SOLUTION_BOUNDS_KEY: &str = "SOLUTION_BOUNDS";
pub const COMMENT_KEY: &str = "COMMENT";

/// Value stored in `SOLUTION_BOUNDS` when the optimum is not known.
pub const UNKNOWN_BOUND: &str = "-1";

/// Header entries in file order.
pub type Header = IndexMap<String, String>;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolutionBounds {
    pub lower: i64,
    pub upper: i64,
}

impl SolutionBounds {
    /// Parses `"a"` or `"a,b"`. The unknown marker yields `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() || value == UNKNOWN_BOUND {
            return None;
        }
        match value.split_once(',') {
            Some((lower, upper)) => Some(Self {
                lower: lower.trim().parse().ok()?,
                upper: upper.trim().parse().ok()?,
            }),
            None => {
                let bound = value.parse().ok()?;
                Some(Self {
                    lower: bound,
                    upper: bound,
                })
            }
        }
    }

    pub fn is_exact(&self) -> bool {
        self.lower == self.upper
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub header: Header,
    pub matrix: CostMatrix,
}

impl Instance {
    pub fn new(header: Header, matrix: CostMatrix) -> Self {
        Self { header, matrix }
    }

    pub fn read(path: &Path) -> InstanceResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> InstanceResult<Self> {
        let (header_block, data_block) = text.split_once(SECTION_MARKER).ok_or_else(|| {
            InstanceError::format(format!("Missing '{}' marker", SECTION_MARKER))
        })?;

        let header = parse_header(header_block);
        let matrix = parse_matrix(data_block)?;
        let n = matrix.nrows();

        if let Some(declared) = header.get(DIMENSION_KEY) {
            let declared = declared.parse::<usize>().map_err(|_| {
                InstanceError::format(format!("Invalid {} header: '{}'", DIMENSION_KEY, declared))
            })?;
            if declared != n {
                return Err(InstanceError::format(format!(
                    "{} header ({}) does not match matrix dimension ({})",
                    DIMENSION_KEY, declared, n
                )));
            }
        }
        if n < 3 {
            return Err(InstanceError::format(format!(
                "Dimension must be at least 3 (two sentinels and one task), got {}",
                n
            )));
        }

        debug!(dimension = n, header_keys = header.len(), "parsed instance");
        Ok(Self { header, matrix })
    }

    pub fn name(&self) -> Option<&str> {
        self.header.get(NAME_KEY).map(String::as_str)
    }

    pub fn dimension(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn solution_bounds(&self) -> Option<SolutionBounds> {
        self.header
            .get(SOLUTION_BOUNDS_KEY)
            .and_then(|value| SolutionBounds::parse(value))
    }

    /// Task-to-task costs with the start and end sentinels removed.
    pub fn weights(&self) -> CostMatrix {
        let n = self.dimension();
        if n < 2 {
            return CostMatrix::default((0, 0));
        }
        self.matrix.slice(s![1..n - 1, 1..n - 1]).to_owned()
    }

    pub fn precedence_count(&self) -> usize {
        self.matrix.iter().filter(|edge| edge.is_precedence()).count()
    }
}

fn parse_header(block: &str) -> Header {
    block
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(':') {
            Some((key, value)) => (key.trim().to_string(), value.trim().to_string()),
            None => (line.to_string(), String::new()),
        })
        .collect()
}

fn parse_matrix(block: &str) -> InstanceResult<CostMatrix> {
    let data = match block.split_once(END_MARKER) {
        Some((data, _)) => data,
        None => block,
    };
    let mut lines = data.lines().map(str::trim).filter(|line| !line.is_empty());

    let dim_line = lines
        .next()
        .ok_or_else(|| InstanceError::format("Missing dimension line after section marker"))?;
    let n = dim_line
        .parse::<usize>()
        .map_err(|_| InstanceError::format(format!("Invalid dimension line: '{}'", dim_line)))?;

    let rows: Vec<&str> = lines.collect();
    if rows.len() != n {
        return Err(InstanceError::format(format!(
            "Declared dimension {} but found {} rows",
            n,
            rows.len()
        )));
    }

    // Grows with the entries actually present; `n` comes from the file.
    let mut values = Vec::new();
    for (row, line) in rows.iter().enumerate() {
        let before = values.len();
        for token in line.split_whitespace() {
            let value = token.parse::<i64>().map_err(|_| {
                InstanceError::format(format!("Invalid matrix entry '{}' in row {}", token, row))
            })?;
            values.push(Edge::from_raw(value));
        }
        let count = values.len() - before;
        if count != n {
            return Err(InstanceError::format(format!(
                "Row {} has {} entries, expected {}",
                row, count, n
            )));
        }
    }

    CostMatrix::from_shape_vec((n, n), values)
        .map_err(|e| InstanceError::format(format!("Matrix shape error: {}", e)))
}
