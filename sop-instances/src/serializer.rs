use crate::edge::CostMatrix;
use crate::instance::{
    Header, Instance, DIMENSION_KEY, END_MARKER, NAME_KEY, SECTION_MARKER, SOLUTION_BOUNDS_KEY,
    UNKNOWN_BOUND,
};
use crate::scaler::ScaleMode;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const NAME_EXTENSION: &str = ".sop";

/// `ESC07.sop` becomes `ESC07x3.sop` or `ESC07s120.sop`. Names without the
/// extension get the suffix appended.
pub fn rename(name: &str, mode: ScaleMode) -> String {
    let suffix = mode.suffix();
    if name.contains(NAME_EXTENSION) {
        name.replace(NAME_EXTENSION, &format!("{}{}", suffix, NAME_EXTENSION))
    } else {
        format!("{}{}", name, suffix)
    }
}

/// Updates name, dimension and bounds in place; other keys keep their order.
pub fn rewrite_header(header: &mut Header, mode: ScaleMode, dimension: usize) {
    if let Some(name) = header.get_mut(NAME_KEY) {
        *name = rename(name, mode);
    }
    header.insert(DIMENSION_KEY.to_string(), dimension.to_string());
    header.insert(SOLUTION_BOUNDS_KEY.to_string(), UNKNOWN_BOUND.to_string());
}

pub fn render(header: &Header, matrix: &CostMatrix) -> String {
    let mut lines: Vec<String> = header
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect();
    lines.push(SECTION_MARKER.to_string());
    lines.push(matrix.nrows().to_string());
    lines.extend(matrix.rows().into_iter().map(|row| {
        row.iter()
            .map(|edge| edge.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }));
    lines.push(END_MARKER.to_string());
    lines.push(String::new());
    lines.join("\n")
}

impl Instance {
    pub fn render(&self) -> String {
        render(&self.header, &self.matrix)
    }
}

/// The explicit destination if given, otherwise the instance name.
pub fn output_path(explicit: Option<&Path>, header: &Header) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| header.get(NAME_KEY).map(PathBuf::from))
}

pub fn write(path: &Path, text: &str) -> std::io::Result<()> {
    fs::write(path, text)
}
