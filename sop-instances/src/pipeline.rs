use crate::config::{validate_forbidden_cost, UpscaleConfig};
use crate::edge::CostMatrix;
use crate::error::{InstanceError, InstanceResult};
use crate::instance::{Instance, SolutionBounds, NAME_KEY};
use crate::scaler::{self, ScaleMode};
use crate::{sentinel, serializer, validator};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UpscaleReport {
    pub name: Option<String>,
    pub output: PathBuf,
    pub mode: ScaleMode,
    pub input_dimension: usize,
    pub output_dimension: usize,
    pub precedence_constraints: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InstanceSummary {
    pub name: Option<String>,
    pub dimension: usize,
    pub precedence_constraints: usize,
    pub solution_bounds: Option<SolutionBounds>,
    pub acyclic: bool,
}

/// Scales, reattaches sentinels, validates and rewrites the header.
/// The input instance is left untouched.
pub fn upscale(
    instance: &Instance,
    mode: ScaleMode,
    forbidden_cost: u64,
) -> InstanceResult<Instance> {
    validate_forbidden_cost(forbidden_cost)?;
    let weights = instance.weights();
    warn_if_costs_reach(&weights, forbidden_cost);

    let scaled = scaler::scale(&weights, mode)?;
    debug!(mode = %mode, from = weights.nrows(), to = scaled.nrows(), "scaled weights");

    let full = sentinel::reattach(&scaled, forbidden_cost);
    validator::ensure_acyclic(&full)?;
    debug!(dimension = full.nrows(), "precedence relation is acyclic");

    let mut header = instance.header.clone();
    serializer::rewrite_header(&mut header, mode, full.nrows());
    Ok(Instance::new(header, full))
}

/// Reads, upscales and writes one instance. Nothing is written unless every
/// stage succeeds.
pub fn run(config: &UpscaleConfig) -> InstanceResult<UpscaleReport> {
    config.validate()?;
    let mut instance = Instance::read(&config.input)?;
    if instance.name().is_none() {
        if let Some(file_name) = config.input.file_name().and_then(|name| name.to_str()) {
            instance
                .header
                .shift_insert(0, NAME_KEY.to_string(), file_name.to_string());
        }
    }

    let upscaled = upscale(&instance, config.mode, config.forbidden_cost)?;
    let output = serializer::output_path(config.output.as_deref(), &upscaled.header)
        .ok_or_else(|| InstanceError::configuration("No output path and no NAME to derive one"))?;
    write_instance(&output, &upscaled)?;

    let report = UpscaleReport {
        name: upscaled.name().map(str::to_string),
        output,
        mode: config.mode,
        input_dimension: instance.dimension(),
        output_dimension: upscaled.dimension(),
        precedence_constraints: upscaled.precedence_count(),
    };
    info!(
        output = %report.output.display(),
        from = report.input_dimension,
        to = report.output_dimension,
        "wrote upscaled instance"
    );
    Ok(report)
}

pub fn write_instance(path: &Path, instance: &Instance) -> InstanceResult<()> {
    serializer::write(path, &instance.render())?;
    Ok(())
}

pub fn inspect(instance: &Instance) -> InstanceSummary {
    InstanceSummary {
        name: instance.name().map(str::to_string),
        dimension: instance.dimension(),
        precedence_constraints: instance.precedence_count(),
        solution_bounds: instance.solution_bounds(),
        acyclic: !validator::has_cycle(&instance.matrix),
    }
}

fn warn_if_costs_reach(weights: &CostMatrix, forbidden_cost: u64) {
    let max_cost = weights.iter().filter_map(|edge| edge.cost()).max();
    if let Some(max_cost) = max_cost {
        if max_cost >= forbidden_cost {
            warn!(
                max_cost,
                forbidden_cost,
                "task costs reach the forbidden start to end cost; consider raising it"
            );
        }
    }
}
