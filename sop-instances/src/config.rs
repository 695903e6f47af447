use crate::edge::{FORBIDDEN_COST, MAX_COST};
use crate::error::{InstanceError, InstanceResult};
use crate::scaler::ScaleMode;
use serde::{Deserialize, Serialize};
use sop_utils::dejsonify;
use std::path::PathBuf;

fn default_forbidden_cost() -> u64 {
    FORBIDDEN_COST
}

/// Everything a single upscale run needs.
///
/// `forbidden_cost` is the value written for the direct start to end
/// transition. Raise it when task costs reach the default of 1 000 000.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UpscaleConfig {
    pub input: PathBuf,
    pub mode: ScaleMode,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default = "default_forbidden_cost")]
    pub forbidden_cost: u64,
}

impl UpscaleConfig {
    pub fn new(input: PathBuf, mode: ScaleMode, output: Option<PathBuf>) -> Self {
        Self {
            input,
            mode,
            output,
            forbidden_cost: FORBIDDEN_COST,
        }
    }

    /// Builds a config from the two mutually exclusive scaling flags.
    pub fn from_flags(
        input: PathBuf,
        times: Option<usize>,
        size: Option<usize>,
        output: Option<PathBuf>,
    ) -> InstanceResult<Self> {
        let mode = match (times, size) {
            (Some(times), None) => ScaleMode::ReplicateBy(times),
            (None, Some(size)) => ScaleMode::ResizeTo(size),
            _ => {
                return Err(InstanceError::configuration(
                    "exactly one scaling mode required",
                ))
            }
        };
        let config = Self::new(input, mode, output);
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> InstanceResult<Self> {
        let config = dejsonify::<Self>(json)
            .map_err(|e| InstanceError::configuration(format!("Failed to parse settings: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_forbidden_cost(mut self, forbidden_cost: u64) -> Self {
        self.forbidden_cost = forbidden_cost;
        self
    }

    pub fn validate(&self) -> InstanceResult<()> {
        self.mode.validate()?;
        validate_forbidden_cost(self.forbidden_cost)
    }
}

/// The cost has to be positive and still read back as a cost, not a marker.
pub fn validate_forbidden_cost(forbidden_cost: u64) -> InstanceResult<()> {
    if forbidden_cost == 0 {
        return Err(InstanceError::configuration(
            "Forbidden start to end cost must be positive",
        ));
    }
    if forbidden_cost > MAX_COST {
        return Err(InstanceError::configuration(format!(
            "Forbidden start to end cost {} exceeds the largest writable cost {}",
            forbidden_cost, MAX_COST
        )));
    }
    Ok(())
}
