use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstanceError {
    #[error("Malformed instance: {0}")]
    Format(String),
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    #[error("Generated graph has a dependency cycle ({remaining} of {dimension} nodes cannot be scheduled)")]
    DependencyCycle { remaining: usize, dimension: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type InstanceResult<T> = Result<T, InstanceError>;

impl InstanceError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        InstanceError::Format(msg.into())
    }

    pub(crate) fn configuration(msg: impl Into<String>) -> Self {
        InstanceError::Configuration(msg.into())
    }
}
