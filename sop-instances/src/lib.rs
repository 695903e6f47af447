//! Upscaling of sequential ordering problem instances.
//!
//! An instance is parsed, its task weights are tiled up to a new size, the
//! start and end sentinels are reattached and the precedence relation is
//! checked for cycles before the result is serialized again.

pub mod config;
pub use config::*;
pub mod edge;
pub use edge::*;
pub mod error;
pub use error::*;
pub mod instance;
pub use instance::*;
pub mod pipeline;
pub use pipeline::*;
pub mod scaler;
pub use scaler::{ceil_div, ScaleMode};
pub mod sentinel;
pub mod serializer;
pub mod validator;
