//! Error types for the apparatus module

use beamlink_host::HostError;
use beamlink_reflect::ReflectError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while building the module or serving beamline calls
#[derive(Debug, Error)]
pub enum ModelError {
    /// Type registration failed during module initialisation
    #[error("registration failed: {0}")]
    Registration(#[from] ReflectError),

    /// Host environment error
    #[error(transparent)]
    Host(#[from] HostError),

    /// Module configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// `Beamline.item` lookup failed
    #[error("No element or source with name '{0}' found in beamline.")]
    ItemNotFound(String),

    /// The tracer reported a failure
    #[error("trace failed: {0}")]
    Trace(String),

    /// A traced ray column does not match the others in length
    #[error("ray column '{column}' has {got} entries, expected {expected}")]
    RaggedColumn {
        column: &'static str,
        expected: usize,
        got: usize,
    },
}

impl From<ModelError> for HostError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Host(inner) => inner,
            other => HostError::native(other),
        }
    }
}
