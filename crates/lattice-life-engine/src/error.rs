//! Error types for the simulation engine.

use lattice_life_core::CoreError;
use thiserror::Error;

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur during engine operations.
///
/// UI races (resuming a finished run, placing with nothing selected) are
/// deliberately not represented here; those surface as no-op boolean or
/// empty returns on the controller.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A pattern referenced by name was not found in the catalog.
    #[error("pattern not found: {name:?}")]
    PatternNotFound { name: String },

    /// The engine configuration failed validation.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A core data-type error (out-of-bounds access, bad pattern literal).
    #[error(transparent)]
    Core(#[from] CoreError),
}
