//! Movement report error types.

use thiserror::Error;
use wwi_shared::AppError;

/// Caller input rejected while building the filter model.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MovementError {
    /// Option list kind outside `proveedores`, `tipos`, `clientes`.
    #[error("Tipo no válido: {0}")]
    UnknownOptionKind(String),

    /// Date bound not in `YYYY-MM-DD` form.
    #[error("Fecha no válida en {field}: {value}")]
    InvalidDate {
        /// Query parameter name.
        field: &'static str,
        /// Raw value supplied.
        value: String,
    },

    /// Client id that is neither a sentinel nor an integer.
    #[error("Cliente no válido: {0}")]
    InvalidClientId(String),
}

impl From<MovementError> for AppError {
    fn from(err: MovementError) -> Self {
        Self::Validation(err.to_string())
    }
}
