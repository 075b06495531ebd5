use thiserror::Error;

/// Errors raised by the treasury services.
///
/// `FundNotFound`, `MissingField` and `Validation` are caused by the caller and
/// carry a message that is safe to show. `Internal` wraps infrastructure
/// failures whose detail must stay in the logs.
#[derive(Debug, Error)]
pub enum TreasuryError {
    #[error("Fund not found: {id}")]
    FundNotFound { id: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid request: {reason}")]
    Validation { reason: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl TreasuryError {
    pub fn fund_not_found(id: impl Into<String>) -> Self {
        TreasuryError::FundNotFound { id: id.into() }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        TreasuryError::MissingField {
            field: field.into(),
        }
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        TreasuryError::Validation {
            reason: reason.into(),
        }
    }

    /// True when the error was caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, TreasuryError::Internal(_))
    }
}
