use thiserror::Error;

pub type PortfolioResult<T> = Result<T, PortfolioError>;

#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Holding not found with id: {0}")]
    HoldingNotFound(i64),

    #[error("Portfolio has no holdings")]
    EmptyPortfolio,

    #[error("Failed to decode column '{column}': {reason}")]
    Decode { column: String, reason: String },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Coarse classification the access layer maps to user-facing outcomes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Storage,
}

impl PortfolioError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::HoldingNotFound(_) | Self::EmptyPortfolio => ErrorKind::NotFound,
            Self::Decode { .. } | Self::Database(_) => ErrorKind::Storage,
        }
    }
}
