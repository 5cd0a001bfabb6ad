use crate::datasource::DataSourceError;
use crate::domain::AddressParseError;
use thiserror::Error;

/// Degenerate numeric condition, kept distinct from application errors
/// so call sites can apply different recovery policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("division by zero")]
    DivisionByZero,
}

/// Top-level error surface of the portfolio library.
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// The owner address failed format validation. Raised before any
    /// external call is made.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Any external collaborator call failed. One unified condition;
    /// transport detail stays in the source error.
    #[error("upstream service unavailable: {0}")]
    Upstream(#[from] DataSourceError),

    /// Unrecoverable numeric condition in live position valuation.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl From<AddressParseError> for PortfolioError {
    fn from(err: AddressParseError) -> Self {
        PortfolioError::InvalidAddress(err.0)
    }
}
