use thiserror::Error;

/// Problems with the launch table that make it unusable for the dashboard.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DataError {
    #[error("outcome class must be 0 or 1, got {0}")]
    InvalidOutcome(i64),

    #[error("outcome class must be the integer 0 or 1, got {0}")]
    NonIntegralOutcome(f64),

    #[error("payload mass must be a finite, non-negative number of kg, got {0}")]
    InvalidPayload(f64),

    #[error("dataset contains no launch records")]
    Empty,
}
