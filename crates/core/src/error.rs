use thiserror::Error;

/// A request-scoped failure carrying the HTTP status policy.
///
/// Every failure is raised at the point of detection and surfaced to the
/// caller as a status code plus a short human-readable string; there is no
/// internal recovery and no retry anywhere in the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Client input failed validation (422). Unknown recipients are modeled
    /// as validation failures rather than 404s.
    #[error("{0}")]
    Unprocessable(String),

    /// The request was understood but refused by policy (400), e.g. a config
    /// that is not on the exposure allow-list.
    #[error("{0}")]
    BadRequest(String),

    /// A downstream dependency failed (500).
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// The HTTP status code this error maps to at the transport boundary.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unprocessable(_) => 422,
            Self::BadRequest(_) => 400,
            Self::Internal(_) => 500,
        }
    }
}
