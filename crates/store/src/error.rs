use thiserror::Error;

use foyer_core::ApiError;

/// Errors from the storage collaborators.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("backend error: {0}")]
    Backend(String),
}

/// Any storage failure is a dependency failure from the caller's point of
/// view; the endpoint boundary renders it as a 500.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_internal() {
        let api: ApiError = StoreError::Backend("disk on fire".into()).into();
        assert_eq!(api.status_code(), 500);
        assert!(api.to_string().contains("disk on fire"));
    }
}
