use async_trait::async_trait;

use foyer_core::Message;

use crate::error::StoreError;

/// Append-only persistence for contact messages.
///
/// Messages are immutable once created; no update or delete operation is
/// exposed here.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist a newly created message.
    async fn create(&self, message: &Message) -> Result<(), StoreError>;
}
