use async_trait::async_trait;
use parking_lot::RwLock;

use foyer_core::Message;
use foyer_store::error::StoreError;
use foyer_store::messages::MessageStore;

/// In-memory append-only [`MessageStore`].
///
/// Keeps every created message so tests can assert on what was persisted.
#[derive(Debug, Default)]
pub struct MemoryMessageStore {
    messages: RwLock<Vec<Message>>,
}

impl MemoryMessageStore {
    /// Create a new, empty in-memory message store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every message created so far, in creation order.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.messages.read().clone()
    }

    /// Number of messages created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    /// Whether no message has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn create(&self, message: &Message) -> Result<(), StoreError> {
        self.messages.write().push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use foyer_core::Caller;

    use super::*;

    #[tokio::test]
    async fn create_appends_in_order() {
        let store = MemoryMessageStore::new();
        let caller = Caller::new("Ada", "ada@example.com");

        let first = Message::personal(&caller, "1", "first", "body", false);
        let second = Message::personal(&caller, "2", "second", "body", true);
        store.create(&first).await.unwrap();
        store.create(&second).await.unwrap();

        let all = store.messages();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].subject, "first");
        assert_eq!(all[1].subject, "second");
    }

    #[tokio::test]
    async fn empty_store_reports_empty() {
        let store = MemoryMessageStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }
}
