//! In-memory message repository for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::inbox::{
    domain::{Message, MessageId, UserId},
    ports::{MessageRepository, MessageRepositoryError, MessageRepositoryResult},
    services::mark_conversation_read,
};

/// Thread-safe in-memory message repository.
///
/// Messages are returned in insertion order.
///
/// # Example
///
/// ```
/// use rental_inbox::inbox::adapters::memory::InMemoryMessageRepository;
///
/// let repo = InMemoryMessageRepository::new();
/// assert!(repo.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryMessageRepository {
    state: Arc<RwLock<InMemoryMessageState>>,
}

#[derive(Debug, Default)]
struct InMemoryMessageState {
    messages: Vec<Message>,
    ids: HashMap<MessageId, usize>,
}

impl InMemoryMessageRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored messages.
    ///
    /// Returns `0` if the internal lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state
            .read()
            .map(|guard| guard.messages.len())
            .unwrap_or(0)
    }

    /// Returns `true` if no messages are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned(err: impl ToString) -> MessageRepositoryError {
    MessageRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn store(&self, message: &Message) -> MessageRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.ids.contains_key(&message.id()) {
            return Err(MessageRepositoryError::DuplicateMessage(message.id()));
        }

        let position = state.messages.len();
        state.ids.insert(message.id(), position);
        state.messages.push(message.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: MessageId) -> MessageRepositoryResult<Option<Message>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .ids
            .get(&id)
            .and_then(|position| state.messages.get(*position))
            .cloned())
    }

    async fn find_for_participant(
        &self,
        user_id: &UserId,
    ) -> MessageRepositoryResult<Vec<Message>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .messages
            .iter()
            .filter(|message| message.involves(user_id))
            .cloned()
            .collect())
    }

    async fn mark_read(
        &self,
        recipient_id: &UserId,
        sender_id: &UserId,
    ) -> MessageRepositoryResult<usize> {
        // Check and update under one write guard.
        let mut state = self.state.write().map_err(poisoned)?;
        Ok(mark_conversation_read(
            &mut state.messages,
            recipient_id,
            sender_id,
        ))
    }

    async fn count_unread(&self, user_id: &UserId) -> MessageRepositoryResult<usize> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .messages
            .iter()
            .filter(|message| message.is_unread_for(user_id))
            .count())
    }
}
