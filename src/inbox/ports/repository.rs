//! Repository port for direct message persistence.

use crate::inbox::domain::{Message, MessageId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for message repository operations.
pub type MessageRepositoryResult<T> = Result<T, MessageRepositoryError>;

/// Message persistence contract.
///
/// # Implementation Notes
///
/// Implementations must ensure:
/// - Message IDs are unique
/// - Messages are never rewritten apart from the read flag
/// - [`MessageRepository::mark_read`] is a single guarded update, so two
///   concurrent callers never both count the same transition
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Stores a new message.
    ///
    /// # Errors
    ///
    /// Returns [`MessageRepositoryError::DuplicateMessage`] when the message
    /// ID already exists.
    async fn store(&self, message: &Message) -> MessageRepositoryResult<()>;

    /// Finds a message by identifier.
    ///
    /// Returns `None` when the message does not exist.
    async fn find_by_id(&self, id: MessageId) -> MessageRepositoryResult<Option<Message>>;

    /// Returns every message the user sent or received.
    ///
    /// Ordering is adapter-defined; aggregation does not depend on it.
    async fn find_for_participant(&self, user_id: &UserId)
    -> MessageRepositoryResult<Vec<Message>>;

    /// Marks every unread message from `sender_id` to `recipient_id` as read.
    ///
    /// Equivalent to `UPDATE … SET is_read = true WHERE recipient = ? AND
    /// sender = ? AND is_read = false`. Returns the number of messages that
    /// transitioned; a repeated call with no new messages returns zero.
    async fn mark_read(
        &self,
        recipient_id: &UserId,
        sender_id: &UserId,
    ) -> MessageRepositoryResult<usize>;

    /// Counts unread messages addressed to the user across all senders.
    async fn count_unread(&self, user_id: &UserId) -> MessageRepositoryResult<usize>;
}

/// Errors returned by message repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MessageRepositoryError {
    /// A message with the same identifier already exists.
    #[error("duplicate message identifier: {0}")]
    DuplicateMessage(MessageId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MessageRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
