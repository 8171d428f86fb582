//! Error types for inbox domain validation and aggregation.

use super::{MessageId, UserId};
use thiserror::Error;

/// Errors returned while constructing inbox domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InboxDomainError {
    /// The user identifier is empty after trimming.
    #[error("user identifier must not be empty")]
    EmptyUserId,

    /// The listing identifier is empty after trimming.
    #[error("listing identifier must not be empty")]
    EmptyListingId,

    /// A user or listing identifier is longer than the storage limit.
    #[error("identifier has {actual} characters, exceeds limit of {max}")]
    IdentifierTooLong {
        /// The maximum allowed number of characters.
        max: usize,
        /// The actual number of characters.
        actual: usize,
    },

    /// The message body is empty or whitespace-only.
    #[error("message content must not be empty")]
    EmptyContent,

    /// The message body exceeds the configured limit.
    #[error("message content has {actual} characters, exceeds limit of {max}")]
    ContentTooLong {
        /// The maximum allowed number of characters.
        max: usize,
        /// The actual number of characters.
        actual: usize,
    },

    /// The sender and recipient are the same user.
    #[error("user {0} cannot send a message to themselves")]
    SelfAddressed(UserId),
}

/// Errors returned while grouping messages into conversations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AggregationError {
    /// The message has no counterpart for the querying user.
    ///
    /// Either the user is neither sender nor recipient, or the message is
    /// addressed from the user to themselves.
    #[error("message {message_id} has no counterpart for user {user_id}")]
    UnrelatedMessage {
        /// The offending message.
        message_id: MessageId,
        /// The user whose conversations were being built.
        user_id: UserId,
    },
}

impl AggregationError {
    /// Returns the identifier of the message that was rejected.
    #[must_use]
    pub const fn message_id(&self) -> MessageId {
        match self {
            Self::UnrelatedMessage { message_id, .. } => *message_id,
        }
    }
}
