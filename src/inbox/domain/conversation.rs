//! Derived conversation view between the querying user and one counterpart.

use super::{ListingId, Message, UserId};
use serde::Serialize;

/// All messages exchanged between the querying user and one counterpart.
///
/// Conversations are never persisted. They are rebuilt from the current
/// message set on every read by
/// [`ConversationAggregator`](crate::inbox::services::ConversationAggregator).
///
/// # Invariants
///
/// - `messages` is non-empty and sorted non-decreasing by `created_at`
/// - `last_message` carries the greatest `created_at` in `messages`
/// - `unread_count` counts messages addressed to the querying user that are
///   still unread
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversation {
    counterpart_id: UserId,
    messages: Vec<Message>,
    unread_count: usize,
    last_message: Message,
}

impl Conversation {
    pub(crate) const fn from_parts(
        counterpart_id: UserId,
        messages: Vec<Message>,
        unread_count: usize,
        last_message: Message,
    ) -> Self {
        Self {
            counterpart_id,
            messages,
            unread_count,
            last_message,
        }
    }

    /// Returns the other participant.
    #[must_use]
    pub const fn counterpart_id(&self) -> &UserId {
        &self.counterpart_id
    }

    /// Returns the messages in chronological order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of unread messages addressed to the querying user.
    #[must_use]
    pub const fn unread_count(&self) -> usize {
        self.unread_count
    }

    /// Returns `true` when at least one message is unread.
    #[must_use]
    pub const fn has_unread(&self) -> bool {
        self.unread_count > 0
    }

    /// Returns the most recent message.
    #[must_use]
    pub const fn last_message(&self) -> &Message {
        &self.last_message
    }

    /// Returns the number of messages in the conversation.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always `false`; kept for API symmetry with [`Self::len`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the distinct listings discussed, in chronological first-mention
    /// order.
    #[must_use]
    pub fn listing_ids(&self) -> Vec<&ListingId> {
        let mut seen: Vec<&ListingId> = Vec::new();
        for message in &self.messages {
            let listing_id = message.listing_id();
            if !seen.contains(&listing_id) {
                seen.push(listing_id);
            }
        }
        seen
    }
}
