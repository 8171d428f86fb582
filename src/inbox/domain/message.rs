//! Direct message exchanged between two users about a listing.

use super::{InboxDomainError, ListingId, MessageId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A direct message between a tenant and a landlord.
///
/// # Invariants
///
/// - `sender_id` and `recipient_id` differ for newly created messages
/// - `content` is non-blank for newly created messages
/// - The only permitted mutation is the unread to read transition
///
/// `created_at` is optional so that records imported without a timestamp can
/// still be represented. Such messages sort before every timestamped message.
///
/// # Examples
///
/// ```
/// use rental_inbox::inbox::domain::{ListingId, Message, UserId};
/// use mockable::DefaultClock;
///
/// let tenant = UserId::new("tenant-1").expect("valid id");
/// let landlord = UserId::new("landlord-1").expect("valid id");
/// let listing = ListingId::new("flat-42").expect("valid id");
///
/// let message = Message::new(
///     tenant.clone(),
///     landlord.clone(),
///     listing,
///     "Is the flat still available?",
///     &DefaultClock,
/// )
/// .expect("valid message");
///
/// assert!(message.is_unread_for(&landlord));
/// assert_eq!(message.counterpart_of(&tenant), Some(&landlord));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    sender_id: UserId,
    recipient_id: UserId,
    listing_id: ListingId,
    content: String,
    #[serde(alias = "read", default)]
    is_read: bool,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMessageData {
    /// Persisted message identifier.
    pub id: MessageId,
    /// Persisted sender.
    pub sender_id: UserId,
    /// Persisted recipient.
    pub recipient_id: UserId,
    /// Persisted listing reference.
    pub listing_id: ListingId,
    /// Persisted body.
    pub content: String,
    /// Persisted read flag.
    pub is_read: bool,
    /// Persisted creation timestamp, if the record has one.
    pub created_at: Option<DateTime<Utc>>,
}

impl Message {
    /// Creates a new unread message stamped with the clock's current time.
    ///
    /// # Errors
    ///
    /// Returns [`InboxDomainError::SelfAddressed`] when sender and recipient
    /// are the same user, or [`InboxDomainError::EmptyContent`] when the
    /// content is blank.
    pub fn new(
        sender_id: UserId,
        recipient_id: UserId,
        listing_id: ListingId,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, InboxDomainError> {
        if sender_id == recipient_id {
            return Err(InboxDomainError::SelfAddressed(sender_id));
        }

        let body = content.into();
        if body.trim().is_empty() {
            return Err(InboxDomainError::EmptyContent);
        }

        Ok(Self {
            id: MessageId::new(),
            sender_id,
            recipient_id,
            listing_id,
            content: body,
            is_read: false,
            created_at: Some(clock.utc()),
        })
    }

    /// Reconstructs a message from persisted storage without validation.
    #[must_use]
    pub fn from_persisted(data: PersistedMessageData) -> Self {
        Self {
            id: data.id,
            sender_id: data.sender_id,
            recipient_id: data.recipient_id,
            listing_id: data.listing_id,
            content: data.content,
            is_read: data.is_read,
            created_at: data.created_at,
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the sender.
    #[must_use]
    pub const fn sender_id(&self) -> &UserId {
        &self.sender_id
    }

    /// Returns the recipient.
    #[must_use]
    pub const fn recipient_id(&self) -> &UserId {
        &self.recipient_id
    }

    /// Returns the listing this message is about.
    #[must_use]
    pub const fn listing_id(&self) -> &ListingId {
        &self.listing_id
    }

    /// Returns the message body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns `true` once the recipient has read the message.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.is_read
    }

    /// Returns the creation timestamp, if recorded.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Returns `true` when `user_id` is the sender or the recipient.
    #[must_use]
    pub fn involves(&self, user_id: &UserId) -> bool {
        self.sender_id == *user_id || self.recipient_id == *user_id
    }

    /// Returns the other participant relative to `user_id`.
    ///
    /// Returns `None` when `user_id` is not a participant, and for
    /// self-addressed records, which have no other participant.
    #[must_use]
    pub fn counterpart_of(&self, user_id: &UserId) -> Option<&UserId> {
        if self.sender_id == self.recipient_id {
            None
        } else if self.sender_id == *user_id {
            Some(&self.recipient_id)
        } else if self.recipient_id == *user_id {
            Some(&self.sender_id)
        } else {
            None
        }
    }

    /// Returns `true` when `user_id` received this message and has not read it.
    #[must_use]
    pub fn is_unread_for(&self, user_id: &UserId) -> bool {
        !self.is_read && self.recipient_id == *user_id
    }

    /// Marks the message as read.
    ///
    /// Returns `true` only when the flag actually changed, so callers can
    /// count transitions.
    pub const fn mark_read(&mut self) -> bool {
        if self.is_read {
            return false;
        }
        self.is_read = true;
        true
    }
}
