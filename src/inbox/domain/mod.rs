//! Domain model for the rental inbox.
//!
//! Pure types with no infrastructure dependencies: identifiers, the
//! [`Message`] record, and the derived [`Conversation`] view.

mod conversation;
mod error;
mod ids;
mod message;

pub use conversation::Conversation;
pub use error::{AggregationError, InboxDomainError};
pub use ids::{ListingId, MAX_ID_CHARS, MessageId, UserId};
pub use message::{Message, PersistedMessageData};
