//! Application services for the rental inbox.
//!
//! The aggregation and read-marking functions are pure and synchronous; the
//! [`InboxService`] wires them to a [`MessageRepository`] and a clock.
//!
//! [`MessageRepository`]: crate::inbox::ports::MessageRepository

mod aggregator;
mod inbox;
mod read_marker;

pub use aggregator::{
    AggregationOutcome, ConversationAggregator, group_into_conversations,
    group_into_conversations_lenient, sort_by_recency,
};
pub use inbox::{
    InboxService, InboxServiceError, InboxServiceResult, InboxView, SendMessageRequest,
};
pub use read_marker::mark_conversation_read;
