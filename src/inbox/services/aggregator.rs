//! Grouping of flat message lists into per-counterpart conversations.

use crate::inbox::domain::{AggregationError, Conversation, Message, MessageId, UserId};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Mutable per-counterpart state collected during the linear pass.
#[derive(Debug)]
struct ConversationAccumulator {
    counterpart_id: UserId,
    messages: Vec<Message>,
    unread_count: usize,
    last_message: Message,
}

impl ConversationAccumulator {
    fn start(counterpart_id: UserId, first: Message, unread: bool) -> Self {
        Self {
            counterpart_id,
            messages: vec![first.clone()],
            unread_count: usize::from(unread),
            last_message: first,
        }
    }

    fn push(&mut self, message: Message, unread: bool) {
        if unread {
            self.unread_count += 1;
        }
        if message.created_at() > self.last_message.created_at() {
            self.last_message = message.clone();
        }
        self.messages.push(message);
    }

    fn finish(self) -> Conversation {
        let mut messages = self.messages;
        // Stable: equal timestamps keep input order, missing timestamps lead.
        messages.sort_by_key(Message::created_at);
        Conversation::from_parts(
            self.counterpart_id,
            messages,
            self.unread_count,
            self.last_message,
        )
    }
}

/// Builds conversations for one user in a single pass over their messages.
///
/// Conversations are emitted in the order their counterpart was first seen.
///
/// # Examples
///
/// ```
/// use rental_inbox::inbox::domain::{ListingId, Message, UserId};
/// use rental_inbox::inbox::services::ConversationAggregator;
/// use mockable::DefaultClock;
///
/// let me = UserId::new("u1").expect("valid id");
/// let other = UserId::new("u2").expect("valid id");
/// let listing = ListingId::new("L1").expect("valid id");
/// let message = Message::new(other.clone(), me.clone(), listing, "Hello", &DefaultClock)
///     .expect("valid message");
///
/// let mut aggregator = ConversationAggregator::new(me);
/// aggregator.push(message).expect("message involves the user");
/// let conversations = aggregator.finish();
///
/// assert_eq!(conversations.len(), 1);
/// assert_eq!(conversations[0].counterpart_id(), &other);
/// assert_eq!(conversations[0].unread_count(), 1);
/// ```
#[derive(Debug)]
pub struct ConversationAggregator {
    user_id: UserId,
    positions: HashMap<UserId, usize>,
    buckets: Vec<ConversationAccumulator>,
}

impl ConversationAggregator {
    /// Creates an empty aggregator for `user_id`.
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            positions: HashMap::new(),
            buckets: Vec::new(),
        }
    }

    /// Returns the user whose conversations are being built.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Adds one message to its counterpart's bucket.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::UnrelatedMessage`] when the user is neither
    /// sender nor recipient, or when the message is self-addressed. The
    /// aggregator is left unchanged in that case.
    pub fn push(&mut self, message: Message) -> Result<(), AggregationError> {
        let Some(counterpart_id) = message.counterpart_of(&self.user_id).cloned() else {
            return Err(AggregationError::UnrelatedMessage {
                message_id: message.id(),
                user_id: self.user_id.clone(),
            });
        };
        let unread = message.is_unread_for(&self.user_id);

        if let Some(bucket) = self
            .positions
            .get(&counterpart_id)
            .and_then(|position| self.buckets.get_mut(*position))
        {
            bucket.push(message, unread);
            return Ok(());
        }

        self.positions
            .insert(counterpart_id.clone(), self.buckets.len());
        self.buckets
            .push(ConversationAccumulator::start(counterpart_id, message, unread));
        Ok(())
    }

    /// Finalizes every bucket into an immutable [`Conversation`].
    #[must_use]
    pub fn finish(self) -> Vec<Conversation> {
        self.buckets
            .into_iter()
            .map(ConversationAccumulator::finish)
            .collect()
    }
}

/// Result of a lenient aggregation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationOutcome {
    /// Conversations built from every well-formed message.
    pub conversations: Vec<Conversation>,
    /// Messages that did not involve the querying user, in input order.
    pub skipped: Vec<MessageId>,
}

/// Groups `messages` into one conversation per counterpart of `user_id`.
///
/// Every message lands in exactly one conversation, so the total message
/// count across the result equals the input length.
///
/// # Errors
///
/// Returns [`AggregationError::UnrelatedMessage`] for the first message in
/// which `user_id` is neither sender nor recipient.
pub fn group_into_conversations<I>(
    messages: I,
    user_id: &UserId,
) -> Result<Vec<Conversation>, AggregationError>
where
    I: IntoIterator<Item = Message>,
{
    let mut aggregator = ConversationAggregator::new(user_id.clone());
    for message in messages {
        aggregator.push(message)?;
    }
    Ok(aggregator.finish())
}

/// Groups `messages` like [`group_into_conversations`], skipping and logging
/// messages that do not involve `user_id` instead of failing.
#[must_use]
pub fn group_into_conversations_lenient<I>(messages: I, user_id: &UserId) -> AggregationOutcome
where
    I: IntoIterator<Item = Message>,
{
    let mut aggregator = ConversationAggregator::new(user_id.clone());
    let mut skipped = Vec::new();
    for message in messages {
        if let Err(err) = aggregator.push(message) {
            warn!(
                message_id = %err.message_id(),
                user_id = %user_id,
                "skipping message without a counterpart for the user"
            );
            skipped.push(err.message_id());
        }
    }

    let conversations = aggregator.finish();
    debug!(
        user_id = %user_id,
        conversations = conversations.len(),
        skipped = skipped.len(),
        "aggregated conversations"
    );
    AggregationOutcome {
        conversations,
        skipped,
    }
}

/// Orders conversations most recent first, as an inbox lists them.
///
/// The sort is stable, so conversations with equal last-message timestamps
/// keep their relative order.
pub fn sort_by_recency(conversations: &mut [Conversation]) {
    conversations.sort_by(|left, right| {
        right
            .last_message()
            .created_at()
            .cmp(&left.last_message().created_at())
    });
}
