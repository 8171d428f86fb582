//! Service layer for listing, reading, and sending direct messages.

use super::aggregator::{group_into_conversations_lenient, sort_by_recency};
use crate::inbox::{
    config::InboxConfig,
    domain::{Conversation, InboxDomainError, ListingId, Message, MessageId, UserId},
    ports::{MessageRepository, MessageRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for sending a message about a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageRequest {
    sender_id: String,
    recipient_id: String,
    listing_id: String,
    content: String,
}

impl SendMessageRequest {
    /// Creates a request from raw identifiers and body text.
    #[must_use]
    pub fn new(
        sender_id: impl Into<String>,
        recipient_id: impl Into<String>,
        listing_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            sender_id: sender_id.into(),
            recipient_id: recipient_id.into(),
            listing_id: listing_id.into(),
            content: content.into(),
        }
    }
}

/// Service-level errors for inbox operations.
#[derive(Debug, Error)]
pub enum InboxServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] InboxDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] MessageRepositoryError),
}

/// Result type for inbox service operations.
pub type InboxServiceResult<T> = Result<T, InboxServiceError>;

/// Conversation list prepared for an inbox page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxView {
    conversations: Vec<Conversation>,
    skipped: Vec<MessageId>,
}

impl InboxView {
    /// Returns conversations, most recent first.
    #[must_use]
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    /// Returns the messages left out because they did not involve the user.
    #[must_use]
    pub fn skipped(&self) -> &[MessageId] {
        &self.skipped
    }

    /// Returns the unread count summed over every conversation.
    #[must_use]
    pub fn total_unread(&self) -> usize {
        self.conversations
            .iter()
            .map(Conversation::unread_count)
            .sum()
    }

    /// Returns the conversation with `counterpart_id`, if any.
    #[must_use]
    pub fn conversation_with(&self, counterpart_id: &UserId) -> Option<&Conversation> {
        self.conversations
            .iter()
            .find(|conversation| conversation.counterpart_id() == counterpart_id)
    }

    /// Consumes the view and returns its conversations.
    #[must_use]
    pub fn into_conversations(self) -> Vec<Conversation> {
        self.conversations
    }
}

/// Inbox orchestration service.
#[derive(Clone)]
pub struct InboxService<R, C>
where
    R: MessageRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    config: InboxConfig,
}

impl<R, C> InboxService<R, C>
where
    R: MessageRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new inbox service with the default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self::with_config(repository, clock, InboxConfig::default())
    }

    /// Creates a new inbox service with an explicit configuration.
    #[must_use]
    pub const fn with_config(repository: Arc<R>, clock: Arc<C>, config: InboxConfig) -> Self {
        Self {
            repository,
            clock,
            config,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &InboxConfig {
        &self.config
    }

    /// Lists the user's conversations, most recent first.
    ///
    /// Messages that do not involve the user are skipped and reported in
    /// [`InboxView::skipped`] rather than failing the whole listing.
    ///
    /// # Errors
    ///
    /// Returns [`InboxServiceError::Repository`] when the fetch fails.
    pub async fn list_conversations(&self, user_id: &UserId) -> InboxServiceResult<InboxView> {
        let messages = self.repository.find_for_participant(user_id).await?;
        let outcome = group_into_conversations_lenient(messages, user_id);
        let mut conversations = outcome.conversations;
        sort_by_recency(&mut conversations);
        Ok(InboxView {
            conversations,
            skipped: outcome.skipped,
        })
    }

    /// Returns the conversation between `user_id` and `counterpart_id`.
    ///
    /// Returns `Ok(None)` when the two users have not exchanged messages.
    ///
    /// # Errors
    ///
    /// Returns [`InboxServiceError::Repository`] when the fetch fails.
    pub async fn conversation_with(
        &self,
        user_id: &UserId,
        counterpart_id: &UserId,
    ) -> InboxServiceResult<Option<Conversation>> {
        let view = self.list_conversations(user_id).await?;
        Ok(view
            .into_conversations()
            .into_iter()
            .find(|conversation| conversation.counterpart_id() == counterpart_id))
    }

    /// Marks everything `counterpart_id` sent to `user_id` as read.
    ///
    /// Returns the number of messages that transitioned.
    ///
    /// # Errors
    ///
    /// Returns [`InboxServiceError::Repository`] when the update fails.
    pub async fn mark_conversation_read(
        &self,
        user_id: &UserId,
        counterpart_id: &UserId,
    ) -> InboxServiceResult<usize> {
        let transitioned = self.repository.mark_read(user_id, counterpart_id).await?;
        debug!(
            user_id = %user_id,
            counterpart_id = %counterpart_id,
            transitioned,
            "marked conversation read"
        );
        Ok(transitioned)
    }

    /// Validates, timestamps, and stores an outgoing message.
    ///
    /// # Errors
    ///
    /// Returns [`InboxServiceError::Domain`] when identifiers are blank, the
    /// content is blank or longer than `max_content_chars`, or the sender
    /// addresses themselves. Returns [`InboxServiceError::Repository`] when
    /// persistence fails.
    pub async fn send_message(&self, request: SendMessageRequest) -> InboxServiceResult<Message> {
        let sender_id = UserId::new(request.sender_id)?;
        let recipient_id = UserId::new(request.recipient_id)?;
        let listing_id = ListingId::new(request.listing_id)?;

        let length = request.content.chars().count();
        if length > self.config.max_content_chars {
            return Err(InboxDomainError::ContentTooLong {
                max: self.config.max_content_chars,
                actual: length,
            }
            .into());
        }

        let message = Message::new(
            sender_id,
            recipient_id,
            listing_id,
            request.content,
            &*self.clock,
        )?;
        self.repository.store(&message).await?;
        info!(
            message_id = %message.id(),
            sender_id = %message.sender_id(),
            recipient_id = %message.recipient_id(),
            listing_id = %message.listing_id(),
            "message sent"
        );
        Ok(message)
    }

    /// Returns the number of unread messages addressed to the user.
    ///
    /// # Errors
    ///
    /// Returns [`InboxServiceError::Repository`] when the count fails.
    pub async fn unread_total(&self, user_id: &UserId) -> InboxServiceResult<usize> {
        Ok(self.repository.count_unread(user_id).await?)
    }
}
