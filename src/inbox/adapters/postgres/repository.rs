//! `PostgreSQL` repository implementation for direct messages.

use super::{
    models::{MessageRow, NewMessageRow},
    schema::messages,
};
use crate::inbox::{
    domain::{ListingId, Message, MessageId, PersistedMessageData, UserId},
    ports::{MessageRepository, MessageRepositoryError, MessageRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by inbox adapters.
pub type InboxPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed message repository.
///
/// All Diesel calls run on the blocking thread pool via
/// [`tokio::task::spawn_blocking`].
///
/// # Example
///
/// ```ignore
/// use diesel::r2d2::{ConnectionManager, Pool};
/// use diesel::PgConnection;
/// use rental_inbox::inbox::adapters::postgres::PostgresMessageRepository;
///
/// let manager = ConnectionManager::<PgConnection>::new("postgres://...");
/// let pool = Pool::builder().build(manager).expect("pool");
/// let repo = PostgresMessageRepository::new(pool);
/// ```
#[derive(Debug, Clone)]
pub struct PostgresMessageRepository {
    pool: InboxPgPool,
}

impl PostgresMessageRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: InboxPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> MessageRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> MessageRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(MessageRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(MessageRepositoryError::persistence)?
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn store(&self, message: &Message) -> MessageRepositoryResult<()> {
        let message_id = message.id();
        let new_row = to_new_row(message);

        self.run_blocking(move |connection| {
            diesel::insert_into(messages::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        MessageRepositoryError::DuplicateMessage(message_id)
                    }
                    _ => MessageRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: MessageId) -> MessageRepositoryResult<Option<Message>> {
        self.run_blocking(move |connection| {
            let row = messages::table
                .filter(messages::id.eq(id.into_inner()))
                .select(MessageRow::as_select())
                .first::<MessageRow>(connection)
                .optional()
                .map_err(MessageRepositoryError::persistence)?;
            row.map(row_to_message).transpose()
        })
        .await
    }

    async fn find_for_participant(
        &self,
        user_id: &UserId,
    ) -> MessageRepositoryResult<Vec<Message>> {
        let participant = user_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = messages::table
                .filter(
                    messages::sender_id
                        .eq(&participant)
                        .or(messages::recipient_id.eq(&participant)),
                )
                .order((messages::created_at.asc(), messages::id.asc()))
                .select(MessageRow::as_select())
                .load::<MessageRow>(connection)
                .map_err(MessageRepositoryError::persistence)?;
            rows.into_iter().map(row_to_message).collect()
        })
        .await
    }

    async fn mark_read(
        &self,
        recipient_id: &UserId,
        sender_id: &UserId,
    ) -> MessageRepositoryResult<usize> {
        let recipient = recipient_id.as_str().to_owned();
        let sender = sender_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            // Single guarded statement; concurrent callers cannot both count a row.
            diesel::update(
                messages::table
                    .filter(messages::recipient_id.eq(&recipient))
                    .filter(messages::sender_id.eq(&sender))
                    .filter(messages::is_read.eq(false)),
            )
            .set(messages::is_read.eq(true))
            .execute(connection)
            .map_err(MessageRepositoryError::persistence)
        })
        .await
    }

    async fn count_unread(&self, user_id: &UserId) -> MessageRepositoryResult<usize> {
        let recipient = user_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let count: i64 = messages::table
                .filter(messages::recipient_id.eq(&recipient))
                .filter(messages::is_read.eq(false))
                .count()
                .get_result(connection)
                .map_err(MessageRepositoryError::persistence)?;
            usize::try_from(count).map_err(MessageRepositoryError::persistence)
        })
        .await
    }
}

pub(super) fn to_new_row(message: &Message) -> NewMessageRow {
    NewMessageRow {
        id: message.id().into_inner(),
        sender_id: message.sender_id().as_str().to_owned(),
        recipient_id: message.recipient_id().as_str().to_owned(),
        listing_id: message.listing_id().as_str().to_owned(),
        content: message.content().to_owned(),
        is_read: message.is_read(),
        created_at: message.created_at(),
    }
}

pub(super) fn row_to_message(row: MessageRow) -> MessageRepositoryResult<Message> {
    let MessageRow {
        id,
        sender_id,
        recipient_id,
        listing_id,
        content,
        is_read,
        created_at,
    } = row;

    let data = PersistedMessageData {
        id: MessageId::from_uuid(id),
        sender_id: UserId::new(sender_id).map_err(MessageRepositoryError::persistence)?,
        recipient_id: UserId::new(recipient_id).map_err(MessageRepositoryError::persistence)?,
        listing_id: ListingId::new(listing_id).map_err(MessageRepositoryError::persistence)?,
        content,
        is_read,
        created_at,
    };
    Ok(Message::from_persisted(data))
}
