//! Shared test helpers for `PostgreSQL` integration tests.

use chrono::DateTime;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use pg_embedded_setup_unpriv::TestCluster;
use rental_inbox::inbox::{
    adapters::postgres::PostgresMessageRepository,
    domain::{ListingId, Message, MessageId, PersistedMessageData, UserId},
};
use tokio::runtime::Runtime;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// SQL creating the `messages` table and its indexes.
pub const CREATE_MESSAGES_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_messages/up.sql");

/// Template database name for pre-migrated schema.
pub const TEMPLATE_DB: &str = "rental_inbox_test_template";

/// Creates a tokio runtime for async operations in tests.
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Ensures the template database exists with the schema applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_MESSAGES_SQL)
                .map_err(|e| eyre::eyre!("migration failed: {e}"))?;
            Ok(())
        })
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(())
}

/// Creates a test database from the template and returns a repository on it.
///
/// # Errors
///
/// Returns an error if database creation or pool construction fails.
pub fn setup_repository(
    cluster: &TestCluster,
    db_name: &str,
    pool_size: u32,
) -> Result<PostgresMessageRepository, BoxError> {
    cluster
        .create_database_from_template(db_name, TEMPLATE_DB)
        .map_err(|e| Box::new(e) as BoxError)?;
    let url = cluster.connection().database_url(db_name);
    let manager = ConnectionManager::<PgConnection>::new(url);
    let pool = Pool::builder()
        .max_size(pool_size)
        .build(manager)
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(PostgresMessageRepository::new(pool))
}

/// Drops the test database when the test ends, even on panic.
pub struct CleanupGuard<'a> {
    cluster: &'a TestCluster,
    db_name: String,
}

impl<'a> CleanupGuard<'a> {
    pub const fn new(cluster: &'a TestCluster, db_name: String) -> Self {
        Self { cluster, db_name }
    }
}

impl Drop for CleanupGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.cluster.drop_database(self.db_name.as_str()) {
            tracing::warn!(db_name = %self.db_name, error = %err, "failed to drop test database");
        }
    }
}

/// Unique database name for one test.
pub fn database_name(prefix: &str) -> String {
    format!("{prefix}_{}", uuid::Uuid::new_v4().simple())
}

pub fn user(id: &str) -> UserId {
    UserId::new(id).expect("valid user id")
}

/// Builds a persisted-shape message with an explicit timestamp.
///
/// Bypasses [`Message::new`] so tests control ordering and read state.
pub fn message(sender: &str, recipient: &str, is_read: bool, at: i64) -> Message {
    Message::from_persisted(PersistedMessageData {
        id: MessageId::new(),
        sender_id: user(sender),
        recipient_id: user(recipient),
        listing_id: ListingId::new("flat-42").expect("valid listing id"),
        content: format!("{sender} to {recipient} at {at}"),
        is_read,
        created_at: DateTime::from_timestamp(at, 0),
    })
}
