//! Diesel row models for message persistence.

use super::schema::messages;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for message records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MessageRow {
    /// Message identifier.
    pub id: uuid::Uuid,
    /// Sending user.
    pub sender_id: String,
    /// Receiving user.
    pub recipient_id: String,
    /// Listing reference.
    pub listing_id: String,
    /// Message body.
    pub content: String,
    /// Read flag.
    pub is_read: bool,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert model for message records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = messages)]
pub struct NewMessageRow {
    /// Message identifier.
    pub id: uuid::Uuid,
    /// Sending user.
    pub sender_id: String,
    /// Receiving user.
    pub recipient_id: String,
    /// Listing reference.
    pub listing_id: String,
    /// Message body.
    pub content: String,
    /// Read flag.
    pub is_read: bool,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
}
