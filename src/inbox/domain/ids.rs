//! Identifier newtypes for messages, users, and listings.
//!
//! Message identifiers are UUIDs minted by this crate. User and listing
//! identifiers are opaque strings issued by the account and listing stores,
//! so they are only normalized (trimmed) and checked for emptiness and for
//! the [`MAX_ID_CHARS`] column limit.

use super::InboxDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Maximum length, in characters, of a user or listing identifier.
pub const MAX_ID_CHARS: usize = 255;

/// Unique identifier for a direct message.
///
/// # Examples
///
/// ```
/// use rental_inbox::inbox::domain::MessageId;
///
/// let id = MessageId::new();
/// assert!(!id.as_ref().is_nil());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Creates a new random message identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a message identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for MessageId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a platform user (tenant or landlord).
///
/// # Examples
///
/// ```
/// use rental_inbox::inbox::domain::UserId;
///
/// let id = UserId::new("  u1 ").expect("valid user id");
/// assert_eq!(id.as_str(), "u1");
/// assert!(UserId::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Creates a validated user identifier.
    ///
    /// # Errors
    ///
    /// Returns [`InboxDomainError::EmptyUserId`] when the value is blank, or
    /// [`InboxDomainError::IdentifierTooLong`] when it exceeds
    /// [`MAX_ID_CHARS`].
    pub fn new(value: impl Into<String>) -> Result<Self, InboxDomainError> {
        normalized(value.into(), InboxDomainError::EmptyUserId).map(Self)
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = InboxDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the rental listing a message is about.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ListingId(String);

impl ListingId {
    /// Creates a validated listing identifier.
    ///
    /// # Errors
    ///
    /// Returns [`InboxDomainError::EmptyListingId`] when the value is blank,
    /// or [`InboxDomainError::IdentifierTooLong`] when it exceeds
    /// [`MAX_ID_CHARS`].
    pub fn new(value: impl Into<String>) -> Result<Self, InboxDomainError> {
        normalized(value.into(), InboxDomainError::EmptyListingId).map(Self)
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ListingId {
    type Error = InboxDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ListingId> for String {
    fn from(value: ListingId) -> Self {
        value.0
    }
}

impl AsRef<str> for ListingId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn normalized(raw: String, empty: InboxDomainError) -> Result<String, InboxDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(empty);
    }
    let length = trimmed.chars().count();
    if length > MAX_ID_CHARS {
        return Err(InboxDomainError::IdentifierTooLong {
            max: MAX_ID_CHARS,
            actual: length,
        });
    }
    if trimmed.len() == raw.len() {
        return Ok(raw);
    }
    Ok(trimmed.to_owned())
}
