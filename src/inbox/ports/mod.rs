//! Port contracts for the rental inbox.
//!
//! Ports define infrastructure-agnostic interfaces used by inbox services.

pub mod repository;

pub use repository::{MessageRepository, MessageRepositoryError, MessageRepositoryResult};
