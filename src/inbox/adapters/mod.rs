//! Adapter implementations of the inbox ports.
//!
//! - [`memory::InMemoryMessageRepository`]: thread-safe in-memory storage
//! - [`postgres::PostgresMessageRepository`]: `PostgreSQL` persistence using
//!   Diesel
//! - [`cache::CachingMessageRepository`]: time-bounded fetch cache in front
//!   of either

pub mod cache;
pub mod memory;
pub mod postgres;
