//! Rental inbox: direct messaging core for a rental-listing platform.
//!
//! Tenants and landlords exchange messages about listings. This crate turns
//! a user's flat message history into per-counterpart conversations with
//! unread counts, marks conversations read, and persists messages through
//! swappable repositories.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, cache)
//!
//! # Modules
//!
//! - [`inbox`]: Messages, conversation aggregation, and read tracking

pub mod inbox;
