//! Direct messaging between tenants and landlords.
//!
//! Messages are stored flat; conversations are derived on every read by
//! grouping a user's messages per counterpart, counting unread messages, and
//! tracking the most recent message. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Aggregation and orchestration in [`services`]
//! - Tunables in [`config`]
//!
//! # Example
//!
//! ```
//! use rental_inbox::inbox::domain::{ListingId, Message, UserId};
//! use rental_inbox::inbox::services::{group_into_conversations, sort_by_recency};
//! use mockable::DefaultClock;
//!
//! let tenant = UserId::new("tenant-1").expect("valid id");
//! let landlord = UserId::new("landlord-1").expect("valid id");
//! let listing = ListingId::new("loft-7").expect("valid id");
//!
//! let messages = vec![
//!     Message::new(tenant.clone(), landlord.clone(), listing.clone(), "Viewing on Friday?", &DefaultClock)
//!         .expect("valid message"),
//!     Message::new(landlord.clone(), tenant.clone(), listing, "Friday works.", &DefaultClock)
//!         .expect("valid message"),
//! ];
//!
//! let mut conversations = group_into_conversations(messages, &tenant).expect("all messages involve tenant");
//! sort_by_recency(&mut conversations);
//! assert_eq!(conversations.len(), 1);
//! assert_eq!(conversations[0].unread_count(), 1);
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;
