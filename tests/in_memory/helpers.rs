//! Shared test helpers for in-memory inbox integration tests.

use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use rental_inbox::inbox::{
    domain::{Message, UserId},
    ports::MessageRepository,
    services::{InboxService, SendMessageRequest},
};
use rstest::fixture;
use std::io;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Routes service logs to the test writer; honours `RUST_LOG`.
pub fn init_tracing() {
    // Only the first test to get here installs the subscriber.
    let _installed = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .is_ok();
}

/// Clock that advances one second every time it is read.
#[derive(Debug, Default)]
pub struct TickingClock {
    seconds: AtomicI64,
}

impl Clock for TickingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let secs = self.seconds.fetch_add(1, Ordering::SeqCst);
        DateTime::from_timestamp(secs, 0).unwrap_or_default()
    }
}

/// Provides a fresh ticking clock.
#[fixture]
pub fn clock() -> TickingClock {
    TickingClock::default()
}

pub fn user(id: &str) -> UserId {
    UserId::new(id).expect("valid user id")
}

/// Sends a message through the service on the given runtime.
///
/// # Errors
///
/// Returns an error if validation or storage fails.
pub fn send<R, C>(
    rt: &Runtime,
    service: &InboxService<R, C>,
    sender: &str,
    recipient: &str,
    listing: &str,
    content: &str,
) -> Result<Message, Box<dyn std::error::Error + Send + Sync>>
where
    R: MessageRepository,
    C: Clock + Send + Sync,
{
    let request = SendMessageRequest::new(sender, recipient, listing, content);
    Ok(rt.block_on(service.send_message(request))?)
}

/// Sends the landlord thread used across tests.
///
/// `tenant-1` asks about `flat-42`, the landlord replies, then `tenant-2`
/// asks about `loft-7`.
///
/// # Errors
///
/// Returns an error if any send fails.
pub fn send_landlord_thread<R, C>(
    rt: &Runtime,
    service: &InboxService<R, C>,
) -> Result<Vec<Message>, Box<dyn std::error::Error + Send + Sync>>
where
    R: MessageRepository,
    C: Clock + Send + Sync,
{
    Ok(vec![
        send(rt, service, "tenant-1", "landlord", "flat-42", "Is the flat still available?")?,
        send(rt, service, "landlord", "tenant-1", "flat-42", "Yes, viewings on Friday.")?,
        send(rt, service, "tenant-2", "landlord", "loft-7", "Are pets allowed?")?,
    ])
}
