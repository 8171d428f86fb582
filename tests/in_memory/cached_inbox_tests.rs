//! Inbox flows through [`CachingMessageRepository`].

use crate::in_memory::helpers::{
    TickingClock, clock, init_tracing, runtime, send, send_landlord_thread, user,
};
use rental_inbox::inbox::{
    adapters::{cache::CachingMessageRepository, memory::InMemoryMessageRepository},
    config::InboxConfig,
    services::InboxService,
};
use rstest::rstest;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

type CachedService =
    InboxService<CachingMessageRepository<InMemoryMessageRepository, TickingClock>, TickingClock>;

fn cached_service(clock: TickingClock) -> CachedService {
    init_tracing();
    let shared_clock = Arc::new(clock);
    let config = InboxConfig::default();
    let repository = CachingMessageRepository::from_config(
        InMemoryMessageRepository::new(),
        Arc::clone(&shared_clock),
        &config,
    );
    InboxService::with_config(Arc::new(repository), shared_clock, config)
}

/// Sends through the service are visible on the next listing.
#[rstest]
fn sends_invalidate_cached_listings(
    runtime: io::Result<Runtime>,
    clock: TickingClock,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let rt = runtime?;
    let service = cached_service(clock);
    send_landlord_thread(&rt, &service)?;
    let before = rt.block_on(service.list_conversations(&user("landlord")))?;

    send(&rt, &service, "tenant-3", "landlord", "flat-42", "Still available?")?;
    let after = rt.block_on(service.list_conversations(&user("landlord")))?;

    assert_eq!(before.conversations().len(), 2);
    assert_eq!(after.conversations().len(), 3);
    assert_eq!(
        after
            .conversations()
            .first()
            .map(|conversation| conversation.counterpart_id().as_str()),
        Some("tenant-3")
    );
    Ok(())
}

/// Read marking through the service is visible on the next listing.
#[rstest]
fn mark_read_invalidates_cached_listings(
    runtime: io::Result<Runtime>,
    clock: TickingClock,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let rt = runtime?;
    let service = cached_service(clock);
    send_landlord_thread(&rt, &service)?;
    let before = rt.block_on(service.list_conversations(&user("landlord")))?;

    rt.block_on(service.mark_conversation_read(&user("landlord"), &user("tenant-2")))?;
    let after = rt.block_on(service.list_conversations(&user("landlord")))?;

    assert_eq!(before.total_unread(), 2);
    assert_eq!(after.total_unread(), 1);
    Ok(())
}
