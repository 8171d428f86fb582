//! Inbox service flows backed by `PostgreSQL`.

use crate::postgres::helpers::{
    CleanupGuard, database_name, ensure_template, message, setup_repository, test_runtime, user,
};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rental_inbox::inbox::{
    ports::MessageRepository,
    services::{InboxService, SendMessageRequest},
};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
fn listing_groups_stored_messages_by_counterpart(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = database_name("inbox_listing");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo =
        Arc::new(setup_repository(shared_test_cluster, &db_name, 1).expect("repository setup"));
    let rt = test_runtime();

    for stored in [
        message("u1", "u2", true, 1),
        message("u2", "u1", false, 3),
        message("u3", "u1", false, 2),
    ] {
        rt.block_on(repo.store(&stored)).expect("store succeeds");
    }
    let service = InboxService::new(Arc::clone(&repo), Arc::new(DefaultClock));

    let view = rt
        .block_on(service.list_conversations(&user("u1")))
        .expect("listing succeeds");

    let order: Vec<&str> = view
        .conversations()
        .iter()
        .map(|conversation| conversation.counterpart_id().as_str())
        .collect();
    assert_eq!(order, vec!["u2", "u3"]);
    assert_eq!(view.total_unread(), 2);
    assert!(view.skipped().is_empty());
}

#[rstest]
fn mark_conversation_read_persists_across_listings(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = database_name("inbox_read");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo =
        Arc::new(setup_repository(shared_test_cluster, &db_name, 1).expect("repository setup"));
    let rt = test_runtime();
    let service = InboxService::new(Arc::clone(&repo), Arc::new(DefaultClock));

    for (sender, recipient) in [("tenant-1", "landlord"), ("tenant-2", "landlord")] {
        rt.block_on(service.send_message(SendMessageRequest::new(
            sender,
            recipient,
            "flat-42",
            "Is the flat still available?",
        )))
        .expect("send succeeds");
    }

    let transitioned = rt
        .block_on(service.mark_conversation_read(&user("landlord"), &user("tenant-1")))
        .expect("mark read succeeds");
    let repeated = rt
        .block_on(service.mark_conversation_read(&user("landlord"), &user("tenant-1")))
        .expect("mark read succeeds");
    let view = rt
        .block_on(service.list_conversations(&user("landlord")))
        .expect("listing succeeds");

    assert_eq!(transitioned, 1);
    assert_eq!(repeated, 0);
    assert_eq!(
        view.conversation_with(&user("tenant-1"))
            .map(|conversation| conversation.has_unread()),
        Some(false)
    );
    assert_eq!(
        rt.block_on(service.unread_total(&user("landlord")))
            .expect("count succeeds"),
        1
    );
}
