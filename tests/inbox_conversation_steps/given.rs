//! Given steps for inbox conversation BDD scenarios.

use super::world::{InboxWorld, run_async};
use chrono::DateTime;
use eyre::WrapErr;
use rental_inbox::inbox::{
    domain::{ListingId, Message, MessageId, PersistedMessageData, UserId},
    ports::MessageRepository,
};
use rstest_bdd_macros::given;

#[given(r#"a {state} message from "{sender}" to "{recipient}" about "{listing}" at {created_at:u64}"#)]
#[given(r#"an {state} message from "{sender}" to "{recipient}" about "{listing}" at {created_at:u64}"#)]
fn stored_message(
    world: &mut InboxWorld,
    state: String,
    sender: String,
    recipient: String,
    listing: String,
    created_at: u64,
) -> Result<(), eyre::Report> {
    let is_read = match state.as_str() {
        "read" => true,
        "unread" => false,
        other => return Err(eyre::eyre!("unknown read state in scenario: {other}")),
    };
    let secs = i64::try_from(created_at).wrap_err("timestamp out of range")?;
    let message = Message::from_persisted(PersistedMessageData {
        id: MessageId::new(),
        sender_id: UserId::new(sender)?,
        recipient_id: UserId::new(recipient)?,
        listing_id: ListingId::new(listing)?,
        content: "Is the flat still available?".to_owned(),
        is_read,
        created_at: Some(
            DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| eyre::eyre!("invalid timestamp {secs}"))?,
        ),
    });
    run_async(world.repo.store(&message)).wrap_err("store scenario message")?;
    Ok(())
}
