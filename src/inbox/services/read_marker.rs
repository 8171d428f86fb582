//! In-memory read-state transition for one conversation.

use crate::inbox::domain::{Message, UserId};

/// Marks every unread message from `counterpart_id` to `user_id` as read.
///
/// Messages sent by `user_id`, and messages exchanged with anyone else, are
/// left untouched. Returns the number of messages that transitioned, so a
/// second call with no new messages returns zero.
///
/// # Examples
///
/// ```
/// use rental_inbox::inbox::domain::{ListingId, Message, UserId};
/// use rental_inbox::inbox::services::mark_conversation_read;
/// use mockable::DefaultClock;
///
/// let me = UserId::new("u1").expect("valid id");
/// let other = UserId::new("u2").expect("valid id");
/// let listing = ListingId::new("L1").expect("valid id");
/// let mut messages = vec![
///     Message::new(other.clone(), me.clone(), listing, "Hi", &DefaultClock)
///         .expect("valid message"),
/// ];
///
/// assert_eq!(mark_conversation_read(&mut messages, &me, &other), 1);
/// assert_eq!(mark_conversation_read(&mut messages, &me, &other), 0);
/// ```
pub fn mark_conversation_read(
    messages: &mut [Message],
    user_id: &UserId,
    counterpart_id: &UserId,
) -> usize {
    messages
        .iter_mut()
        .filter(|message| {
            message.recipient_id() == user_id && message.sender_id() == counterpart_id
        })
        .map(Message::mark_read)
        .filter(|transitioned| *transitioned)
        .count()
}
