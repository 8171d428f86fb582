//! Diesel schema for direct message persistence.

diesel::table! {
    /// Direct messages between users about a listing.
    messages (id) {
        /// Message identifier.
        id -> Uuid,
        /// Sending user.
        #[max_length = 255]
        sender_id -> Varchar,
        /// Receiving user.
        #[max_length = 255]
        recipient_id -> Varchar,
        /// Listing the message is about.
        #[max_length = 255]
        listing_id -> Varchar,
        /// Message body.
        content -> Text,
        /// Whether the recipient has read the message.
        is_read -> Bool,
        /// Creation timestamp; absent on some imported records.
        created_at -> Nullable<Timestamptz>,
    }
}
