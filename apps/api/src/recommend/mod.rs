pub mod handlers;
pub mod interests;

use uuid::Uuid;

/// Cache key for a user's interest profile.
pub(crate) fn profile_key(user_id: Uuid) -> String {
    format!("profile-{user_id}")
}

/// Cache key for one recommendation page.
pub(crate) fn recommendations_key(user_id: Uuid, page: u32, per_page: u32) -> String {
    format!("{user_id}-p{page}-n{per_page}")
}

/// Prefix matching every recommendation page cached for a user.
pub(crate) fn user_prefix(user_id: Uuid) -> String {
    format!("{user_id}-")
}
