//! The authenticated identity performing an administrative action.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Identity resolved from a valid session.
///
/// The moderation workflow trusts an `Actor` as proof of authentication and
/// performs no role checks of its own; `role` is carried for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: DbId,
    pub username: String,
    pub role: String,
}

impl Actor {
    pub fn new(user_id: DbId, username: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            role: role.into(),
        }
    }
}
