//! User accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// Unique login name.
    pub username: String,

    /// bcrypt hash of the password, salt included.
    pub password_hash: String,

    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
