/// User model
///
/// Users are created once at registration and are immutable afterwards.
/// Passwords are stored as Argon2id hashes, never in plaintext, and the
/// hash never leaves the store: API responses carry a [`UserSummary`].
///
/// # Example
///
/// ```
/// use taskflow_shared::models::user::User;
/// use chrono::Utc;
///
/// let user = User {
///     id: 1,
///     name: "Alice".to_string(),
///     email: "alice@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     created_at: Utc::now(),
/// };
///
/// let summary = user.summary();
/// assert_eq!(summary.email, "alice@example.com");
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account record as held by the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID, assigned monotonically by the store
    pub id: u64,

    /// Display name
    pub name: String,

    /// Email address (unique, matched case-sensitively as stored)
    pub email: String,

    /// Argon2id password hash
    ///
    /// Never store plaintext passwords!
    pub password_hash: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// API-facing view of a user
///
/// Carries everything a client may see about an account. The password hash
/// is deliberately absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    /// Unique user ID
    pub id: u64,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Returns the API-facing view of this user
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}
