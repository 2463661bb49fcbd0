//! User Entity
//!
//! Created on registration, immutable afterwards.

use chrono::{DateTime, SubsecRound, Utc};
use platform::password::HashedPassword;

use crate::domain::value_object::{email::Email, user_id::UserId, username::Username};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier (token subject)
    pub user_id: UserId,
    /// Display name
    pub username: Username,
    /// Login identifier (unique, lowercased)
    pub email: Email,
    /// Argon2id PHC string
    pub password_hash: HashedPassword,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(username: Username, email: Email, password_hash: HashedPassword) -> Self {
        Self {
            user_id: UserId::new(),
            username,
            email,
            password_hash,
            // PostgreSQL keeps microseconds
            created_at: Utc::now().trunc_subsecs(6),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_at_is_whole_microseconds() {
        let user = User::new(
            Username::from_stored("alice"),
            Email::from_stored("alice@example.com"),
            HashedPassword::from_stored("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"),
        );
        assert_eq!(user.created_at.timestamp_subsec_nanos() % 1_000, 0);
    }
}
