use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Role name carried in token claims for staff users.
pub const ROLE_STAFF: &str = "staff";
/// Role name carried in token claims for superusers.
pub const ROLE_SUPERUSER: &str = "superuser";

/// User entity - a registered author.
///
/// The password is held only as an Argon2 hash; no plaintext ever reaches
/// this type and no output representation includes the hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new regular user with generated ID and timestamps.
    ///
    /// Privilege flags start false; elevation is an operator action, not an
    /// API operation.
    pub fn new(username: String, email: Option<String>, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            is_staff: false,
            is_superuser: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Role names for token claims, derived from the privilege flags.
    pub fn roles(&self) -> Vec<String> {
        let mut roles = Vec::new();
        if self.is_staff {
            roles.push(ROLE_STAFF.to_string());
        }
        if self.is_superuser {
            roles.push(ROLE_SUPERUSER.to_string());
        }
        roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_has_no_privileges() {
        let user = User::new("jane".to_string(), None, "hash".to_string());
        assert!(!user.is_staff);
        assert!(!user.is_superuser);
        assert!(user.roles().is_empty());
    }

    #[test]
    fn test_roles_reflect_flags() {
        let mut user = User::new("mod".to_string(), None, "hash".to_string());
        user.is_staff = true;
        user.is_superuser = true;
        assert_eq!(user.roles(), vec!["staff".to_string(), "superuser".to_string()]);
    }
}
