//! Authorization engine - who may delete what.
//!
//! Deletion is the only operation with real authorization logic: everything
//! else gates on "a requester was resolved at all". The rule is an OR across
//! ownership and the two elevated roles, never a conjunction.

use uuid::Uuid;

use crate::domain::{ROLE_STAFF, ROLE_SUPERUSER};

/// The resolved authenticated requester.
///
/// Anonymous requests never produce a `Requester`; they are rejected with
/// 401 before any handler logic runs.
#[derive(Debug, Clone)]
pub struct Requester {
    pub id: Uuid,
    pub username: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl Requester {
    /// Build a requester from token role names.
    pub fn from_roles(id: Uuid, username: String, roles: &[String]) -> Self {
        Self {
            id,
            username,
            is_staff: roles.iter().any(|r| r == ROLE_STAFF),
            is_superuser: roles.iter().any(|r| r == ROLE_SUPERUSER),
        }
    }

    /// Whether this requester may delete a resource owned by `author_id`.
    ///
    /// Any one of {is author, is superuser, is staff} allows; the roles are
    /// override paths for moderation, independent of ownership.
    pub fn may_delete(&self, author_id: Uuid) -> bool {
        self.id == author_id || self.is_superuser || self.is_staff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requester(is_staff: bool, is_superuser: bool) -> Requester {
        Requester {
            id: Uuid::new_v4(),
            username: "someone".to_string(),
            is_staff,
            is_superuser,
        }
    }

    #[test]
    fn test_author_may_delete_own_resource() {
        let req = requester(false, false);
        assert!(req.may_delete(req.id));
    }

    #[test]
    fn test_plain_user_may_not_delete_foreign_resource() {
        let req = requester(false, false);
        assert!(!req.may_delete(Uuid::new_v4()));
    }

    #[test]
    fn test_staff_alone_may_delete_foreign_resource() {
        let req = requester(true, false);
        assert!(req.may_delete(Uuid::new_v4()));
    }

    #[test]
    fn test_superuser_alone_may_delete_foreign_resource() {
        let req = requester(false, true);
        assert!(req.may_delete(Uuid::new_v4()));
    }

    #[test]
    fn test_from_roles_maps_role_names() {
        let id = Uuid::new_v4();
        let roles = vec!["staff".to_string()];
        let req = Requester::from_roles(id, "mod".to_string(), &roles);
        assert!(req.is_staff);
        assert!(!req.is_superuser);
    }
}
