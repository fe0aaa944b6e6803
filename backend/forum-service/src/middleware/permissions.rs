/// Authorization module for forum-service
///
/// A single ownership predicate gates every update and delete: the actor must
/// own the resource or hold the admin role.
use crate::error::{AppError, Result};
use crate::models::{Actor, CommentRecord, PostRecord};

/// Resource with a single owning user.
pub trait Owned {
    /// Human-readable resource kind used in error messages.
    const KIND: &'static str;

    fn id(&self) -> i64;

    fn owner_id(&self) -> i64;
}

impl Owned for PostRecord {
    const KIND: &'static str = "post";

    fn id(&self) -> i64 {
        self.id
    }

    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

impl Owned for CommentRecord {
    const KIND: &'static str = "comment";

    fn id(&self) -> i64 {
        self.id
    }

    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

/// True when `actor` owns the resource or is an admin.
pub fn is_owner_or_admin(actor: &Actor, owner_id: i64) -> bool {
    actor.id == owner_id || actor.is_admin()
}

/// `Forbidden` unless [`is_owner_or_admin`] holds for `resource`.
pub fn check_ownership<R: Owned>(actor: &Actor, resource: &R) -> Result<()> {
    if is_owner_or_admin(actor, resource.owner_id()) {
        Ok(())
    } else {
        tracing::warn!(
            actor_id = actor.id,
            resource = R::KIND,
            resource_id = resource.id(),
            owner_id = resource.owner_id(),
            "Ownership check failed"
        );
        Err(AppError::Forbidden(format!(
            "You don't have permission to modify this {}",
            R::KIND
        )))
    }
}
