//! Category Manager: users listed as managers of a category

use crate::acl::{AclRegistry, ResourcePermission, RoleAcl};
use crate::error::Result;
use crate::setup::SetupContext;

pub const ROLE: &str = "Category Manager";

pub fn setup(registry: &mut dyn AclRegistry, _ctx: &SetupContext) -> Result<()> {
    registry.register_role(
        RoleAcl::new(ROLE)
            .method("category.actor_is_category_manager")
            .resource(
                "Category",
                ResourcePermission::new()
                    .read(["authorized_approvers", "locked", "managers", "name", "parent"])
                    .update(["authorized_approvers", "locked", "name"]),
            )
            .resource(
                "Event",
                ResourcePermission::full(["description", "end", "name", "start", "title", "venue"]),
            )
            .resource(
                "Session",
                ResourcePermission::full(["end", "event", "name", "room", "start", "status", "title"]),
            ),
    )
}
