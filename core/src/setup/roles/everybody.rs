//! Everybody, including anonymous visitors

use crate::acl::{AclRegistry, ResourcePermission, RoleAcl};
use crate::error::Result;
use crate::setup::SetupContext;

pub const ROLE: &str = "Everybody";

pub fn setup(registry: &mut dyn AclRegistry, _ctx: &SetupContext) -> Result<()> {
    registry.register_role(
        RoleAcl::new(ROLE)
            .method("general.actor_is_anybody")
            .resource("Category", ResourcePermission::new().read(["name", "parent"]))
            .resource(
                "Event",
                ResourcePermission::new().read(["description", "end", "name", "start", "title", "venue"]),
            )
            .resource(
                "Session",
                ResourcePermission::new().read(["end", "event", "name", "start", "status", "title"]),
            )
            // self-registration
            .resource("User", ResourcePermission::new().create())
            .resource("Venue", ResourcePermission::new().read(["name", "region"]))
            .arbitrary_perm("check_usernames"),
    )
}
