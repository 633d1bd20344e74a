use crate::acl::{AclRegistry, ResourcePermission, RoleAcl};
use crate::error::Result;
use crate::setup::SetupContext;

pub const ROLE: &str = "Authenticated User";

pub fn setup(registry: &mut dyn AclRegistry, _ctx: &SetupContext) -> Result<()> {
    registry.register_role(
        RoleAcl::new(ROLE)
            .method("general.actor_is_authenticated")
            .resource("Assignment", ResourcePermission::new().create())
            .resource(
                "Curriculum",
                ResourcePermission::new().read(["achievements", "name", "tasks"]),
            )
            .resource(
                "Organization",
                ResourcePermission::new().read(["description", "name", "parent"]),
            )
            .resource("Room", ResourcePermission::new().read(["capacity", "name", "venue"]))
            .resource(
                "Session",
                ResourcePermission::new().read([
                    "audience", "confirmed", "end", "event", "name", "room", "start", "status", "title",
                ]),
            )
            .resource(
                "Venue",
                ResourcePermission::new().read(["address", "contact", "name", "region"]),
            ),
    )
}
