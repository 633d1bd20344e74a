use crate::acl::{AclRegistry, ResourcePermission, RoleAcl};
use crate::error::Result;
use crate::setup::SetupContext;
use crate::setup::roles::member_of_group;

pub const ROLE: &str = "Instructor Manager";

pub fn setup(registry: &mut dyn AclRegistry, _ctx: &SetupContext) -> Result<()> {
    registry.register_role(
        RoleAcl::new(ROLE)
            .method(member_of_group("Instructor Managers"))
            .resource(
                "Event",
                ResourcePermission::new()
                    .create()
                    .read(["description", "end", "lead_instructor", "name", "sessions", "start", "title", "venue"])
                    .update(["description", "end", "lead_instructor", "start", "title"]),
            )
            .resource(
                "Session",
                ResourcePermission::full([
                    "audience", "confirmed", "end", "event", "name", "room", "start", "status", "title",
                ]),
            )
            .resource(
                "SessionUserRole",
                ResourcePermission::full(["name", "session", "users"]),
            ),
    )
}
