use crate::acl::{AclRegistry, ResourcePermission, RoleAcl};
use crate::error::Result;
use crate::setup::SetupContext;

pub const ROLE: &str = "Instructor";

pub fn setup(registry: &mut dyn AclRegistry, _ctx: &SetupContext) -> Result<()> {
    registry.register_role(
        RoleAcl::new(ROLE)
            .method("session.actor_is_session_instructor")
            .resource(
                "Assignment",
                ResourcePermission::new()
                    .read(["assignee", "date_completed", "due_date", "status", "task"])
                    .update(["status"]),
            )
            .resource(
                "Session",
                ResourcePermission::new()
                    .read(["audience", "confirmed", "end", "event", "name", "room", "start", "status", "title"])
                    .update(["confirmed", "status"]),
            )
            .resource(
                "SessionUserRole",
                ResourcePermission::new().read(["name", "session", "users"]),
            ),
    )
}
