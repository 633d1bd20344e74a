use crate::acl::{AclRegistry, AuthorizationMethod, ResourcePermission, RoleAcl};
use crate::error::Result;
use crate::setup::SetupContext;

pub const ROLE: &str = "Organization Administrator";

pub fn setup(registry: &mut dyn AclRegistry, _ctx: &SetupContext) -> Result<()> {
    registry.register_role(
        RoleAcl::new(ROLE)
            .method(
                AuthorizationMethod::new("membership.actor_has_role_in_organization")
                    .param("role_name", "Administrator"),
            )
            .resource(
                "Assignment",
                ResourcePermission::new()
                    .create()
                    .read(["assignee", "date_completed", "due_date", "status", "task"])
                    .update(["due_date", "status"]),
            )
            .resource(
                "Organization",
                ResourcePermission::new()
                    .read(["department", "description", "name", "parent", "roles"])
                    .update(["department", "description", "name"]),
            )
            .resource(
                "User",
                ResourcePermission::new()
                    .create()
                    .read(["email", "first_name", "groups", "last_name", "organizations", "status", "username"])
                    .update(["groups", "organizations", "status"]),
            ),
    )
}
