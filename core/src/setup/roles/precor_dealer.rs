use crate::acl::{AclRegistry, ResourcePermission, RoleAcl};
use crate::error::Result;
use crate::setup::SetupContext;
use crate::setup::roles::member_of_group;

pub const ROLE: &str = "Dealer";

pub fn setup(registry: &mut dyn AclRegistry, _ctx: &SetupContext) -> Result<()> {
    registry.register_role(
        RoleAcl::new(ROLE)
            .method(member_of_group("Dealers"))
            .resource(
                "Assignment",
                ResourcePermission::new()
                    .create()
                    .read(["assignee", "date_completed", "due_date", "status", "task"]),
            )
            .resource(
                "Curriculum",
                ResourcePermission::new().read(["achievements", "name", "organization", "tasks"]),
            )
            .resource(
                "Organization",
                ResourcePermission::new().read(["description", "name", "parent"]),
            )
            .resource(
                "User",
                ResourcePermission::new()
                    .create()
                    .read(["email", "first_name", "last_name", "organizations", "status", "username"])
                    .update(["email", "first_name", "last_name"]),
            ),
    )
}
