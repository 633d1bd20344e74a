//! Regional Manager: dealers flagged as managing a region

use crate::acl::{AclRegistry, AuthorizationMethod, ResourcePermission, RoleAcl};
use crate::error::Result;
use crate::setup::SetupContext;
use crate::setup::roles::member_of_group;

pub const ROLE: &str = "Regional Manager";

pub fn setup(registry: &mut dyn AclRegistry, _ctx: &SetupContext) -> Result<()> {
    registry.register_role(
        RoleAcl::new(ROLE)
            .method(member_of_group("Regional Managers"))
            .method(
                AuthorizationMethod::new("general.actor_attribute_matches")
                    .param("attribute", "is_regional_manager")
                    .param("value", true),
            )
            .resource(
                "Assignment",
                ResourcePermission::new()
                    .read(["assignee", "date_completed", "due_date", "status", "task"])
                    .delete(),
            )
            .resource(
                "Curriculum",
                ResourcePermission::new().read(["achievements", "name", "organization", "tasks"]),
            )
            .resource(
                "CurriculumEnrollment",
                ResourcePermission::new()
                    .create()
                    .read(["curriculum", "end", "start", "users"])
                    .update(["end", "start", "users"]),
            )
            .resource(
                "Organization",
                ResourcePermission::new()
                    .read(["description", "name", "parent"])
                    .update(["description"]),
            )
            .resource(
                "User",
                ResourcePermission::new()
                    .read(["email", "first_name", "last_name", "organizations", "status", "username"])
                    .update(["organizations", "status"]),
            ),
    )
}
