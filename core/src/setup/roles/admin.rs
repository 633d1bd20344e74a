//! Admin: members of the Super Administrators group

use crate::acl::{AclRegistry, ResourcePermission, RoleAcl};
use crate::error::Result;
use crate::setup::SetupContext;
use crate::setup::roles::member_of_group;

pub const ROLE: &str = "Admin";

pub fn setup(registry: &mut dyn AclRegistry, _ctx: &SetupContext) -> Result<()> {
    registry.register_role(
        RoleAcl::new(ROLE)
            .method(member_of_group("Super Administrators"))
            .resource(
                "Address",
                ResourcePermission::full(["country", "label", "locality", "postal_code", "region", "street"]),
            )
            .resource(
                "Assignment",
                ResourcePermission::full(["assignee", "date_completed", "due_date", "status", "task"]),
            )
            .resource(
                "Category",
                ResourcePermission::full(["authorized_approvers", "locked", "managers", "name", "parent"]),
            )
            .resource(
                "Curriculum",
                ResourcePermission::full(["achievements", "name", "organization", "tasks"]),
            )
            .resource(
                "Event",
                ResourcePermission::full([
                    "description",
                    "end",
                    "lead_instructor",
                    "name",
                    "organization",
                    "sessions",
                    "start",
                    "title",
                    "venue",
                ]),
            )
            .resource(
                "Group",
                ResourcePermission::full(["categories", "managers", "name", "users"]),
            )
            .resource(
                "Organization",
                ResourcePermission::full(["department", "description", "name", "parent", "roles"]),
            )
            .resource("Room", ResourcePermission::full(["capacity", "name", "venue"]))
            .resource(
                "Session",
                ResourcePermission::full([
                    "audience",
                    "confirmed",
                    "end",
                    "event",
                    "name",
                    "room",
                    "start",
                    "status",
                    "title",
                ]),
            )
            .resource(
                "SessionUserRole",
                ResourcePermission::full(["name", "session", "users"]),
            )
            .resource(
                "User",
                ResourcePermission::full([
                    "email",
                    "first_name",
                    "groups",
                    "last_name",
                    "organizations",
                    "status",
                    "username",
                ]),
            )
            .resource(
                "Venue",
                ResourcePermission::full(["address", "contact", "name", "region"]),
            )
            .arbitrary_perm("check_usernames")
            .arbitrary_perm("export_reports")
            .arbitrary_perm("regenerate_payment_confirmations"),
    )
}
