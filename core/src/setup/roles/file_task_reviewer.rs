//! File Task Reviewer, installed with the `file_tasks` feature

use crate::acl::{AclRegistry, ResourcePermission, RoleAcl};
use crate::error::Result;
use crate::setup::roles::member_of_group;
use crate::setup::{FEATURE_FILE_TASKS, SetupContext};

pub const ROLE: &str = "File Task Reviewer";

pub fn setup(registry: &mut dyn AclRegistry, ctx: &SetupContext) -> Result<()> {
    if !ctx.features.contains(FEATURE_FILE_TASKS) {
        return Ok(());
    }

    registry.register_role(
        RoleAcl::new(ROLE)
            .method(member_of_group("File Task Reviewers"))
            .resource(
                "FileUpload",
                ResourcePermission::new().read(["description", "name", "organization"]),
            )
            .resource(
                "FileUploadAttempt",
                ResourcePermission::new()
                    .read(["assignment", "date_completed", "date_started", "deliverable", "file_upload"])
                    .update(["approved", "reviewer_comments"]),
            ),
    )
}
