//! Object Owner: grants a user access to the objects they own.
//!
//! The base ACL covers addresses, assignments, exam sessions and the user's
//! own account. Installing `video` adds video sessions; installing
//! `file_tasks` adds download and upload attempts.

use crate::acl::{AclRegistry, ResourcePermission, RoleAcl};
use crate::error::Result;
use crate::setup::{FEATURE_FILE_TASKS, FEATURE_VIDEO, SetupContext};

pub const ROLE: &str = "Object Owner";

pub fn setup(registry: &mut dyn AclRegistry, ctx: &SetupContext) -> Result<()> {
    let mut acl = RoleAcl::new(ROLE)
        .method("ownership.actor_owns_address")
        .method("ownership.actor_owns_assignment")
        .method("ownership.actor_owns_exam_session")
        .method("ownership.actor_owns_user")
        .resource(
            "Address",
            ResourcePermission::full(["country", "label", "locality", "postal_code", "region", "street"]),
        )
        .resource(
            "Assignment",
            ResourcePermission::new()
                .read(["assignee", "date_completed", "due_date", "status", "task"])
                .update(["status"]),
        )
        .resource(
            "ExamSession",
            ResourcePermission::new()
                .create()
                .read(["assignment", "date_completed", "date_started", "passed", "score"])
                .update(["date_completed"]),
        )
        .resource(
            "User",
            ResourcePermission::new()
                .read(["email", "first_name", "groups", "last_name", "organizations", "status", "username"])
                .update(["email", "first_name", "last_name"]),
        );

    if ctx.features.contains(FEATURE_VIDEO) {
        acl = acl
            .method("ownership.actor_owns_video_session")
            .resource(
                "VideoSession",
                ResourcePermission::new()
                    .create()
                    .read(["assignment", "date_completed", "date_started", "video"])
                    .update(["date_completed"]),
            );
    }

    if ctx.features.contains(FEATURE_FILE_TASKS) {
        acl = acl
            .resource(
                "FileDownloadAttempt",
                ResourcePermission::new()
                    .create()
                    .read(["assignment", "date_completed", "date_started", "file_download"]),
            )
            .resource(
                "FileUploadAttempt",
                ResourcePermission::new()
                    .create()
                    .read(["assignment", "date_completed", "date_started", "file_upload"])
                    .update(["date_completed"]),
            );
    }

    registry.register_role(acl)
}
