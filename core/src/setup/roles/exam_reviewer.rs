//! Exam Reviewer, installed with the `exams` feature

use crate::acl::{AclRegistry, ResourcePermission, RoleAcl};
use crate::error::Result;
use crate::setup::roles::member_of_group;
use crate::setup::{FEATURE_EXAMS, SetupContext};

pub const ROLE: &str = "Exam Reviewer";

pub fn setup(registry: &mut dyn AclRegistry, ctx: &SetupContext) -> Result<()> {
    if !ctx.features.contains(FEATURE_EXAMS) {
        return Ok(());
    }

    registry.register_role(
        RoleAcl::new(ROLE)
            .method(member_of_group("Exam Reviewers"))
            .resource("Exam", ResourcePermission::new().read(["name", "passing_score", "questions"]))
            .resource(
                "ExamSession",
                ResourcePermission::new()
                    .read(["assignment", "date_completed", "date_started", "passed", "score"])
                    .update(["passed", "score"]),
            )
            .resource(
                "Response",
                ResourcePermission::new()
                    .read(["correct", "exam_session", "question", "text"])
                    .update(["correct"]),
            ),
    )
}
