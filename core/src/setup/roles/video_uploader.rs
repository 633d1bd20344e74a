//! Video Uploader, installed with the `video` feature

use crate::acl::{AclRegistry, ResourcePermission, RoleAcl};
use crate::error::Result;
use crate::setup::roles::member_of_group;
use crate::setup::{FEATURE_VIDEO, SetupContext};

pub const ROLE: &str = "Video Uploader";

pub fn setup(registry: &mut dyn AclRegistry, ctx: &SetupContext) -> Result<()> {
    if !ctx.features.contains(FEATURE_VIDEO) {
        return Ok(());
    }

    registry.register_role(
        RoleAcl::new(ROLE)
            .method(member_of_group("Video Uploaders"))
            .resource(
                "Video",
                ResourcePermission::new()
                    .create()
                    .read(["author", "categories", "description", "length", "name", "status"])
                    .update(["categories", "description", "name"]),
            )
            .resource(
                "VideoCategory",
                ResourcePermission::new().create().read(["category", "status", "video"]),
            ),
    )
}
