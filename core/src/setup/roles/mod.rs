//! Role declaration routines
//!
//! Each module declares one role and exposes `setup`, which attaches the
//! role's ACL to the registry. Routines gated by a feature flag return
//! without registering anything when the flag is not installed.

pub mod admin;
pub mod authenticated_user;
pub mod category_manager;
pub mod everybody;
pub mod exam_reviewer;
pub mod file_task_reviewer;
pub mod instructor;
pub mod instructor_manager;
pub mod object_owner;
pub mod organization_admin;
pub mod precor_dealer;
pub mod precor_regional_manager;
pub mod purchaser;
pub mod video_uploader;

use crate::acl::AuthorizationMethod;

/// `membership.actor_member_of_group` for the named group
pub(crate) fn member_of_group(group_name: &str) -> AuthorizationMethod {
    AuthorizationMethod::new("membership.actor_member_of_group").param("group_name", group_name)
}
