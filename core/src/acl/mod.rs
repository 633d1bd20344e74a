//! Role/ACL data model
//!
//! A role declaration attaches authorization-check methods and a CRUD matrix
//! to a named role. Declarations are handed to an [`AclRegistry`], which owns
//! the authorization tables.

pub mod crud;
pub mod method;
pub mod role;

pub use crud::{CrudMatrix, ResourcePermission};
pub use method::AuthorizationMethod;
pub use role::{AclRegistry, RoleAcl};
