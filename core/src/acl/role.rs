//! Role declarations and the registry they are written to

use crate::acl::crud::{CrudMatrix, ResourcePermission};
use crate::acl::method::AuthorizationMethod;
use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};

/// One `register_role` payload: methods, CRUD matrix and arbitrary
/// permissions attached to a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAcl {
    /// Role display name, e.g. "Authenticated User"
    pub role: String,
    /// Authorization checks attached to the role
    #[serde(default)]
    pub methods: Vec<AuthorizationMethod>,
    /// Per-resource grants
    #[serde(default)]
    pub crud: CrudMatrix,
    /// Grants not tied to any resource
    #[serde(default)]
    pub arbitrary_perms: Vec<String>,
}

impl RoleAcl {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            methods: Vec::new(),
            crud: CrudMatrix::new(),
            arbitrary_perms: Vec::new(),
        }
    }

    /// Attach an authorization method
    pub fn method(mut self, method: impl Into<AuthorizationMethod>) -> Self {
        self.methods.push(method.into());
        self
    }

    /// Set the grants for one resource type
    pub fn resource(mut self, name: impl Into<String>, permission: ResourcePermission) -> Self {
        self.crud.insert(name, permission);
        self
    }

    /// Grant an arbitrary permission
    pub fn arbitrary_perm(mut self, name: impl Into<String>) -> Self {
        self.arbitrary_perms.push(name.into());
        self
    }

    /// Shape checks only; resource and field names are not matched against
    /// any model registry.
    pub fn validate(&self) -> Result<()> {
        if self.role.trim().is_empty() {
            return Err(StoreError::EmptyRoleName.into());
        }

        if let Some(method) = self.methods.iter().find(|m| !m.has_valid_name()) {
            return Err(StoreError::InvalidMethodName {
                role: self.role.clone(),
                method: method.name.clone(),
            }
            .into());
        }

        if self.crud.resources().any(|name| name.trim().is_empty()) {
            return Err(StoreError::EmptyResourceName {
                role: self.role.clone(),
            }
            .into());
        }

        Ok(())
    }
}

/// The authorization tables a setup routine writes to.
///
/// Declaring the same role twice is additive: every call attaches one more
/// ACL to the role.
pub trait AclRegistry {
    /// Attach an ACL to `acl.role`, creating the role if needed
    fn register_role(&mut self, acl: RoleAcl) -> Result<()>;
}
