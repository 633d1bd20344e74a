//! In-memory authorization tables
//!
//! [`SeedStore`] is the registry setup routines write to. It keeps four
//! tables (roles, methods, ACLs and method calls) and serializes any of them
//! as a JSON fixture.

use crate::acl::{AclRegistry, AuthorizationMethod, CrudMatrix, RoleAcl};
use crate::error::{Result, StoreError};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::io::Write;
use tracing::{debug, info};

pub const ROLE_TABLE: &str = "pr_services.role";
pub const ACMETHOD_TABLE: &str = "pr_services.acmethod";
pub const ACL_TABLE: &str = "pr_services.acl";
pub const ACMETHODCALL_TABLE: &str = "pr_services.acmethodcall";

/// How rows refer to each other in a dump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStyle {
    /// Human-meaningful keys (`["Admin"]`) wherever a model has one
    Natural,
    /// Integer primary keys everywhere
    Surrogate,
}

#[derive(Debug, Clone)]
struct RoleRow {
    id: u64,
    name: String,
}

#[derive(Debug, Clone)]
struct MethodRow {
    id: u64,
    name: String,
}

#[derive(Debug, Clone)]
struct AclRow {
    id: u64,
    role_id: u64,
    crud: CrudMatrix,
    arbitrary_perms: Vec<String>,
}

#[derive(Debug, Clone)]
struct MethodCallRow {
    id: u64,
    acl_id: u64,
    method_id: u64,
    params: BTreeMap<String, Value>,
}

/// Authorization tables held in memory
#[derive(Debug, Default)]
pub struct SeedStore {
    roles: Vec<RoleRow>,
    methods: Vec<MethodRow>,
    acls: Vec<AclRow>,
    calls: Vec<MethodCallRow>,
}

impl SeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard every row and restart primary keys at 1
    pub fn reset(&mut self) {
        info!(
            roles = self.roles.len(),
            acls = self.acls.len(),
            "Resetting authorization tables"
        );
        self.roles.clear();
        self.methods.clear();
        self.acls.clear();
        self.calls.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty() && self.methods.is_empty() && self.acls.is_empty()
    }

    /// Role names in creation order
    pub fn role_names(&self) -> Vec<&str> {
        self.roles.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn contains_role(&self, name: &str) -> bool {
        self.roles.iter().any(|r| r.name == name)
    }

    /// Distinct method names in first-use order
    pub fn method_names(&self) -> Vec<&str> {
        self.methods.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn acl_count(&self) -> usize {
        self.acls.len()
    }

    /// Every ACL attached to `role`, in registration order
    pub fn acls_for(&self, role: &str) -> Result<Vec<RoleAcl>> {
        let role_row = self
            .roles
            .iter()
            .find(|r| r.name == role)
            .ok_or_else(|| StoreError::UnknownRole(role.to_string()))?;

        let acls = self
            .acls
            .iter()
            .filter(|acl| acl.role_id == role_row.id)
            .map(|acl| RoleAcl {
                role: role_row.name.clone(),
                methods: self
                    .calls
                    .iter()
                    .filter(|call| call.acl_id == acl.id)
                    .map(|call| AuthorizationMethod {
                        name: self.method_name(call.method_id).to_string(),
                        params: call.params.clone(),
                    })
                    .collect(),
                crud: acl.crud.clone(),
                arbitrary_perms: acl.arbitrary_perms.clone(),
            })
            .collect();

        Ok(acls)
    }

    /// Serialize `tables`, in the given order, as a JSON fixture
    pub fn dump_to(
        &self,
        tables: &[&str],
        keys: KeyStyle,
        indent: usize,
        out: &mut dyn Write,
    ) -> Result<()> {
        let mut records = Vec::new();
        for table in tables {
            match *table {
                ROLE_TABLE => records.extend(self.role_records(keys)),
                ACMETHOD_TABLE => records.extend(self.method_records(keys)),
                ACL_TABLE => records.extend(self.acl_records(keys)),
                ACMETHODCALL_TABLE => records.extend(self.method_call_records(keys)),
                other => return Err(StoreError::UnknownTable(other.to_string()).into()),
            }
        }
        debug!(tables = tables.len(), records = records.len(), "Serializing fixture");

        let records = Value::Array(records);
        if indent == 0 {
            serde_json::to_writer(&mut *out, &records)?;
        } else {
            let indent = vec![b' '; indent];
            let mut serializer =
                serde_json::Serializer::with_formatter(&mut *out, PrettyFormatter::with_indent(&indent));
            records.serialize(&mut serializer)?;
        }
        writeln!(out)?;
        Ok(())
    }

    /// [`dump_to`](Self::dump_to) into a string
    pub fn dump(&self, tables: &[&str], keys: KeyStyle, indent: usize) -> Result<String> {
        let mut buf = Vec::new();
        self.dump_to(tables, keys, indent, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    fn role_id_or_insert(&mut self, name: &str) -> u64 {
        if let Some(row) = self.roles.iter().find(|r| r.name == name) {
            return row.id;
        }
        let id = self.roles.len() as u64 + 1;
        self.roles.push(RoleRow {
            id,
            name: name.to_string(),
        });
        debug!(role = name, id, "Created role");
        id
    }

    fn method_id_or_insert(&mut self, name: &str) -> u64 {
        if let Some(row) = self.methods.iter().find(|m| m.name == name) {
            return row.id;
        }
        let id = self.methods.len() as u64 + 1;
        self.methods.push(MethodRow {
            id,
            name: name.to_string(),
        });
        id
    }

    fn role_name(&self, id: u64) -> &str {
        self.roles
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.name.as_str())
            .unwrap_or_default()
    }

    fn method_name(&self, id: u64) -> &str {
        self.methods
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.name.as_str())
            .unwrap_or_default()
    }

    fn role_records(&self, keys: KeyStyle) -> Vec<Value> {
        self.roles
            .iter()
            .map(|role| record(ROLE_TABLE, natural_pk(keys, role.id), json!({ "name": role.name })))
            .collect()
    }

    fn method_records(&self, keys: KeyStyle) -> Vec<Value> {
        self.methods
            .iter()
            .map(|method| {
                record(
                    ACMETHOD_TABLE,
                    natural_pk(keys, method.id),
                    json!({ "name": method.name }),
                )
            })
            .collect()
    }

    fn acl_records(&self, keys: KeyStyle) -> Vec<Value> {
        self.acls
            .iter()
            .map(|acl| {
                let role = match keys {
                    KeyStyle::Natural => json!([self.role_name(acl.role_id)]),
                    KeyStyle::Surrogate => json!(acl.role_id),
                };
                record(
                    ACL_TABLE,
                    Some(acl.id),
                    json!({
                        "role": role,
                        "acl": acl.crud,
                        "arbitrary_perms": acl.arbitrary_perms,
                    }),
                )
            })
            .collect()
    }

    fn method_call_records(&self, keys: KeyStyle) -> Vec<Value> {
        self.calls
            .iter()
            .map(|call| {
                let method = match keys {
                    KeyStyle::Natural => json!([self.method_name(call.method_id)]),
                    KeyStyle::Surrogate => json!(call.method_id),
                };
                record(
                    ACMETHODCALL_TABLE,
                    Some(call.id),
                    json!({
                        "acl": call.acl_id,
                        "acmethod": method,
                        "params": call.params,
                    }),
                )
            })
            .collect()
    }
}

impl AclRegistry for SeedStore {
    fn register_role(&mut self, acl: RoleAcl) -> Result<()> {
        acl.validate()?;

        let role_id = self.role_id_or_insert(&acl.role);
        let acl_id = self.acls.len() as u64 + 1;
        self.acls.push(AclRow {
            id: acl_id,
            role_id,
            crud: acl.crud,
            arbitrary_perms: acl.arbitrary_perms,
        });

        for method in acl.methods {
            let method_id = self.method_id_or_insert(&method.name);
            let id = self.calls.len() as u64 + 1;
            self.calls.push(MethodCallRow {
                id,
                acl_id,
                method_id,
                params: method.params,
            });
        }

        debug!(role = %acl.role, acl_id, "Registered ACL");
        Ok(())
    }
}

/// Models with a natural key drop their pk when dumped with natural keys
fn natural_pk(keys: KeyStyle, id: u64) -> Option<u64> {
    match keys {
        KeyStyle::Natural => None,
        KeyStyle::Surrogate => Some(id),
    }
}

fn record(model: &str, pk: Option<u64>, fields: Value) -> Value {
    let mut record = json!({ "model": model, "fields": fields });
    if let (Some(pk), Some(obj)) = (pk, record.as_object_mut()) {
        obj.insert("pk".to_string(), json!(pk));
    }
    record
}
