//! CRUD permission matrix

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Grants on a single resource type.
///
/// Any grant left out is "no permission": an empty field set or `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcePermission {
    /// Create
    pub c: bool,
    /// Readable fields
    pub r: BTreeSet<String>,
    /// Updatable fields
    pub u: BTreeSet<String>,
    /// Delete
    pub d: bool,
}

impl ResourcePermission {
    /// No grants at all
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow create
    pub fn create(mut self) -> Self {
        self.c = true;
        self
    }

    /// Allow reading the given fields
    pub fn read<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.r.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Allow updating the given fields
    pub fn update<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.u.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Allow delete
    pub fn delete(mut self) -> Self {
        self.d = true;
        self
    }

    /// Read and update the same fields, plus create and delete
    pub fn full<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: BTreeSet<String> = fields.into_iter().map(Into::into).collect();
        Self {
            c: true,
            r: fields.clone(),
            u: fields,
            d: true,
        }
    }

    /// True when nothing is granted
    pub fn is_empty(&self) -> bool {
        !self.c && !self.d && self.r.is_empty() && self.u.is_empty()
    }
}

/// Resource-type name to its grants
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CrudMatrix(BTreeMap<String, ResourcePermission>);

impl CrudMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grants for a resource type, replacing any previous entry
    pub fn resource(mut self, name: impl Into<String>, permission: ResourcePermission) -> Self {
        self.insert(name, permission);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, permission: ResourcePermission) {
        self.0.insert(name.into(), permission);
    }

    pub fn get(&self, name: &str) -> Option<&ResourcePermission> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Resource names in sorted order
    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResourcePermission)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
