//! Authorization-check method references

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// A reference to an authorization check, e.g. `ownership.actor_owns_assignment`.
///
/// Generic checks are parametrized through `params`, such as the group name
/// tested by `membership.actor_member_of_group`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationMethod {
    /// Dotted method name
    pub name: String,
    /// Parameter name to value
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, Value>,
}

impl AuthorizationMethod {
    /// Create a method reference without parameters
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: BTreeMap::new(),
        }
    }

    /// Add a parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Whether the name is a dotted lowercase identifier path
    pub fn has_valid_name(&self) -> bool {
        static NAME: OnceLock<Option<Regex>> = OnceLock::new();
        NAME.get_or_init(|| Regex::new(r"^[a-z_][a-z0-9_]*(\.[a-z_][a-z0-9_]*)+$").ok())
            .as_ref()
            .is_some_and(|re| re.is_match(&self.name))
    }
}

impl From<&str> for AuthorizationMethod {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for AuthorizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_name_validation() {
        assert!(AuthorizationMethod::new("ownership.actor_owns_assignment").has_valid_name());
        assert!(AuthorizationMethod::new("general.actor_is_anybody").has_valid_name());
        assert!(!AuthorizationMethod::new("actor_is_anybody").has_valid_name());
        assert!(!AuthorizationMethod::new("Ownership.Owns").has_valid_name());
        assert!(!AuthorizationMethod::new("ownership.").has_valid_name());
        assert!(!AuthorizationMethod::new("").has_valid_name());
    }

    #[test]
    fn test_params_builder() {
        let method = AuthorizationMethod::new("membership.actor_member_of_group")
            .param("group_name", "Super Administrators");
        assert_eq!(
            method.params.get("group_name"),
            Some(&Value::from("Super Administrators"))
        );
    }

    #[test]
    fn test_params_omitted_when_empty() {
        let json = serde_json::to_value(AuthorizationMethod::new("general.actor_is_anybody")).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "general.actor_is_anybody" }));
    }
}
