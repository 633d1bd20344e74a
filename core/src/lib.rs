//! Aclseed Core Library
//!
//! This library contains the authorization seed data for the course platform:
//! ACL types, the role declaration routines and their profiles, the in-memory
//! authorization tables, and the fixture exporter.

pub mod acl;
pub mod capture;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod setup;
pub mod store;

// Re-exports for convenience
pub use acl::{AclRegistry, AuthorizationMethod, CrudMatrix, ResourcePermission, RoleAcl};
pub use capture::{CaptureBuffer, Console, Redirect};
pub use config::{Settings, get_config_dir, get_config_path, load_settings, save_settings};
pub use error::*;
pub use fixtures::{
    FIXTURE_CONFIGS, FIXTURE_TABLES, FixtureBackend, FixtureConfig, SeedDatabase, render_fixture,
    write_fixtures,
};
pub use setup::{
    AuditLogEntry, AuditLogger, DEFAULT_PROFILES, Features, KNOWN_FEATURES, Profile, ROUTINES,
    SetupContext, SetupRoutine, SetupSummary, process_audit_logs, run_setup, select_routines,
};
pub use store::{KeyStyle, SeedStore};
