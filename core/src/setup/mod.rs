//! Initial setup: profiles, feature flags and the role routine table
//!
//! Every role declaration routine is listed in [`ROUTINES`]. A setup run
//! picks the routines whose profile was requested and executes them, in
//! table order, against an [`AclRegistry`].

pub mod audit;
pub mod roles;

#[cfg(test)]
mod tests;

use crate::acl::{AclRegistry, RoleAcl};
use crate::capture::Console;
use crate::error::{Result, SetupError};
use std::collections::BTreeSet;
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use tracing::{debug, info};

pub use audit::{AuditLogEntry, AuditLogger, process_audit_logs};

pub const FEATURE_EXAMS: &str = "exams";
pub const FEATURE_VIDEO: &str = "video";
pub const FEATURE_FILE_TASKS: &str = "file_tasks";
pub const FEATURE_ECOMMERCE: &str = "ecommerce";

/// Every feature flag a routine may test
pub const KNOWN_FEATURES: [&str; 4] = [
    FEATURE_EXAMS,
    FEATURE_VIDEO,
    FEATURE_FILE_TASKS,
    FEATURE_ECOMMERCE,
];

/// Named group of setup routines
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Profile {
    Base,
    Legacy,
    Precor,
}

/// Profiles run when none are named
pub const DEFAULT_PROFILES: [Profile; 2] = [Profile::Base, Profile::Legacy];

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Base => "base",
            Profile::Legacy => "legacy",
            Profile::Precor => "precor",
        }
    }

    /// Parse profile names; an empty list means [`DEFAULT_PROFILES`]
    pub fn select(names: &[&str]) -> Result<BTreeSet<Profile>> {
        if names.is_empty() {
            return Ok(DEFAULT_PROFILES.into_iter().collect());
        }
        names.iter().map(|name| Ok(name.parse::<Profile>()?)).collect()
    }
}

impl FromStr for Profile {
    type Err = SetupError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "base" => Ok(Profile::Base),
            "legacy" => Ok(Profile::Legacy),
            "precor" => Ok(Profile::Precor),
            _ => Err(SetupError::UnknownProfile(s.to_string())),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Installed feature flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Features(BTreeSet<String>);

impl Features {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every flag in [`KNOWN_FEATURES`]
    pub fn all() -> Self {
        KNOWN_FEATURES.into_iter().collect()
    }

    pub fn with(mut self, name: impl Into<String>) -> Self {
        self.0.insert(name.into());
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Features {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Configuration handed to every routine
#[derive(Debug, Clone, Default)]
pub struct SetupContext {
    pub features: Features,
}

impl SetupContext {
    pub fn new(features: Features) -> Self {
        Self { features }
    }
}

/// Signature shared by all role declaration routines
pub type SetupFn = fn(&mut dyn AclRegistry, &SetupContext) -> Result<()>;

/// One entry of the routine table
#[derive(Debug, Clone, Copy)]
pub struct SetupRoutine {
    /// Routine name, unique within the table
    pub name: &'static str,
    /// Role the routine declares
    pub role: &'static str,
    pub profile: Profile,
    pub run: SetupFn,
}

/// All role declaration routines, in execution order
pub static ROUTINES: &[SetupRoutine] = &[
    SetupRoutine {
        name: "admin",
        role: roles::admin::ROLE,
        profile: Profile::Base,
        run: roles::admin::setup,
    },
    SetupRoutine {
        name: "everybody",
        role: roles::everybody::ROLE,
        profile: Profile::Base,
        run: roles::everybody::setup,
    },
    SetupRoutine {
        name: "authenticated_user",
        role: roles::authenticated_user::ROLE,
        profile: Profile::Base,
        run: roles::authenticated_user::setup,
    },
    SetupRoutine {
        name: "object_owner",
        role: roles::object_owner::ROLE,
        profile: Profile::Base,
        run: roles::object_owner::setup,
    },
    SetupRoutine {
        name: "organization_admin",
        role: roles::organization_admin::ROLE,
        profile: Profile::Base,
        run: roles::organization_admin::setup,
    },
    SetupRoutine {
        name: "exam_reviewer",
        role: roles::exam_reviewer::ROLE,
        profile: Profile::Base,
        run: roles::exam_reviewer::setup,
    },
    SetupRoutine {
        name: "video_uploader",
        role: roles::video_uploader::ROLE,
        profile: Profile::Base,
        run: roles::video_uploader::setup,
    },
    SetupRoutine {
        name: "file_task_reviewer",
        role: roles::file_task_reviewer::ROLE,
        profile: Profile::Base,
        run: roles::file_task_reviewer::setup,
    },
    SetupRoutine {
        name: "instructor",
        role: roles::instructor::ROLE,
        profile: Profile::Legacy,
        run: roles::instructor::setup,
    },
    SetupRoutine {
        name: "instructor_manager",
        role: roles::instructor_manager::ROLE,
        profile: Profile::Legacy,
        run: roles::instructor_manager::setup,
    },
    SetupRoutine {
        name: "category_manager",
        role: roles::category_manager::ROLE,
        profile: Profile::Legacy,
        run: roles::category_manager::setup,
    },
    SetupRoutine {
        name: "purchaser",
        role: roles::purchaser::ROLE,
        profile: Profile::Legacy,
        run: roles::purchaser::setup,
    },
    SetupRoutine {
        name: "precor_dealer",
        role: roles::precor_dealer::ROLE,
        profile: Profile::Precor,
        run: roles::precor_dealer::setup,
    },
    SetupRoutine {
        name: "precor_regional_manager",
        role: roles::precor_regional_manager::ROLE,
        profile: Profile::Precor,
        run: roles::precor_regional_manager::setup,
    },
];

/// Routines belonging to any of `profiles`, in table order
pub fn select_routines(profiles: &BTreeSet<Profile>) -> impl Iterator<Item = &'static SetupRoutine> {
    ROUTINES.iter().filter(move |r| profiles.contains(&r.profile))
}

/// Outcome of a setup run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupSummary {
    /// Routines that registered at least one ACL
    pub registered: Vec<&'static str>,
    /// Routines that returned without registering, e.g. feature not installed
    pub skipped: Vec<&'static str>,
    /// Total ACLs registered
    pub acl_count: usize,
}

/// Counts registrations passing through to the wrapped registry
struct CountingRegistry<'a> {
    inner: &'a mut dyn AclRegistry,
    count: usize,
}

impl AclRegistry for CountingRegistry<'_> {
    fn register_role(&mut self, acl: RoleAcl) -> Result<()> {
        self.inner.register_role(acl)?;
        self.count += 1;
        Ok(())
    }
}

/// Run the routines selected by `profiles` against `registry`.
///
/// Progress goes to `console`; callers that do not want it redirect the
/// console first. The first routine error stops the run and is returned
/// unchanged.
pub fn run_setup(
    registry: &mut dyn AclRegistry,
    ctx: &SetupContext,
    profiles: &[&str],
    console: &mut Console,
    audit: Option<&AuditLogger>,
) -> Result<SetupSummary> {
    let selected = Profile::select(profiles)?;
    info!(
        profiles = ?selected.iter().map(Profile::as_str).collect::<Vec<_>>(),
        "Running initial setup"
    );

    let mut summary = SetupSummary::default();
    for routine in select_routines(&selected) {
        writeln!(console, "Running setup routine {}", routine.name)?;

        let mut counting = CountingRegistry {
            inner: &mut *registry,
            count: 0,
        };
        (routine.run)(&mut counting, ctx)?;
        let count = counting.count;

        if count == 0 {
            writeln!(console, "  {} registered nothing", routine.name)?;
            debug!(routine = routine.name, "Routine registered no ACL");
            summary.skipped.push(routine.name);
        } else {
            writeln!(console, "  added {} ACL(s) to role '{}'", count, routine.role)?;
            summary.registered.push(routine.name);
        }
        summary.acl_count += count;

        if let Some(audit) = audit {
            audit.log(routine.name, routine.profile, count);
        }
    }

    info!(
        registered = summary.registered.len(),
        skipped = summary.skipped.len(),
        acls = summary.acl_count,
        "Initial setup complete"
    );
    Ok(summary)
}
