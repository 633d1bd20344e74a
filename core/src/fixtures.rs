//! Initial setup fixture export
//!
//! For each fixture configuration the backend is reset, setup runs with the
//! configuration's profiles, and the authorization tables are dumped to a
//! JSON file. Setup chatter is suppressed; the dump is captured from the
//! console and written to disk.

use crate::capture::{CaptureBuffer, Console};
use crate::error::Result;
use crate::setup::{self, AuditLogger, SetupContext};
use crate::store::{ACL_TABLE, ACMETHOD_TABLE, ACMETHODCALL_TABLE, KeyStyle, ROLE_TABLE, SeedStore};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Tables written to every fixture, in this order
pub const FIXTURE_TABLES: [&str; 4] = [ROLE_TABLE, ACMETHOD_TABLE, ACL_TABLE, ACMETHODCALL_TABLE];

/// One fixture file and the setup profiles used to produce it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureConfig {
    pub file_name: &'static str,
    /// Empty means the default profile selection
    pub profiles: &'static [&'static str],
}

/// The fixtures written by [`write_fixtures`], in order
pub const FIXTURE_CONFIGS: [FixtureConfig; 2] = [
    FixtureConfig {
        file_name: "initial_setup_default.json",
        profiles: &[],
    },
    FixtureConfig {
        file_name: "initial_setup_precor.json",
        profiles: &["base", "legacy", "precor"],
    },
];

/// Storage the export command drives
pub trait FixtureBackend {
    /// Discard all stored data
    fn reset(&mut self) -> Result<()>;

    /// Run initial setup for `profiles`, reporting progress to `console`
    fn setup(&mut self, profiles: &[&str], console: &mut Console) -> Result<()>;

    /// Write `tables` to `console` as a JSON fixture
    fn dump(&self, tables: &[&str], keys: KeyStyle, indent: usize, console: &mut Console) -> Result<()>;
}

/// [`FixtureBackend`] over an in-memory [`SeedStore`]
#[derive(Debug, Default)]
pub struct SeedDatabase {
    store: SeedStore,
    context: SetupContext,
    audit: Option<AuditLogger>,
}

impl SeedDatabase {
    pub fn new(context: SetupContext) -> Self {
        Self {
            store: SeedStore::new(),
            context,
            audit: None,
        }
    }

    /// Report every setup routine to `audit`
    pub fn with_audit(mut self, audit: AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn store(&self) -> &SeedStore {
        &self.store
    }
}

impl FixtureBackend for SeedDatabase {
    fn reset(&mut self) -> Result<()> {
        self.store.reset();
        Ok(())
    }

    fn setup(&mut self, profiles: &[&str], console: &mut Console) -> Result<()> {
        setup::run_setup(
            &mut self.store,
            &self.context,
            profiles,
            console,
            self.audit.as_ref(),
        )?;
        Ok(())
    }

    fn dump(&self, tables: &[&str], keys: KeyStyle, indent: usize, console: &mut Console) -> Result<()> {
        self.store.dump_to(tables, keys, indent, console)
    }
}

/// Reset, set up and dump one fixture configuration, returning the JSON text
pub fn render_fixture<B: FixtureBackend>(
    backend: &mut B,
    console: &mut Console,
    config: &FixtureConfig,
    indent: usize,
) -> Result<String> {
    backend.reset()?;

    // setup output is noise here
    console.with_redirect(None, |c| backend.setup(config.profiles, c))?;

    let captured = CaptureBuffer::new();
    console.with_redirect(Some(captured.clone()), |c| {
        backend.dump(&FIXTURE_TABLES, KeyStyle::Natural, indent, c)
    })?;

    Ok(captured.contents())
}

/// Write every configuration in [`FIXTURE_CONFIGS`] under `fixture_dir`.
///
/// Progress lines go to `console`. Returns the written paths in order.
pub async fn write_fixtures<B: FixtureBackend>(
    backend: &mut B,
    console: &mut Console,
    fixture_dir: &Path,
    indent: usize,
) -> Result<Vec<PathBuf>> {
    writeln!(console, "Writing fixtures to {}", fixture_dir.display())?;
    fs::create_dir_all(fixture_dir).await?;

    let mut written = Vec::with_capacity(FIXTURE_CONFIGS.len());
    for config in &FIXTURE_CONFIGS {
        writeln!(console, "Writing {}", config.file_name)?;
        let contents = render_fixture(backend, console, config, indent)?;

        let path = fixture_dir.join(config.file_name);
        fs::write(&path, contents.as_bytes()).await?;
        info!(path = %path.display(), bytes = contents.len(), "Wrote fixture");
        written.push(path);
    }

    Ok(written)
}
