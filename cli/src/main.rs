//! Aclseed CLI - Command-line interface for role seeding and fixture export

use aclseed_core::{
    AuditLogger, Console, ROUTINES, SeedDatabase, SeedStore, Settings, SetupContext,
    SetupSummary, get_config_path, load_settings, process_audit_logs, run_setup, save_settings,
    write_fixtures,
};
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use console::Style;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset or invalid
const DEFAULT_LOG_FILTER: &str = "info";

/// Aclseed - authorization seed data for the course platform
#[derive(Parser, Debug)]
#[command(name = "aclseed")]
#[command(version)]
#[command(about = "Seed authorization roles and export initial setup fixtures", long_about = None)]
struct Cli {
    /// Settings file (default: ~/.aclseed/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write default settings to the config file
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Show settings and fixture locations
    Status,

    /// Write the initial setup fixtures
    Fixtures,

    /// List setup routines in execution order
    Routines,

    /// Run setup and list the roles it declares
    Roles {
        /// Profiles to run (default: base, legacy)
        profiles: Vec<String>,
    },

    /// Print the ACLs of one role as JSON
    Show {
        /// Role name, e.g. "Object Owner"
        role: String,
        /// Profile to run, may be repeated (default: base, legacy)
        #[arg(short, long = "profile")]
        profiles: Vec<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    if let Commands::Init { force } = cli.command {
        return command_init(cli.config, force).await;
    }

    let settings = load_settings(cli.config.as_deref())
        .await
        .context("Failed to load settings")?;

    match cli.command {
        Commands::Init { .. } => {}
        Commands::Status => {
            command_status(&settings, cli.config);
        }
        Commands::Fixtures => {
            command_fixtures(&settings).await?;
        }
        Commands::Routines => {
            command_routines();
        }
        Commands::Roles { profiles } => {
            command_roles(&settings, &profiles)?;
        }
        Commands::Show { role, profiles } => {
            command_show(&settings, &role, &profiles)?;
        }
    }

    Ok(())
}

/// Logs go to stderr so they never mix with command output
fn init_logging(verbose: bool) -> Result<()> {
    let filter = log_filter(verbose, std::env::var(EnvFilter::DEFAULT_ENV).ok())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// `--verbose` forces debug; otherwise `RUST_LOG` wins over the default
fn log_filter(verbose: bool, rust_log: Option<String>) -> Result<EnvFilter> {
    if verbose {
        return Ok(EnvFilter::builder().parse("debug")?);
    }

    Ok(rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER)))
}

/// Write default settings
async fn command_init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let green = Style::new().green();
    let config_path = path.unwrap_or_else(get_config_path);

    if config_path.exists() && !force {
        println!(
            "{} Config already exists at {}",
            Style::new().yellow().apply_to("!"),
            config_path.display()
        );
        println!("Use --force to overwrite it.");
        return Ok(());
    }

    save_settings(&Settings::default(), &config_path)
        .await
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("{} Created config at {}", green.apply_to("✅"), config_path.display());
    println!("\nNext steps:");
    println!("  1. Set project_root in {}", config_path.display());
    println!("  2. Export fixtures: aclseed fixtures");

    Ok(())
}

/// Show settings
fn command_status(settings: &Settings, path: Option<PathBuf>) {
    let green = Style::new().green();
    let config_path = path.unwrap_or_else(get_config_path);
    let fixture_path = settings.fixture_path();

    println!("aclseed Status\n");
    println!(
        "Config: {} {}",
        config_path.display(),
        if config_path.exists() {
            green.apply_to("✅")
        } else {
            console::style("defaults").dim()
        }
    );
    println!(
        "Fixtures: {} {}",
        fixture_path.display(),
        if fixture_path.exists() {
            green.apply_to("✅")
        } else {
            console::style("❌").red()
        }
    );

    let installed = settings.features();
    let features: Vec<&str> = installed.iter().collect();
    println!(
        "Features: {}",
        if features.is_empty() {
            console::style("none".to_string()).dim()
        } else {
            console::style(features.join(", "))
        }
    );
    println!("Indent: {}", settings.indent);
}

/// Export the initial setup fixtures
async fn command_fixtures(settings: &Settings) -> Result<()> {
    let green = Style::new().green();
    let fixture_dir = settings.fixture_path();

    let (audit, receiver) = AuditLogger::new();
    let drain = tokio::spawn(process_audit_logs(receiver));

    let mut database = SeedDatabase::new(SetupContext::new(settings.features())).with_audit(audit);
    let mut console = Console::stdout();
    let written = write_fixtures(&mut database, &mut console, &fixture_dir, settings.indent)
        .await
        .with_context(|| format!("Failed to write fixtures to {}", fixture_dir.display()))?;

    // closes the audit channel
    drop(database);
    drain.await.context("Audit log task failed")?;

    println!("{} Wrote {} fixture(s)", green.apply_to("✅"), written.len());
    Ok(())
}

/// List the routine table
fn command_routines() {
    let dim = Style::new().dim();

    println!("Setup routines ({}):\n", ROUTINES.len());
    for routine in ROUTINES {
        println!(
            "  {:<26} {} {}",
            routine.name,
            dim.apply_to(format!("{:<7}", routine.profile)),
            routine.role
        );
    }
}

/// Run setup into a fresh store with progress suppressed
fn seed(settings: &Settings, profiles: &[String]) -> Result<(SeedStore, SetupSummary)> {
    let ctx = SetupContext::new(settings.features());
    let profiles: Vec<&str> = profiles.iter().map(String::as_str).collect();

    let mut store = SeedStore::new();
    let mut console = Console::stdout();
    let summary = console
        .with_redirect(None, |c| run_setup(&mut store, &ctx, &profiles, c, None))
        .context("Initial setup failed")?;

    Ok((store, summary))
}

/// List the roles declared by a setup run
fn command_roles(settings: &Settings, profiles: &[String]) -> Result<()> {
    let yellow = Style::new().yellow();
    let (store, summary) = seed(settings, profiles)?;

    let roles = store.role_names();
    println!("Roles ({}):\n", roles.len());
    for role in roles {
        let acls = store.acls_for(role)?;
        println!("  {} ({} ACL)", role, acls.len());
    }

    if !summary.skipped.is_empty() {
        println!(
            "\n{} Skipped, feature not installed: {}",
            yellow.apply_to("!"),
            summary.skipped.join(", ")
        );
    }

    Ok(())
}

/// Print one role's ACLs
fn command_show(settings: &Settings, role: &str, profiles: &[String]) -> Result<()> {
    let (store, _) = seed(settings, profiles)?;

    let acls = store
        .acls_for(role)
        .with_context(|| format!("Role '{}' was not declared by this setup run", role))?;
    println!("{}", serde_json::to_string_pretty(&acls)?);

    Ok(())
}
