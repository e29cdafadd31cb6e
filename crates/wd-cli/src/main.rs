// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command-line entry point for scanning, gating, and reconciling
//! federation project identity.

mod cmd_audit;
mod cmd_gate;
mod cmd_identity;
mod cmd_introspect;
mod cmd_registry;
mod cmd_report;
mod cmd_scan;
mod support;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

const EXIT_RUNTIME_ERROR: i32 = 1;
#[allow(dead_code)]
const EXIT_USAGE_ERROR: i32 = 2; // clap exits with 2 automatically

#[derive(Parser, Debug)]
#[command(name = "wd", version, about = "Federation governance instrument")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug-level logging.
    #[arg(long, global = true)]
    debug: bool,

    /// Path to a configuration file (TOML). Defaults to the built-in
    /// configuration with environment overrides applied.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run scanners against a target and persist the combined result.
    Scan {
        /// Filesystem path to scan. Defaults to the current directory.
        target: Option<PathBuf>,

        /// Scan every workspace registered under the federation root
        /// instead of a single target.
        #[arg(long)]
        all: bool,

        /// Comma-separated scanner names to run. Defaults to every
        /// registered scanner.
        #[arg(long, value_delimiter = ',')]
        scanners: Option<Vec<String>>,

        /// Print the full scan result instead of a one-line summary.
        #[arg(long)]
        verbose: bool,
    },

    /// Evaluate a scan artifact against gating rules.
    Gate {
        /// Fail (exit 1) when any violation is found, instead of just
        /// printing advisories.
        #[arg(long)]
        strict: bool,

        /// Scan artifact to evaluate. Defaults to the most recent combined
        /// scan artifact.
        #[arg(long)]
        artifact: Option<PathBuf>,
    },

    /// Report drift between declared and implemented scanners.
    Introspect {
        /// Root directory containing one subdirectory per scanner
        /// category. Defaults to the governance-relative `scanners`
        /// directory.
        #[arg(long)]
        scanners_root: Option<PathBuf>,
    },

    /// Generate an event-debt, event-gap, or project-drift report.
    Report {
        #[arg(value_enum)]
        kind: ReportKindArg,

        /// Filesystem target to scan for project discovery (drift report
        /// only). Defaults to the current directory.
        #[arg(long)]
        target: Option<PathBuf>,

        /// Directory to write report artifacts into. Defaults to the
        /// configured output directory.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Inspect the persisted project registry.
    Registry {
        #[command(subcommand)]
        command: RegistryCommands,
    },

    /// Resolve project identity against configured authorities.
    ReconcileIdentity {
        /// JSON file containing a list of repository inventory items.
        inventory: PathBuf,

        /// Directory containing governance override/authority files.
        /// Defaults to the current directory.
        #[arg(long)]
        governance_root: Option<PathBuf>,

        /// Write the resolved patch list alongside the identity scan
        /// result.
        #[arg(long)]
        emit_patches: bool,

        /// File to write the identity scan result to.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Apply previously derived identity patches to a CMP store.
    ApplyPatch {
        /// JSON file containing a list of identity patches.
        patches: PathBuf,

        /// JSON file backing the CMP target. Created if absent.
        #[arg(long)]
        cmp_store: Option<PathBuf>,

        /// Compute and print outcomes without persisting changes.
        #[arg(long)]
        dry_run: bool,
    },

    /// Audit internal consistency.
    Audit {
        #[command(subcommand)]
        command: AuditCommands,
    },
}

#[derive(Subcommand, Debug)]
enum RegistryCommands {
    /// Look up a single project by key or alias.
    Get {
        project_key: String,

        /// Registry file to read. Defaults to the configured registry
        /// path.
        #[arg(long)]
        registry: Option<PathBuf>,
    },
    /// Print registry-wide counts.
    Summary {
        #[arg(long)]
        registry: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum AuditCommands {
    /// Categorize registered projects by filesystem provenance.
    Uuids {
        #[arg(long)]
        registry: Option<PathBuf>,
    },
    /// Validate configuration and emit its JSON Schema.
    Deps {
        #[arg(long)]
        schema_output: Option<PathBuf>,
    },
    /// Check scanner registration uniqueness and artifact hygiene.
    Lock,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ReportKindArg {
    Debt,
    Gap,
    Drift,
    All,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("wd=debug")
    } else {
        EnvFilter::new("wd=info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Scan { target, all, scanners, verbose } => {
            cmd_scan::run(cli.config.as_deref(), target, all, scanners, verbose).await
        }
        Commands::Gate { strict, artifact } => cmd_gate::run(cli.config.as_deref(), strict, artifact),
        Commands::Introspect { scanners_root } => cmd_introspect::run(cli.config.as_deref(), scanners_root),
        Commands::Report { kind, target, output } => {
            cmd_report::run(cli.config.as_deref(), kind, target, output).await
        }
        Commands::Registry { command } => match command {
            RegistryCommands::Get { project_key, registry } => {
                cmd_registry::get(cli.config.as_deref(), &project_key, registry)
            }
            RegistryCommands::Summary { registry } => cmd_registry::summary(cli.config.as_deref(), registry),
        },
        Commands::ReconcileIdentity { inventory, governance_root, emit_patches, output } => {
            cmd_identity::reconcile(cli.config.as_deref(), &inventory, governance_root, emit_patches, output)
        }
        Commands::ApplyPatch { patches, cmp_store, dry_run } => {
            cmd_identity::apply(cli.config.as_deref(), &patches, cmp_store, dry_run)
        }
        Commands::Audit { command } => match command {
            AuditCommands::Uuids { registry } => cmd_audit::uuids(cli.config.as_deref(), registry),
            AuditCommands::Deps { schema_output } => cmd_audit::deps(cli.config.as_deref(), schema_output),
            AuditCommands::Lock => cmd_audit::lock(cli.config.as_deref()),
        },
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(EXIT_RUNTIME_ERROR);
    }
}
