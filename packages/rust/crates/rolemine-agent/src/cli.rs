use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rolemine")]
#[command(about = "Role mining: fingerprint clustering plus LLM-assisted role suggestions.")]
pub(crate) struct Cli {
    /// Override config directory (settings are read from `<conf>/rolemine/settings.yaml`).
    #[arg(long, global = true)]
    pub(crate) conf: Option<PathBuf>,

    /// Debug-level logging (ignored when RUST_LOG is set).
    #[arg(long, short, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Print collection counts of a dataset as JSON.
    Summary {
        /// Dataset JSON file.
        #[arg(long)]
        data: PathBuf,
    },
    /// Print applications and organizational units of a dataset as JSON.
    Metadata {
        /// Dataset JSON file.
        #[arg(long)]
        data: PathBuf,
    },
    /// Print the resolved generation-service and mining settings as JSON.
    Config,
    /// Derive roles by clustering and request suggestions; print both lists as JSON.
    Mine {
        /// Dataset JSON file.
        #[arg(long)]
        data: PathBuf,

        /// Minimum members per derived role (default from settings, else 2).
        #[arg(long)]
        min_members: Option<usize>,

        /// Maximum permissions per derived role (default from settings, else 10).
        #[arg(long)]
        max_permissions: Option<usize>,

        /// Restrict to roles touching this application id (repeatable).
        #[arg(long = "app")]
        apps: Vec<String>,

        /// Restrict to roles with a member in this org-unit id (repeatable).
        #[arg(long = "ou")]
        org_units: Vec<String>,

        /// Skip generated suggestions.
        #[arg(long)]
        no_ai: bool,

        /// Write the CSV report to this path.
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Interpret a saved model response (stdin when --input is omitted).
    Interpret {
        /// File holding the raw response text.
        #[arg(long)]
        input: Option<PathBuf>,
    },
}
