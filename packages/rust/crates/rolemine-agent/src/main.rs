//! rolemine CLI: dataset summary and metadata, effective config, mining run, or offline
//! response interpretation.
//!
//! Settings from `packages/conf/settings.yaml` and `<config home>/rolemine/settings.yaml`.
//!
//! Logging: set `RUST_LOG=rolemine_agent=info` (or `warn`, `debug`) to see logs on stderr.

mod cli;

use std::io::Read as _;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rolemine_agent::{
    DatasetMetadata, LlmClient, MiningOrchestrator, RoleGenerator, RuntimeSettings, load_dataset,
    load_runtime_settings, render_csv, set_config_home_override,
};
use rolemine_interpret::ResponseInterpreter;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(conf_dir) = cli.conf.clone() {
        set_config_home_override(conf_dir);
    }

    // RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "rolemine_agent=debug,rolemine_cluster=debug,rolemine_interpret=debug"
        } else {
            "rolemine_agent=info,rolemine_cluster=info,rolemine_interpret=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let runtime_settings = load_runtime_settings();

    match cli.command {
        Command::Summary { data } => {
            let ctx = load_dataset(&data)?;
            println!("{}", serde_json::to_string_pretty(&ctx.summary())?);
            Ok(())
        }
        Command::Metadata { data } => {
            let ctx = load_dataset(&data)?;
            let metadata = DatasetMetadata::of(&ctx);
            println!("{}", serde_json::to_string_pretty(&metadata)?);
            Ok(())
        }
        Command::Config => {
            println!(
                "{}",
                serde_json::to_string_pretty(&runtime_settings.effective())?
            );
            Ok(())
        }
        Command::Mine {
            data,
            min_members,
            max_permissions,
            apps,
            org_units,
            no_ai,
            report,
        } => {
            let ctx = load_dataset(&data)?;
            let mut filters = runtime_settings.mining_filters();
            if let Some(n) = min_members {
                filters.min_members_per_role = n;
            }
            if let Some(n) = max_permissions {
                filters.max_permissions_per_role = n;
            }
            if !apps.is_empty() {
                filters = filters.with_application_scope(apps);
            }
            if !org_units.is_empty() {
                filters = filters.with_org_unit_scope(org_units);
            }
            if no_ai {
                filters.use_ai = false;
            }

            let generator = if filters.use_ai {
                build_generator(&runtime_settings)?
            } else {
                None
            };
            let mut orchestrator = MiningOrchestrator::new(generator);
            let outcome = orchestrator.mine(&ctx, &filters).await;

            if let Some(path) = report {
                write_report(&path, &orchestrator)?;
            }
            let output = serde_json::json!({
                "outcome": outcome,
                "derived": orchestrator.latest_derived(),
                "suggested": orchestrator.latest_suggested(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Command::Interpret { input } => {
            let text = match input {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("failed to read stdin")?;
                    buf
                }
            };
            let interpretation = ResponseInterpreter::new().interpret_detailed(Some(&text));
            let output = serde_json::json!({
                "source": interpretation.source.as_str(),
                "roles": interpretation.roles,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
    }
}

fn build_generator(settings: &RuntimeSettings) -> Result<Option<Arc<dyn RoleGenerator>>> {
    let config = settings.llm_config();
    if !config.is_usable() {
        tracing::info!(
            event = "mining.generator.unavailable",
            api_key_env = %config.api_key_env,
            "no API key for remote endpoint; suggestions will use the fallback set"
        );
        return Ok(None);
    }
    tracing::info!(
        event = "mining.generator.configured",
        inference_url = %config.inference_url,
        model = %config.model,
        timeout_secs = config.timeout_secs,
        "generation service configured"
    );
    let client: Arc<dyn RoleGenerator> = Arc::new(LlmClient::new(&config)?);
    Ok(Some(client))
}

fn write_report(path: &Path, orchestrator: &MiningOrchestrator) -> Result<()> {
    let csv = render_csv(&orchestrator.report_rows());
    std::fs::write(path, csv).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(
        event = "report.written",
        path = %path.display(),
        "role report written"
    );
    Ok(())
}
