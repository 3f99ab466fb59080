// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Strax runner - analytical export and section update from the shell.
//!
//! Drives the exchange engines against an in-memory model loaded from a
//! JSON model document:
//!
//! - `strax export --model tower.json` writes a timestamped analytical
//!   snapshot.
//! - `strax update --model tower.json --input updated_sections.json`
//!   applies externally edited section assignments back to the model.
//!
//! A fatal run error (unreadable input, missing transaction capability,
//! aborted transaction) exits non-zero; a run that completes with partial
//! skips exits zero and reports the counts.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use strax_engine::outdir::ensure_output_dir;
use strax_engine::{run_update, Exporter, UpdateOptions};
use strax_provider::MemoryModel;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "strax", version, about = "Analytical model export and section round-trip")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export the analytical model to a snapshot document
    Export {
        /// Model document to read
        #[arg(long)]
        model: PathBuf,
        /// Output directory (overrides STRAX_EXPORT_DIR)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Apply section changes from an edited snapshot
    Update {
        /// Model document to read and mutate
        #[arg(long)]
        model: PathBuf,
        /// Update input document (overrides STRAX_UPDATE_JSON)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Skip synchronize-with-central even for workshared models
        #[arg(long)]
        no_sync: bool,
        /// Folder for the timestamped model copy (overrides STRAX_SAVEAS_DIR)
        #[arg(long)]
        saveas_dir: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();
    tracing::info!(
        auto_sync = config.auto_sync,
        export_dir = ?config.export_dir,
        saveas_dir = ?config.saveas_dir,
        "starting strax runner"
    );
    let cli = Cli::parse();

    match cli.command {
        Command::Export { model, out_dir } => export(&config, &model, out_dir),
        Command::Update {
            model,
            input,
            no_sync,
            saveas_dir,
        } => update(&config, &model, input, no_sync, saveas_dir),
    }
}

fn load_model(path: &Path) -> anyhow::Result<MemoryModel> {
    MemoryModel::read_from(path)
        .with_context(|| format!("could not load model document {}", path.display()))
}

fn export(config: &Config, model_path: &Path, out_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let model = load_model(model_path)?;
    let out_dir = out_dir.or_else(|| config.export_dir.clone());
    let out_dir = ensure_output_dir(out_dir.as_deref());

    let outcome = Exporter::new(&model, out_dir).export()?;
    println!(
        "Export complete: {} members, {} nodes -> {}",
        outcome.result.counts.members_total,
        outcome.result.counts.nodes_seen,
        outcome.snapshot_path.display()
    );
    Ok(())
}

fn update(
    config: &Config,
    model_path: &Path,
    input: Option<PathBuf>,
    no_sync: bool,
    saveas_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut model = load_model(model_path)?;

    let input = input
        .or_else(|| config.update_input.clone())
        .context("no update input given (pass --input or set STRAX_UPDATE_JSON)")?;

    let options = UpdateOptions {
        auto_sync: !no_sync && config.auto_sync,
        saveas_dir: saveas_dir
            .or_else(|| config.saveas_dir.clone())
            .unwrap_or_else(|| ensure_output_dir(None)),
        cli_mode: true,
    };

    let status = run_update(&mut model, &input, &options)?;
    println!(
        "Update complete: processed={} changed={} unchanged={} missing_symbol={} no_host={}",
        status.counts.processed,
        status.counts.changed,
        status.counts.unchanged,
        status.counts.missing_symbol,
        status.counts.no_host
    );
    if let Some(path) = &status.saveas_path {
        println!("Model copy saved to {path}");
    }
    Ok(())
}
