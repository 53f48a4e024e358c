// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Argument parsing, logging setup, and command dispatch for `rigid-probe`.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::Table;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::report;
use crate::scene::{load_document, FsSceneSource, Scene};

/// Filter used when neither `--log-level` nor `RUST_LOG` is set.
const DEFAULT_LOG_FILTER: &str = "warn";

/// Probe convex collision geometry described by a JSON scene
#[derive(Parser, Debug)]
#[command(name = "rigid-probe", author, version, about)]
pub struct Cli {
    /// Path to the probe scene (JSON)
    #[arg(long)]
    pub scene: PathBuf,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    pub format: Format,
    /// Log filter directive (e.g. `debug`, `rigid_geom=trace`); overrides RUST_LOG
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Validate the scene and summarize its meshes
    Check,
    /// Print the world-space bounding box of every object
    Bounds,
    /// Cast every ray against every object and report the nearest hit
    Cast,
}

/// Report rendering.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Human-readable tables.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Parse arguments, install logging, and run the selected command.
pub fn entrypoint() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out)
}

/// Run `cli.command` and write its report to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let scene = open_scene(&cli.scene)?;
    match cli.command {
        Command::Check => {
            let report = report::check(&scene);
            if cli.format == Format::Text {
                writeln!(
                    out,
                    "scene ok: {} meshes, {} objects, {} rays",
                    report.meshes.len(),
                    report.objects,
                    report.rays
                )?;
            }
            emit(out, cli.format, &report, || report::check_table(&report))
        }
        Command::Bounds => {
            let rows = report::bounds(&scene);
            emit(out, cli.format, &rows, || report::bounds_table(&rows))
        }
        Command::Cast => {
            let rows = report::cast(&scene);
            let hits = rows.iter().filter(|r| r.hit.is_some()).count();
            info!(rays = rows.len(), hits, "cast complete");
            emit(out, cli.format, &rows, || report::cast_table(&rows))
        }
    }
}

fn open_scene(path: &Path) -> Result<Scene> {
    let base = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let key = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("invalid scene path {}", path.display()))?;
    let doc = load_document(&FsSceneSource::new(base), key)
        .with_context(|| format!("failed to load scene {}", path.display()))?;
    Scene::build(&doc).with_context(|| format!("invalid scene {}", path.display()))
}

fn emit<W, T, F>(out: &mut W, format: Format, value: &T, table: F) -> Result<()>
where
    W: Write,
    T: Serialize,
    F: FnOnce() -> Table,
{
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
        Format::Text => writeln!(out, "{}", table())?,
    }
    Ok(())
}

fn init_tracing(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid --log-level `{directive}`"))?,
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}
