mod cli;
mod error_fmt;
mod run;

use clap::Parser;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;

use crate::cli::{Cli, Commands, JSON_MODE};
use crate::error_fmt::{exit_code_for_error, format_error_json, humanize};
use stepper_config::{Config, Logging};
use stepper_core::{Preset, StepperCfg};

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(err) = real_main(&cli) {
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", format_error_json(&err));
        } else {
            eprintln!("{}", humanize(&err));
        }
        tracing::debug!(error = ?err, "command failed");
        std::process::exit(exit_code_for_error(&err));
    }
}

fn real_main(cli: &Cli) -> eyre::Result<()> {
    color_eyre::install()?;

    let config = match &cli.config {
        Some(path) => stepper_config::load_file(path)?,
        None => Config::default(),
    };
    // Dropped on return so the file writer flushes before exit.
    let _log_guard = init_tracing(cli, &config.logging)?;

    let base = cli
        .preset
        .map(Preset::from)
        .or_else(|| config.stepper.preset.map(Preset::from))
        .unwrap_or_default();
    let cfg = StepperCfg::with_overrides(base, &config.stepper);
    tracing::debug!(preset = base.name(), ?cfg, "effective config");

    match &cli.cmd {
        Commands::Hold {
            start,
            direction,
            hold_ms,
            realtime,
        } => run::hold(
            cfg,
            *start,
            (*direction).into(),
            *hold_ms,
            *realtime,
            cli.json,
        ),
        Commands::Click {
            start,
            direction,
            count,
        } => run::click(cfg, *start, (*direction).into(), *count, cli.json),
        Commands::Set { value } => run::set(cfg, *value, cli.json),
        Commands::Replay { script, start } => run::replay_script(cfg, script, *start, cli.json),
        Commands::Curve { samples } => run::curve(&cfg, *samples, cli.json),
    }
}

/// Console logs go to stderr (pretty, or JSON with --json). An optional
/// `[logging].file` adds a JSON-lines file sink via tracing-appender.
fn init_tracing(cli: &Cli, logging: &Logging) -> eyre::Result<Option<WorkerGuard>> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    // --log-level beats RUST_LOG, which beats [logging].level
    let filter = match cli.log_level.as_deref() {
        Some(level) => EnvFilter::try_new(level)?,
        None => match EnvFilter::try_from_default_env() {
            Ok(f) => f,
            Err(_) => EnvFilter::try_new(logging.level.as_deref().unwrap_or("warn"))?,
        },
    };

    let (pretty, json) = if cli.json {
        (
            None,
            Some(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(false),
            ),
        )
    } else {
        (
            Some(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            ),
            None,
        )
    };

    let mut file_guard = None;
    let file = match logging.file.as_deref() {
        Some(path) => {
            let path = Path::new(path);
            let dir = path
                .parent()
                .filter(|d| !d.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| eyre::eyre!("logging.file {path:?} has no file name"))?;
            let appender = match logging.rotation.as_deref() {
                Some("daily") => tracing_appender::rolling::daily(dir, name),
                Some("hourly") => tracing_appender::rolling::hourly(dir, name),
                _ => tracing_appender::rolling::never(dir, name),
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            file_guard = Some(guard);
            Some(fmt::layer().json().with_ansi(false).with_writer(writer))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .with(file)
        .try_init()
        .map_err(|e| eyre::eyre!("init logging: {e}"))?;
    Ok(file_guard)
}
