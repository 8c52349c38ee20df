//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - loads the dashboard page (file or portal URL)
//! - mounts the charts and prints, exports or shows them

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, ConfigArgs, DecodeArgs, RenderArgs, TuiArgs};
use crate::decode::try_decode;
use crate::error::AppError;

pub mod pipeline;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "CHARTS_LOG";

/// Entry point for the `charts` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // `charts` and `charts -p page.html` behave like `charts tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Render(args) => {
            init_logging(None)?;
            handle_render(args)
        }
        Command::Config(args) => {
            init_logging(None)?;
            handle_config(args)
        }
        Command::Decode(args) => {
            init_logging(None)?;
            handle_decode(args)
        }
        Command::Tui(args) => handle_tui(args),
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber: stderr by default, or `log_file` when given.
fn init_logging(log_file: Option<&Path>) -> Result<(), AppError> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter()).with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| AppError::input(format!("Failed to open log file '{}': {e}", path.display())))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    // A subscriber may already be set (tests); keep it.
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

fn handle_render(args: RenderArgs) -> Result<(), AppError> {
    let page = pipeline::load_page(&args.source)?;
    let dash = pipeline::mount_dashboard(&page, args.period);

    let registry = dash.backend();
    if registry.is_empty() {
        println!("No chart canvases found on the page.");
        return Ok(());
    }
    for chart in registry.iter() {
        println!(
            "{}",
            crate::plot::render_chart(&chart.canvas_id, &chart.config, args.width, args.height)
        );
    }
    Ok(())
}

fn handle_config(args: ConfigArgs) -> Result<(), AppError> {
    let page = pipeline::load_page(&args.source)?;
    let dash = pipeline::mount_dashboard(&page, args.period);

    match &args.export {
        Some(path) => crate::io::write_bundle_json(path, &dash)?,
        None => println!("{}", crate::io::bundle_json(&dash)?),
    }
    Ok(())
}

fn handle_decode(args: DecodeArgs) -> Result<(), AppError> {
    let fallback: Value = serde_json::from_str(&args.fallback)
        .map_err(|e| AppError::input(format!("Invalid --fallback JSON: {e}")))?;

    let (value, source) = match try_decode::<Value>(Some(&args.raw)) {
        Ok(decoded) => (decoded.value, decoded.source.as_str().to_string()),
        Err(err) => (fallback, format!("fallback ({err})")),
    };
    let text = serde_json::to_string_pretty(&value)
        .map_err(|e| AppError::runtime(format!("Failed to print decoded value: {e}")))?;

    println!("source: {source}");
    println!("{text}");
    Ok(())
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    // The terminal is owned by the TUI, so logs only go to a file.
    if let Some(path) = &args.log_file {
        init_logging(Some(path))?;
    }
    let page = pipeline::load_page(&args.source)?;
    crate::tui::run(&page, args.period)
}

/// Rewrite argv so `charts` defaults to `charts tui`.
///
/// Rules:
/// - `charts`                      -> `charts tui`
/// - `charts -p page.html ...`     -> `charts tui -p page.html ...`
/// - `charts --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "render" | "config" | "decode" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(argv(&["charts"])), argv(&["charts", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["charts", "-p", "dash.html"])),
            argv(&["charts", "tui", "-p", "dash.html"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(rewrite_args(argv(&["charts", "render"])), argv(&["charts", "render"]));
        assert_eq!(rewrite_args(argv(&["charts", "--help"])), argv(&["charts", "--help"]));
    }
}
