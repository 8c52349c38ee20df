//! Command-line parsing for the portal chart renderer.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! page loading and chart code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::Period;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "charts", version, about = "Donation dashboard charts from portal pages")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Mount the page's charts and draw them as text.
    Render(RenderArgs),
    /// Print (or export) the chart configs a browser would receive.
    Config(ConfigArgs),
    /// Run the tolerant decoder on one raw attribute value.
    Decode(DecodeArgs),
    /// Launch the interactive TUI.
    Tui(TuiArgs),
}

/// Where the dashboard page comes from.
#[derive(Debug, Args, Clone, Default)]
pub struct PageSource {
    /// Page file: HTML, or a `.json` attribute map. `--url` takes precedence.
    #[arg(short = 'p', long, env = "PORTAL_PAGE", value_name = "FILE")]
    pub page: Option<PathBuf>,

    /// Page path (or full URL) fetched from `PORTAL_BASE_URL`.
    #[arg(short = 'u', long, value_name = "PATH")]
    pub url: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: PageSource,

    /// Switch the trend chart to this period before drawing.
    #[arg(long, value_enum)]
    pub period: Option<Period>,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

#[derive(Debug, Args, Clone)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub source: PageSource,

    /// Switch the trend chart to this period before exporting.
    #[arg(long, value_enum)]
    pub period: Option<Period>,

    /// Write the config bundle to a JSON file instead of stdout.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct DecodeArgs {
    /// Raw attribute text, as found in the page.
    pub raw: String,

    /// JSON value returned when decoding fails.
    #[arg(long, value_name = "JSON", default_value = "null")]
    pub fallback: String,
}

#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub source: PageSource,

    /// Initial trend period.
    #[arg(long, value_enum)]
    pub period: Option<Period>,

    /// Append log output to this file (the terminal is busy drawing).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_render_with_period() {
        let cli = Cli::try_parse_from(["charts", "render", "--page", "dash.html", "--period", "month"]).unwrap();
        let Command::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.source.page, Some(PathBuf::from("dash.html")));
        assert_eq!(args.period, Some(Period::Month));
        assert_eq!((args.width, args.height), (100, 25));
    }

    #[test]
    fn url_is_accepted_with_page_from_environment() {
        // SAFETY: this is the only test that sets PORTAL_PAGE; every other parse
        // either passes --page explicitly or has no page argument.
        unsafe { std::env::set_var("PORTAL_PAGE", "dash.html") };
        let parsed = Cli::try_parse_from(["charts", "render", "--url", "/org/dashboard/"]);
        unsafe { std::env::remove_var("PORTAL_PAGE") };

        let Command::Render(args) = parsed.unwrap().command else {
            panic!("expected render");
        };
        assert_eq!(args.source.url.as_deref(), Some("/org/dashboard/"));
        assert_eq!(args.source.page, Some(PathBuf::from("dash.html")));
    }

    #[test]
    fn decode_fallback_defaults_to_null() {
        let cli = Cli::try_parse_from(["charts", "decode", "[1,2]"]).unwrap();
        let Command::Decode(args) = cli.command else {
            panic!("expected decode");
        };
        assert_eq!(args.raw, "[1,2]");
        assert_eq!(args.fallback, "null");
    }
}
