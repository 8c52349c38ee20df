//! `portal-charts` library crate.
//!
//! The binary (`charts`) is a thin wrapper around this library so that:
//!
//! - decoding, normalization and period switching are testable without a page
//! - chart configs can be built once and shown by any backend (text, TUI, JSON)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod chart;
pub mod cli;
pub mod dashboard;
pub mod dataset;
pub mod decode;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod store;
pub mod tui;
