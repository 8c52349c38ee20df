//! Text rendering of chart configs.

pub mod ascii;

pub use ascii::render_chart;
