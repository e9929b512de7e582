//! aperf-plot: charts APERF cycle measurements against instruction count.
//!
//! Input files hold one `<N>: min=<f> avg=<f> max=<f>` line per benchmark
//! point. The crate parses them into parallel sequences, lays out a line
//! chart with min/avg/max series, and draws it through a `Renderer` backend:
//! Cairo for PNG output, GTK4 for an interactive window.

pub mod api;
pub mod cli;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{ChartConfig, CycleChart};
pub use core::{Measurement, MeasurementSet, parse_measurements, read_measurements};
pub use error::{PlotError, PlotResult};
