//! Static plot generation for solution profiles
//!
//! Uses the `plotters` library to generate PNG or SVG images of the stepped
//! value field over the grid, one series per batch row.

pub mod profile;

pub use profile::{plot_profiles, PlotConfig};
