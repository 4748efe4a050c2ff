//! Output of stepped solution fields
//!
//! Tools to get solution profiles out of the crate in various formats:
//! - **Export**: CSV data for external analysis (pandas, Excel, gnuplot)
//! - **Visualization**: static PNG/SVG profile plots using plotters
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── export/             ← Data export
//! │   ├── mod.rs
//! │   └── csv.rs
//! └── visualization/      ← Plots
//!     ├── mod.rs
//!     └── profile.rs
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use parab_rs::output::export::{export_profiles_csv, CsvConfig};
//! use parab_rs::output::visualization::{plot_profiles, PlotConfig};
//!
//! // Export the stepped field to CSV
//! export_profiles_csv(&grid, &values, &["call", "put"], "prices.csv", None)?;
//!
//! // Plot the profiles
//! plot_profiles(&grid, &values, &["call", "put"], "prices.png", None)?;
//! ```
//!
//! Both sub-modules take the grid and the `[batch, N]` value field directly;
//! each batch row becomes one column (CSV) or one series (plot).

pub mod export;
pub mod visualization;
