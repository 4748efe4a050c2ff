//! Data export
//!
//! Currently CSV only; the interface takes the grid and the batched value
//! field directly, so exporting a stepped result is one call.

pub mod csv;

pub use csv::{export_profiles_csv, CsvConfig};
