//! CSV export of solution profiles
//!
//! Writes the grid coordinates and one column per batch row, compatible
//! with Excel, pandas, MATLAB and gnuplot.
//!
//! # Quick Example
//!
//! ```rust,ignore
//! use parab_rs::output::export::export_profiles_csv;
//!
//! // values: [2, N] field holding a call and a put profile
//! export_profiles_csv(&grid, &values, &["call", "put"], "prices.csv", None)?;
//! ```
//!
//! **Output** (`prices.csv`):
//! ```csv
//! x,call,put
//! 1.000000,0.000000,98.019867
//! ...
//! ```

use nalgebra::DMatrix;
use std::error::Error;
use std::fs::File;
use std::io::Write;

use crate::physics::grid::Grid1D;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use parab_rs::output::export::CsvConfig;
///
/// let config = CsvConfig::default().delimiter(';').precision(10);
/// assert_eq!(config.delimiter, ';');
/// ```
#[derive(Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Write the header row (default: true)
    pub include_header: bool,

    /// Header for the coordinate column (default: "x")
    pub coordinate_header: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            precision: 6,
            include_header: true,
            coordinate_header: "x".to_string(),
        }
    }
}

impl CsvConfig {
    /// Create config with high precision (12 decimal places)
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}

// =============================================================================
// Export
// =============================================================================

/// Export a batched value field as CSV, one column per batch row
///
/// # Arguments
///
/// * `grid` - the spatial grid; becomes the first column
/// * `values` - `[batch, grid.len()]` field
/// * `labels` - one column label per batch row
/// * `output_path` - destination file
/// * `config` - formatting options, `None` for defaults
///
/// # Errors
///
/// Shape mismatches between grid, values and labels; non-finite values in
/// the field; I/O errors from the filesystem.
pub fn export_profiles_csv(
    grid: &Grid1D,
    values: &DMatrix<f64>,
    labels: &[&str],
    output_path: &str,
    config: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = CsvConfig::default();
    let config = config.unwrap_or(&default_config);

    let (batch, cols) = values.shape();
    if cols != grid.len() {
        return Err(format!(
            "Value field has {} columns but the grid has {} points",
            cols,
            grid.len()
        )
        .into());
    }
    if labels.len() != batch {
        return Err(format!(
            "Got {} labels for {} batch rows",
            labels.len(),
            batch
        )
        .into());
    }
    if values.iter().any(|x| !x.is_finite()) {
        return Err("Value field contains NaN or infinite entries".into());
    }

    let mut file = File::create(output_path)?;

    if config.include_header {
        let mut header = config.coordinate_header.clone();
        for label in labels {
            header.push(config.delimiter);
            header.push_str(label);
        }
        writeln!(file, "{}", header)?;
    }

    let precision = config.precision;
    for j in 0..cols {
        let mut line = format!("{:.*}", precision, grid.coords()[j]);
        for k in 0..batch {
            line.push(config.delimiter);
            line.push_str(&format!("{:.*}", precision, values[(k, j)]));
        }
        writeln!(file, "{}", line)?;
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
