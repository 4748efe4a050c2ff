//! Profile plots over the spatial grid
//!
//! Plots the batched value field against the grid coordinates, one line per
//! batch row. The backend is chosen from the output path's extension:
//! `.svg` gets the SVG backend, everything else is rendered as a bitmap.
//!
//! # Example
//!
//! ```rust,ignore
//! use parab_rs::output::visualization::{plot_profiles, PlotConfig};
//!
//! let mut config = PlotConfig::default();
//! config.title = "Option values".to_string();
//! plot_profiles(&grid, &values, &["call", "put"], "prices.png", Some(&config))?;
//! ```

use nalgebra::DMatrix;
use plotters::prelude::*;
use std::error::Error;

use crate::physics::grid::Grid1D;

// =================================================================================================
// Configuration
// =================================================================================================

/// Configuration for customizing profile plots
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Solution profile")
    pub title: String,

    /// X-axis label (default: "x")
    pub xlabel: String,

    /// Y-axis label (default: "V")
    pub ylabel: String,

    /// Series colors, cycled when there are more batch rows than colors
    ///
    /// Default palette: [RED, BLUE, GREEN, MAGENTA, CYAN, BLACK]
    pub series_colors: Vec<RGBColor>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Solution profile".to_string(),
            xlabel: "x".to_string(),
            ylabel: "V".to_string(),
            series_colors: vec![RED, BLUE, GREEN, MAGENTA, CYAN, BLACK],
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

// =================================================================================================
// Plotting
// =================================================================================================

/// Plot a batched value field over the grid, one series per batch row
///
/// # Errors
///
/// Shape mismatches between grid, values and labels, and any drawing error
/// from the plotters backend.
pub fn plot_profiles(
    grid: &Grid1D,
    values: &DMatrix<f64>,
    labels: &[&str],
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
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
        return Err(format!("Got {} labels for {} batch rows", labels.len(), batch).into());
    }

    let default_config = PlotConfig::default();
    let config = config.unwrap_or(&default_config);

    // Determine backend from the extension and plot
    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_profiles_impl(backend, grid, values, labels, config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_profiles_impl(backend, grid, values, labels, config)
        }
    }
}

/// Implementation with a concrete backend
fn plot_profiles_impl<DB: DrawingBackend>(
    backend: DB,
    grid: &Grid1D,
    values: &DMatrix<f64>,
    labels: &[&str],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let (batch, _) = values.shape();

    let y_min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let y_max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    // Keep a visible band even for a constant field
    let pad = ((y_max - y_min).abs()).max(1e-10) * 0.05;

    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(grid.lower()..grid.upper(), (y_min - pad)..(y_max + pad))?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.3}", x))
            .y_label_formatter(&|y| format!("{:.3}", y))
            .draw()?;
    }

    for k in 0..batch {
        let color = config.series_colors[k % config.series_colors.len()];
        chart
            .draw_series(LineSeries::new(
                (0..grid.len()).map(|j| (grid.coords()[j], values[(k, j)])),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(labels[k])
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color)
            });
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
