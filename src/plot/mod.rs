//! Drawing the figures with `plotters`.
//!
//! Each chart implements [`Draw`] against any drawing backend, so the same
//! code renders SVG and PNG output.

mod spatial;
mod timeseries;

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};

use crate::config::{OutputFormat, PlotConfig};
use crate::error::{PlotError, Result};

pub use spatial::SpatialPlot;
pub use timeseries::TimeSeriesPlot;

pub trait Draw {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>;
}

/// Renders `plot` to `path` in the requested format
pub fn render(plot: &impl Draw, path: &Path, format: OutputFormat, config: &PlotConfig) -> Result<()> {
    let size = (config.width, config.height);
    match format {
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            plot.draw(&root)?;
            root.present().map_err(render_error)?;
        }
        OutputFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            plot.draw(&root)?;
            root.present().map_err(render_error)?;
        }
    }
    println!("Saved {}", path.display());
    Ok(())
}

pub(crate) fn render_error(err: impl std::fmt::Display) -> PlotError {
    PlotError::Render(err.to_string())
}

pub(crate) fn font(config: &PlotConfig, size: u32) -> FontDesc<'_> {
    FontDesc::new(
        FontFamily::from(config.font_family.as_str()),
        size as f64,
        FontStyle::Normal,
    )
}
