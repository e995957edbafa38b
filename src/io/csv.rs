use std::fs::File;
use std::path::Path;

use csv::{Writer, WriterBuilder};
use serde::Serialize;

use crate::error::Result;
use crate::figure::TimeSeriesFigure;

// One row of the exported domain-average series
#[derive(Debug, Serialize)]
struct AverageRecord {
    time: String,
    spatial_average: f64,
}

// Create CSV writer with headers
pub fn create_csv_writer(path: &Path) -> Result<Writer<File>> {
    let wtr = WriterBuilder::new().has_headers(true).from_path(path)?;
    Ok(wtr)
}

/// Writes the domain-averaged value at each output time
pub fn write_spatial_average(path: &Path, figure: &TimeSeriesFigure) -> Result<()> {
    let mut wtr = create_csv_writer(path)?;
    for (time, value) in &figure.points {
        wtr.serialize(AverageRecord {
            time: time.format("%Y-%m-%d %H:%M").to_string(),
            spatial_average: *value,
        })?;
    }
    wtr.flush()?;
    println!("Spatial averages saved to {}", path.display());
    Ok(())
}
