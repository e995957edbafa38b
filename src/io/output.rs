use std::path::Path;

use chrono::{DateTime, NaiveDateTime};
use csv::ReaderBuilder;
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::Array2;

use crate::config::VariableInfo;
use crate::error::{PlotError, Result};
use crate::io::ProjectPaths;
use crate::mesh::Mesh;
use crate::series::{FieldLocation, OutputSeries};

const TEXT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Reads one output variable of a run, preferring the binary `.dat` file and
/// falling back to the ASCII `.txt` file. `location` overrides where the
/// variable table says the values live.
pub fn read_output(
    paths: &ProjectPaths,
    var: &str,
    location: Option<FieldLocation>,
    mesh: &Mesh,
) -> Result<OutputSeries> {
    let info = VariableInfo::lookup(var)?;
    let location = location.unwrap_or(info.location);
    let columns = location.count(mesh);

    let binary = paths.binary_output(var);
    let (times, values) = if binary.exists() {
        println!("Reading {}", binary.display());
        read_binary(&binary, columns)?
    } else {
        let text = paths.text_output(var);
        println!("Reading {}", text.display());
        read_text(&text, columns)?
    };

    OutputSeries::new(times, values, info.name, info.unit, location)
}

/// Records of little-endian f64: `[seconds since epoch, v_1, ..., v_columns]`
pub fn read_binary(path: &Path, columns: usize) -> Result<(Vec<NaiveDateTime>, Array2<f64>)> {
    let bytes = std::fs::read(path)?;
    decode_binary(path, &bytes, columns)
}

fn decode_binary(
    path: &Path,
    bytes: &[u8],
    columns: usize,
) -> Result<(Vec<NaiveDateTime>, Array2<f64>)> {
    let record_bytes = (columns + 1) * 8;
    if bytes.len() % record_bytes != 0 {
        return Err(PlotError::ShapeMismatch {
            what: "trailing bytes",
            expected: 0,
            found: bytes.len() % record_bytes,
        });
    }
    let nrecords = bytes.len() / record_bytes;

    let pb = progress_bar(nrecords as u64);
    let mut times = Vec::with_capacity(nrecords);
    let mut values = Vec::with_capacity(nrecords * columns);
    for (i, record) in bytes.chunks_exact(record_bytes).enumerate() {
        let mut fields = record
            .chunks_exact(8)
            .map(|b| f64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]));
        // chunks_exact over a full record always yields the time field
        let seconds = fields.next().unwrap_or(f64::NAN);
        times.push(epoch_to_datetime(seconds).ok_or_else(|| PlotError::Parse {
            path: path.to_path_buf(),
            line: i + 1,
            message: format!("invalid timestamp {}", seconds),
        })?);
        values.extend(fields);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let found = values.len();
    let values = Array2::from_shape_vec((nrecords, columns), values).map_err(|_| {
        PlotError::ShapeMismatch {
            what: "values",
            expected: nrecords * columns,
            found,
        }
    })?;
    Ok((times, values))
}

/// Tab-separated rows: `"YYYY-MM-DD HH:MM"` then one column per location
pub fn read_text(path: &Path, columns: usize) -> Result<(Vec<NaiveDateTime>, Array2<f64>)> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut times = Vec::new();
    let mut values = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let parse_error = |message: String| PlotError::Parse {
            path: path.to_path_buf(),
            line: i + 1,
            message,
        };

        if record.len() != columns + 1 {
            return Err(PlotError::ShapeMismatch {
                what: "columns per row",
                expected: columns + 1,
                found: record.len(),
            });
        }

        let time = NaiveDateTime::parse_from_str(&record[0], TEXT_TIME_FORMAT)
            .map_err(|e| parse_error(format!("invalid timestamp '{}': {}", &record[0], e)))?;
        times.push(time);

        for field in record.iter().skip(1) {
            let v = field
                .parse::<f64>()
                .map_err(|_| parse_error(format!("invalid value '{}'", field)))?;
            values.push(v);
        }
    }

    let nrows = times.len();
    let found = values.len();
    let values = Array2::from_shape_vec((nrows, columns), values).map_err(|_| {
        PlotError::ShapeMismatch {
            what: "values",
            expected: nrows * columns,
            found,
        }
    })?;
    Ok((times, values))
}

fn epoch_to_datetime(seconds: f64) -> Option<NaiveDateTime> {
    if !seconds.is_finite() {
        return None;
    }
    DateTime::from_timestamp(seconds.round() as i64, 0).map(|dt| dt.naive_utc())
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} records")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}
