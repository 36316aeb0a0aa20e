//! ESRI ASCII grid reader.
//!
//! ```text
//! ncols        4
//! nrows        3
//! xllcorner    100.0
//! yllcorner    40.0
//! cellsize     0.5
//! NODATA_value -9999
//! 1 2 3 4
//! ...
//! ```
//!
//! Header keys are case-insensitive. The origin may be given as the
//! lower-left corner (`xllcorner`/`yllcorner`) or as the centre of the
//! lower-left cell (`xllcenter`/`yllcenter`). Samples follow row by row,
//! north row first.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::error::IngestError;
use crate::grid::{Georeference, RasterGrid};
use crate::value::GridValue;

/// Result type for grid ingest.
pub type IngestResult<T> = std::result::Result<T, IngestError>;

/// Header with the origin already moved onto cell centres.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AsciiGridHeader {
    cols: usize,
    rows: usize,
    /// x of the first column's cell centres.
    west: f64,
    /// y of the last (southern) row's cell centres.
    south: f64,
    cell_size: f64,
    nodata: Option<f64>,
}

impl AsciiGridHeader {
    fn north(&self) -> f64 {
        self.south + (self.rows - 1) as f64 * self.cell_size
    }
}

#[derive(Debug, Clone, Copy)]
enum Origin {
    Corner(f64),
    Center(f64),
}

#[derive(Default)]
struct HeaderBuilder {
    cols: Option<usize>,
    rows: Option<usize>,
    x: Option<Origin>,
    y: Option<Origin>,
    cell_size: Option<f64>,
    nodata: Option<f64>,
}

impl HeaderBuilder {
    fn set(&mut self, key: &str, value: &str) -> IngestResult<()> {
        match key.to_ascii_lowercase().as_str() {
            "ncols" => self.cols = Some(parse_count("ncols", value)?),
            "nrows" => self.rows = Some(parse_count("nrows", value)?),
            "xllcorner" => self.x = Some(Origin::Corner(parse_float("xllcorner", value)?)),
            "xllcenter" => self.x = Some(Origin::Center(parse_float("xllcenter", value)?)),
            "yllcorner" => self.y = Some(Origin::Corner(parse_float("yllcorner", value)?)),
            "yllcenter" => self.y = Some(Origin::Center(parse_float("yllcenter", value)?)),
            "cellsize" => {
                let size = parse_float("cellsize", value)?;
                if !(size > 0.0) {
                    return Err(invalid("cellsize", value));
                }
                self.cell_size = Some(size);
            }
            "nodata_value" => self.nodata = Some(parse_float("nodata_value", value)?),
            _ => return Err(IngestError::UnknownHeader(key.to_string())),
        }
        Ok(())
    }

    fn build(self) -> IngestResult<AsciiGridHeader> {
        let cols = self.cols.ok_or(IngestError::MissingHeader("ncols"))?;
        let rows = self.rows.ok_or(IngestError::MissingHeader("nrows"))?;
        let x = self.x.ok_or(IngestError::MissingHeader("xllcorner"))?;
        let y = self.y.ok_or(IngestError::MissingHeader("yllcorner"))?;
        let cell_size = self.cell_size.ok_or(IngestError::MissingHeader("cellsize"))?;

        let centre = |origin| match origin {
            Origin::Corner(v) => v + cell_size / 2.0,
            Origin::Center(v) => v,
        };
        Ok(AsciiGridHeader {
            cols,
            rows,
            west: centre(x),
            south: centre(y),
            cell_size,
            nodata: self.nodata,
        })
    }
}

fn invalid(key: &'static str, value: &str) -> IngestError {
    IngestError::InvalidHeader {
        key,
        value: value.to_string(),
    }
}

fn parse_count(key: &'static str, value: &str) -> IngestResult<usize> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid(key, value)),
    }
}

fn parse_float(key: &'static str, value: &str) -> IngestResult<f64> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(invalid(key, value)),
    }
}

fn is_header_line(line: &str) -> bool {
    line.trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
}

/// Read an ASCII grid from any buffered reader.
pub fn read_ascii_grid<T: GridValue, R: BufRead>(reader: R) -> IngestResult<RasterGrid<T>> {
    let mut lines = reader.lines();
    let mut builder = HeaderBuilder::default();
    let mut pending = None;

    for line in lines.by_ref() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if !is_header_line(&line) {
            pending = Some(line);
            break;
        }
        let mut parts = line.split_whitespace();
        let key = parts.next().unwrap_or_default();
        let value = parts.next().unwrap_or_default();
        builder.set(key, value)?;
    }

    let header = builder.build()?;
    debug!(
        cols = header.cols,
        rows = header.rows,
        west = header.west,
        south = header.south,
        cell_size = header.cell_size,
        nodata = ?header.nodata,
        "Parsed ASCII grid header"
    );

    let expected = header
        .rows
        .checked_mul(header.cols)
        .ok_or_else(|| invalid("nrows", &header.rows.to_string()))?;
    let mut data: Vec<T> = Vec::with_capacity(expected);

    let body = pending.into_iter().map(Ok).chain(lines);
    for line in body {
        let line = line?;
        for token in line.split_whitespace() {
            if data.len() == expected {
                return Err(IngestError::TooManySamples { expected });
            }
            let value: f64 = token.parse().map_err(|_| IngestError::InvalidSample {
                index: data.len(),
                token: token.to_string(),
            })?;
            if header.nodata == Some(value) {
                data.push(T::VOID);
            } else {
                data.push(T::from_sample(value));
            }
        }
    }

    if data.len() < expected {
        return Err(IngestError::TooFewSamples {
            expected,
            actual: data.len(),
        });
    }

    let georef = Georeference::new(header.west, header.north(), header.cell_size)?;
    Ok(RasterGrid::from_data(header.rows, header.cols, georef, data)?)
}

/// Parse an ASCII grid held in memory.
pub fn parse_ascii_grid<T: GridValue>(text: &str) -> IngestResult<RasterGrid<T>> {
    read_ascii_grid(text.as_bytes())
}

/// Read an ASCII grid file from disk.
pub fn read_ascii_grid_file<T: GridValue>(path: impl AsRef<Path>) -> IngestResult<RasterGrid<T>> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Reading ASCII grid");
    let file = File::open(path)?;
    read_ascii_grid(BufReader::new(file))
}

/// Read an ASCII grid from an unbuffered source.
pub fn read_ascii_grid_from<T: GridValue, R: Read>(source: R) -> IngestResult<RasterGrid<T>> {
    read_ascii_grid(BufReader::new(source))
}
