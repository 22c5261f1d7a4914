//! Projection persistence.
//!
//! Binary layout (little-endian):
//! `rows: u32`, `cols: u32`, then `rows * cols` `f64` values in column-major
//! order.
//!
//! CSV layout: one line per row of `W`, every entry followed by a comma,
//! written with 17 significant digits so values survive a round trip.
//!
//! Reads decode the whole payload before touching the projection, so a
//! failed read leaves `W` and the target dimension as they were.

use super::ProjSecant;
use crate::io::ensure_parent_dir;
use crate::types::Projection;
use nalgebra::DMatrix;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Writes `w` in the binary layout.
pub fn encode_binary<W: Write>(w: &Projection, mut out: W) -> std::io::Result<()> {
    let rows = u32::try_from(w.nrows())
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::InvalidInput, "too many rows"))?;
    let cols = u32::try_from(w.ncols())
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::InvalidInput, "too many columns"))?;
    out.write_all(&rows.to_le_bytes())?;
    out.write_all(&cols.to_le_bytes())?;
    for v in w.iter() {
        out.write_all(&v.to_le_bytes())?;
    }
    out.flush()
}

/// Reads a matrix in the binary layout.
pub fn decode_binary<R: Read>(mut input: R) -> Result<Projection, String> {
    let mut word = [0u8; 4];
    input
        .read_exact(&mut word)
        .map_err(|e| format!("Failed to read row count: {e}"))?;
    let rows = u32::from_le_bytes(word) as usize;
    input
        .read_exact(&mut word)
        .map_err(|e| format!("Failed to read column count: {e}"))?;
    let cols = u32::from_le_bytes(word) as usize;
    let len = rows
        .checked_mul(cols)
        .ok_or_else(|| format!("Matrix size {rows}×{cols} overflows"))?;

    let mut values = Vec::with_capacity(len.min(1 << 20));
    let mut buf = [0u8; 8];
    for k in 0..len {
        input
            .read_exact(&mut buf)
            .map_err(|e| format!("Failed to read entry {k} of {len}: {e}"))?;
        values.push(f64::from_le_bytes(buf));
    }
    Ok(DMatrix::from_vec(rows, cols, values))
}

/// Writes `w` in the CSV layout.
pub fn encode_csv<W: Write>(w: &Projection, mut out: W) -> std::io::Result<()> {
    for r in 0..w.nrows() {
        for c in 0..w.ncols() {
            write!(out, "{:.16e},", w[(r, c)])?;
        }
        writeln!(out)?;
    }
    out.flush()
}

/// Reads a matrix in the CSV layout; a trailing comma per line is optional.
pub fn decode_csv<R: BufRead>(input: R) -> Result<Projection, String> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (lineno, line) in input.lines().enumerate() {
        let line = line.map_err(|e| format!("Failed to read line {}: {e}", lineno + 1))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row = line
            .split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .map(|field| {
                field
                    .parse::<f64>()
                    .map_err(|e| format!("Invalid value '{field}' on line {}: {e}", lineno + 1))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(format!(
                    "Line {} has {} values, expected {}",
                    lineno + 1,
                    row.len(),
                    first.len()
                ));
            }
        }
        rows.push(row);
    }
    let cols = rows.first().map_or(0, Vec::len);
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    Ok(DMatrix::from_row_slice(rows.len(), cols, &flat))
}

impl ProjSecant {
    pub fn write_binary(&self, path: &Path) -> Result<(), String> {
        ensure_parent_dir(path)?;
        let file =
            File::create(path).map_err(|e| format!("Failed to create {}: {e}", path.display()))?;
        encode_binary(&self.w, BufWriter::new(file))
            .map_err(|e| format!("Failed to write {}: {e}", path.display()))
    }

    /// Loads `W` from a binary file; the target dimension follows the column count.
    pub fn read_binary(&mut self, path: &Path) -> Result<(), String> {
        let file = File::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
        let w = decode_binary(BufReader::new(file))
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        self.set_projection(w)
            .map_err(|e| format!("Failed to load {}: {e}", path.display()))
    }

    pub fn write_csv(&self, path: &Path) -> Result<(), String> {
        ensure_parent_dir(path)?;
        let file =
            File::create(path).map_err(|e| format!("Failed to create {}: {e}", path.display()))?;
        encode_csv(&self.w, BufWriter::new(file))
            .map_err(|e| format!("Failed to write {}: {e}", path.display()))
    }

    pub fn read_csv(&mut self, path: &Path) -> Result<(), String> {
        let file = File::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
        let w = decode_csv(BufReader::new(file))
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        self.set_projection(w)
            .map_err(|e| format!("Failed to load {}: {e}", path.display()))
    }
}
