//! Synthetic dataset generation: one headerless `index,category,payload` CSV per size class.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{BenchConfig, table_name};
use crate::errors::BenchError;

/// Bytes of a target row width reserved for the two numeric columns.
pub const ROW_OVERHEAD: usize = 16;

/// Categories are drawn from `0..CATEGORY_RANGE`.
pub const CATEGORY_RANGE: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub size: usize,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Raw payload bytes per row: the padded-base64 decoded length of `size - ROW_OVERHEAD` characters.
#[must_use]
pub fn payload_len(size: usize) -> usize {
    size.saturating_sub(ROW_OVERHEAD) / 4 * 3
}

/// Writes `rows` records for one size class, drawing payload bytes then the category per row.
///
/// # Errors
/// Returns the first CSV or I/O error.
pub fn write_rows<W: Write, R: Rng>(
    out: &mut W,
    rows: usize,
    size: usize,
    rng: &mut R,
) -> Result<(), BenchError> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    let mut payload = vec![0u8; payload_len(size)];
    for i in 0..rows {
        rng.fill_bytes(&mut payload);
        let category = rng.random_range(0..CATEGORY_RANGE);
        wtr.write_record(&[i.to_string(), category.to_string(), STANDARD.encode(&payload)])?;
        if i > 0 && i % 100_000 == 0 {
            log::debug!("{}: {} rows written", table_name(size), i);
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Generates every configured size class into `out_dir`, in order, from one seeded RNG stream.
///
/// Prints `Wrote <file> (<n> MiB).` to `stdout` after each file.
///
/// # Errors
/// Aborts on the first file creation, write or metadata error.
pub fn make_files<W: Write>(
    cfg: &BenchConfig,
    out_dir: &Path,
    stdout: &mut W,
) -> Result<Vec<GeneratedFile>, BenchError> {
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let mut generated = Vec::with_capacity(cfg.row_sizes.len());
    for &size in &cfg.row_sizes {
        let name = format!("{}.csv", table_name(size));
        let path = out_dir.join(&name);
        log::info!(
            "generating {} ({} rows, {} payload bytes per row)",
            path.display(),
            cfg.row_count,
            payload_len(size)
        );
        let mut w = BufWriter::new(File::create(&path)?);
        write_rows(&mut w, cfg.row_count, size, &mut rng)?;
        let file = w.into_inner().map_err(|e| BenchError::Io(e.into_error()))?;
        let bytes = file.metadata()?.len();
        writeln!(stdout, "Wrote {} ({:.2} MiB).", name, bytes as f64 / 1024.0 / 1024.0)?;
        generated.push(GeneratedFile { size, path, bytes });
    }
    Ok(generated)
}
