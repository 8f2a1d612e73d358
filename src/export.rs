use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use serde::Serialize;
use tracing::info;

use crate::csv;
use crate::{KeyFields, PhoneDetails};

/// Where a run writes its results.
#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub dir: PathBuf,
    pub full_json: PathBuf,
    pub key_fields_json: PathBuf,
    pub key_fields_csv: PathBuf,
}

impl ExportPaths {
    /// Default file names inside `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            full_json: dir.join("phones_full.json"),
            key_fields_json: dir.join("phones_key_fields.json"),
            key_fields_csv: dir.join("phones_key_fields.csv"),
            dir,
        }
    }
}

impl Default for ExportPaths {
    fn default() -> Self {
        Self::new("output")
    }
}

/// Writes pretty-printed JSON. Non-ASCII text is kept as is.
pub fn save_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    let file = File::create(path).wrap_err_with(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)?;
    writer.flush()?;
    Ok(())
}

/// Writes key fields as CSV with a header row.
///
/// Returns `false` and writes nothing when `rows` is empty.
pub fn save_csv(path: &Path, rows: &[KeyFields]) -> Result<bool> {
    if rows.is_empty() {
        return Ok(false);
    }
    let file = File::create(path).wrap_err_with(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    csv::write_row(&mut writer, &KeyFields::FIELDS)?;
    for row in rows {
        csv::write_row(&mut writer, &row.to_row())?;
    }
    writer.flush()?;
    Ok(true)
}

/// Writes all three output files, creating the output directory if needed.
pub fn export_all(paths: &ExportPaths, phones: &[PhoneDetails], keys: &[KeyFields]) -> Result<()> {
    fs::create_dir_all(&paths.dir)
        .wrap_err_with(|| format!("creating {}", paths.dir.display()))?;

    save_json(&paths.full_json, phones)?;
    save_json(&paths.key_fields_json, keys)?;
    let csv_written = save_csv(&paths.key_fields_csv, keys)?;
    info!(
        phones = phones.len(),
        csv_written,
        dir = %paths.dir.display(),
        "export completed"
    );
    Ok(())
}
