use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use panel_core::RecordSet;
use panel_logging::panel_info;
use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;

pub const REPORT_FILENAME: &str = "compliance_report.json";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("could not encode report: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Prepares the `export --out` directory: created if absent, and checked
/// with a throwaway file so a read-only target fails before any encoding.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    } else if !dir.is_dir() {
        return Err(PersistError::OutputDir(format!("{dir:?} is not a directory")));
    }
    NamedTempFile::new_in(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Replaces report files in one rename. A reader polling the report
/// directory sees either the previous report or the new one.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

#[derive(Serialize)]
struct Report<'a> {
    generated_utc: &'a str,
    #[serde(flatten)]
    records: &'a RecordSet,
}

/// Writes the record set with its summary to `{dir}/compliance_report.json`.
pub fn export_report(
    dir: &Path,
    records: &RecordSet,
    generated_utc: &str,
) -> Result<PathBuf, PersistError> {
    let body = serde_json::to_string_pretty(&Report {
        generated_utc,
        records,
    })?;
    let path = AtomicFileWriter::new(dir.to_path_buf()).write(REPORT_FILENAME, &body)?;
    panel_info!("Report written to {:?}", path);
    Ok(path)
}
