//! JSONL snapshot: one tagged record per line.
//!
//! The portable persistence format for the lineage store. Objects and
//! transitions share one file, each line tagged with its record kind, so a
//! single snapshot rebuilds the whole graph. Writes go through a temp file
//! and rename so readers never observe a half-written snapshot.

use provgraph_core::{DigitalObject, DigitalObjectTransition};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// One snapshot line: an object record or a transition record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SnapshotRecord {
    #[serde(rename = "object")]
    Object(DigitalObject),
    #[serde(rename = "transition")]
    Transition(DigitalObjectTransition),
}

/// Errors from snapshot I/O.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot I/O failed: {0}")]
    Io(String),

    #[error("snapshot line {line} does not parse: {message}")]
    Parse { line: usize, message: String },

    #[error("snapshot record does not serialize: {0}")]
    Serialize(String),

    #[error("corrupted snapshot: {0}")]
    Corrupt(String),
}

fn io_context(path: &Path, error: impl Display) -> SnapshotError {
    SnapshotError::Io(format!("{}: {error}", path.display()))
}

/// Read snapshot records from a JSONL reader. Blank lines and `#` comment
/// lines are skipped.
pub fn read_snapshot(reader: impl BufRead) -> Result<Vec<SnapshotRecord>, SnapshotError> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| SnapshotError::Io(format!("line {}: {e}", index + 1)))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        records.push(
            serde_json::from_str(trimmed).map_err(|e| SnapshotError::Parse {
                line: index + 1,
                message: e.to_string(),
            })?,
        );
    }
    Ok(records)
}

/// Write snapshot records to a JSONL writer.
pub fn write_snapshot(
    writer: &mut impl Write,
    records: &[SnapshotRecord],
) -> Result<(), SnapshotError> {
    for record in records {
        let line =
            serde_json::to_string(record).map_err(|e| SnapshotError::Serialize(e.to_string()))?;
        writeln!(writer, "{line}").map_err(|e| SnapshotError::Io(e.to_string()))?;
    }
    Ok(())
}

/// Read snapshot records from a file path.
pub fn read_snapshot_from_path(
    path: impl AsRef<Path>,
) -> Result<Vec<SnapshotRecord>, SnapshotError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| io_context(path, e))?;
    if bytes.contains(&0) {
        return Err(SnapshotError::Corrupt(format!(
            "{}: contains NUL bytes",
            path.display()
        )));
    }
    if std::str::from_utf8(&bytes).is_err() {
        return Err(SnapshotError::Corrupt(format!(
            "{}: not valid UTF-8",
            path.display()
        )));
    }
    read_snapshot(BufReader::new(bytes.as_slice()))
}

/// Write snapshot records to a file path, replacing it atomically: the
/// records land in a sibling temp file, get fsynced, and are renamed over
/// the target; the containing directory is synced afterwards.
pub fn write_snapshot_to_path(
    path: impl AsRef<Path>,
    records: &[SnapshotRecord],
) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        fs::create_dir_all(parent).map_err(|e| io_context(parent, e))?;
    }

    let tmp_path = sibling_tmp_path(path);
    if let Err(error) = flush_records(&tmp_path, records) {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        SnapshotError::Io(format!(
            "{} -> {}: {e}",
            tmp_path.display(),
            path.display()
        ))
    })?;

    if let Some(parent) = parent {
        File::open(parent)
            .and_then(|dir| dir.sync_all())
            .map_err(|e| io_context(parent, e))?;
    }
    Ok(())
}

/// Write and fsync the full record set into `tmp_path`.
fn flush_records(tmp_path: &Path, records: &[SnapshotRecord]) -> Result<(), SnapshotError> {
    let file = File::create(tmp_path).map_err(|e| io_context(tmp_path, e))?;
    let mut writer = BufWriter::new(file);
    write_snapshot(&mut writer, records)?;
    writer.flush().map_err(|e| io_context(tmp_path, e))?;
    writer
        .into_inner()
        .map_err(|e| io_context(tmp_path, e))?
        .sync_all()
        .map_err(|e| io_context(tmp_path, e))
}

fn sibling_tmp_path(path: &Path) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut tmp: OsString = path.as_os_str().to_os_string();
    tmp.push(format!(".tmp.{}.{unique}", std::process::id()));
    PathBuf::from(tmp)
}
