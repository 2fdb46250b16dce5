// src/source.rs

use anyhow::{Context, Result};
use std::{
    fs,
    io::{self, Write},
    path::Path,
};
use tracing::{info, warn};

use crate::schedule::{self, ScheduleData};

/// Read the schedule sheet at `path`.
///
/// A missing file is not an error: it yields `Ok(None)` so the page can show
/// its "no data" state. Any other read failure is returned.
pub fn read_schedule_csv<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    let path = path.as_ref();
    if !path.exists() {
        warn!(path = %path.display(), "schedule sheet not found");
        return Ok(None);
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading schedule sheet {:?}", path))?;
    info!(path = %path.display(), bytes = text.len(), "read schedule sheet");
    Ok(Some(text))
}

/// Read and parse the sheet at `path`; `Ok(None)` when it does not exist.
pub fn load_schedule<P: AsRef<Path>>(path: P, default_year: i32) -> Result<Option<ScheduleData>> {
    Ok(read_schedule_csv(path)?.map(|text| schedule::schedule_data(&text, default_year)))
}

/// Write `contents` to `path` via a temp file + rename, unless the file
/// already holds exactly these bytes. Returns whether anything was written.
pub fn write_if_changed<P: AsRef<Path>>(path: P, contents: &str) -> Result<bool> {
    let path = path.as_ref();
    if let Ok(existing) = fs::read(path) {
        if existing == contents.as_bytes() {
            info!(path = %path.display(), "output unchanged");
            return Ok(false);
        }
    }

    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("creating output directory {:?}", dir))?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("output path has no file name")?;
    let tmp_path = dir.join(format!(".{}.tmp", file_name));
    let mut tmp = fs::File::create(&tmp_path)
        .map_err(|e| io::Error::new(e.kind(), format!("creating {:?}: {}", tmp_path, e)))?;
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("writing {:?}", tmp_path))?;
    drop(tmp);

    fs::rename(&tmp_path, path)
        .with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path))?;
    info!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(true)
}
