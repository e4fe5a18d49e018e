// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::config::options::ExportOptions;
use crate::csv::rows_to_string;
use crate::data::{COLUMNS, Treaty};
use crate::error::{Error, Result};

/// Write the dataset as CSV/TSV, plus the JSON sidecar when enabled.
/// Returns every path written.
pub fn export(treaties: &[Treaty], export: &ExportOptions) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(2);

    let path = export.out_path().to_path_buf();
    ensure_parent(&path)?;
    let rows: Vec<Vec<String>> = treaties.iter().map(Treaty::to_row).collect();
    let headers = export.include_headers.then_some(&COLUMNS[..]);
    fs::write(&path, rows_to_string(headers, &rows, export.format.delim()))?;
    logf!("Wrote {} treaties to {}", treaties.len(), path.display());
    written.push(path);

    if export.write_json {
        let json_path = export.json_path();
        write_json(treaties, &json_path)?;
        logf!("Wrote JSON to {}", json_path.display());
        written.push(json_path);
    }
    Ok(written)
}

/// Pretty-printed array of objects keyed by column name; non-ASCII kept as is.
pub fn write_json(treaties: &[Treaty], path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let mut text = serde_json::to_string_pretty(treaties)?;
    text.push('\n');
    fs::write(path, text)?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::Config(format!("path exists but is not a directory: {}", dir.display())));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
