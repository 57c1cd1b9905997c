//! Flat `filename,decision` export of the current decisions

use super::transfer::unique_destination;
use super::SessionState;
use crate::error::Result;
use chrono::Local;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes the CSV rows for every decided item, in ledger order
pub fn write_decisions<W: Write>(state: &SessionState, writer: &mut W) -> Result<usize> {
    writeln!(writer, "filename,decision")?;

    let decided = state.decided();
    for (name, action) in &decided {
        writeln!(writer, "{},{}", csv_field(name), action.as_str())?;
    }

    Ok(decided.len())
}

/// Writes `decisions_<timestamp>.csv` into `dir` and returns its path
pub fn export_decisions(state: &SessionState, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let file_name = format!("decisions_{}.csv", Local::now().format("%Y%m%d_%H%M%S"));
    let path = unique_destination(&dir.join(file_name), &HashSet::new());

    let mut buffer = Vec::new();
    let rows = write_decisions(state, &mut buffer)?;
    fs::write(&path, buffer)?;

    info!(path = %path.display(), rows, "exported decisions");
    Ok(path)
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
