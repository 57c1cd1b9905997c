// Opens photos in the platform's default viewer

use crate::error::Result;
use std::path::Path;
use tracing::debug;

/// Opens `path` with the system handler and waits for the launcher to return
pub fn open_file(path: &Path) -> Result<()> {
    debug!(path = %path.display(), "opening in system viewer");
    open::that(path)?;
    Ok(())
}

