//! Tracing setup.
//!
//! Reads `RUST_LOG`; defaults to `warn`, or `pswp=debug` with `--verbose`.
//! While the terminal interface owns the screen, output goes to a log file
//! instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where log lines are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Default log file (~/.local/share/pswp/pswp.log on Linux)
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("pswp").join("pswp.log"))
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "pswp=debug"
    } else {
        "warn"
    }
}

/// Installs the global subscriber. Calling it twice is a no-op.
pub fn init(verbose: bool, target: &LogTarget) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    match target {
        LogTarget::Stderr => {
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr).compact())
                .try_init();
        }
        LogTarget::File(path) => match open_log_file(path) {
            Ok(file) => {
                let _ = tracing_subscriber::registry()
                    .with(filter)
                    .with(
                        fmt::layer()
                            .with_writer(Mutex::new(file))
                            .with_ansi(false),
                    )
                    .try_init();
            }
            Err(e) => {
                eprintln!("Warning: could not open log file {}: {}", path.display(), e);
            }
        },
    }
}

fn open_log_file(path: &Path) -> std::io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
