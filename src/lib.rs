//! Pswp - a terminal photo triage library
//!
//! This crate provides the core of the Pswp application: a persistent
//! keep/discard ledger over a folder of photos, RAW sibling matching and
//! the copy/move transfer of decided files.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod file_opener;
pub mod logging;
pub mod preview;
pub mod tui;

// Re-export primary types for convenience
pub use config::UserConfig;
pub use domain::{
    build_plan, execute, find_raw_siblings, replay, Action, AppState, Decision,
    DecisionStatistics, ExecuteOptions, FileIndex, ImageItem, LedgerEntry, PlanOptions,
    RecordOutcome, SessionState, SessionStore, TransferMode, TransferPlan, TransferReport,
};
pub use error::{PswpError, Result};
pub use file_opener::open_file;
