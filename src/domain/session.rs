use super::ledger::{replay, LedgerEntry};
use super::{Action, FileIndex, TransferMode};
use crate::error::{PswpError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Schema version written by [`SessionStore::save`]
pub const SESSION_VERSION: u32 = 2;

/// Extension assumed when a v1 base name has no match in the index
const LEGACY_DEFAULT_EXTENSION: &str = "jpg";

/// Persisted review session.
///
/// Only the ledger is authoritative: the lists and the cursor are stored
/// alongside it but always equal a replay of the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub(super) version: u32,
    pub(super) source_dir: PathBuf,
    pub(super) mode: TransferMode,
    #[serde(alias = "idx")]
    pub(super) cursor: usize,
    pub(super) keep_list: Vec<String>,
    pub(super) discard_list: Vec<String>,
    #[serde(alias = "history")]
    pub(super) ledger: Vec<LedgerEntry>,
}

impl SessionState {
    pub fn new(source_dir: &Path, mode: TransferMode) -> Self {
        Self {
            version: SESSION_VERSION,
            source_dir: source_dir.to_path_buf(),
            mode,
            cursor: 0,
            keep_list: Vec::new(),
            discard_list: Vec::new(),
            ledger: Vec::new(),
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn mode(&self) -> TransferMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: TransferMode) {
        self.mode = mode;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn keep_list(&self) -> &[String] {
        &self.keep_list
    }

    pub fn discard_list(&self) -> &[String] {
        &self.discard_list
    }

    pub fn ledger(&self) -> &[LedgerEntry] {
        &self.ledger
    }

    /// Drops every decision and rewinds the cursor
    pub fn clear(&mut self) {
        self.cursor = 0;
        self.keep_list.clear();
        self.discard_list.clear();
        self.ledger.clear();
    }

    /// Re-derives lists and cursor from the ledger
    fn normalize(&mut self) {
        let projection = replay(&self.ledger);

        if projection.keep_list != self.keep_list
            || projection.discard_list != self.discard_list
            || projection.cursor != self.cursor
        {
            warn!(
                stored_cursor = self.cursor,
                replayed_cursor = projection.cursor,
                "stored lists disagree with ledger, using ledger"
            );
        }

        self.keep_list = projection.keep_list;
        self.discard_list = projection.discard_list;
        self.cursor = projection.cursor;
    }
}

/// Version 1 layout: items referenced by base name only
#[derive(Debug, Deserialize)]
struct LegacySession {
    #[serde(alias = "data_dir")]
    source_dir: PathBuf,
    #[serde(default)]
    mode: TransferMode,
    #[serde(default, alias = "keep")]
    keep_list: Vec<String>,
    #[serde(default, alias = "discard")]
    discard_list: Vec<String>,
    #[serde(default, alias = "history")]
    ledger: Vec<LegacyEntry>,
}

#[derive(Debug, Deserialize)]
struct LegacyEntry {
    action: Action,
    #[serde(alias = "stem")]
    base_name: String,
    cursor_before: usize,
}

/// Converts a v1 session, resolving base names against the index of its
/// recorded source directory.
fn migrate_v1(legacy: LegacySession) -> SessionState {
    let index = FileIndex::build(&legacy.source_dir);
    let resolve = |base_name: &str| -> String {
        index
            .find_by_name(base_name)
            .or_else(|| index.find_by_stem(base_name))
            .map(|item| item.name.clone())
            .unwrap_or_else(|| format!("{}.{}", base_name, LEGACY_DEFAULT_EXTENSION))
    };

    let ledger: Vec<LedgerEntry> = if legacy.ledger.is_empty() {
        // No history was kept: synthesize one entry per listed name
        legacy
            .keep_list
            .iter()
            .map(|name| (Action::Keep, name))
            .chain(legacy.discard_list.iter().map(|name| (Action::Discard, name)))
            .enumerate()
            .map(|(position, (action, name))| LedgerEntry {
                action,
                item_name: resolve(name),
                cursor_before: position,
            })
            .collect()
    } else {
        legacy
            .ledger
            .iter()
            .map(|entry| LedgerEntry {
                action: entry.action,
                item_name: resolve(&entry.base_name),
                cursor_before: entry.cursor_before,
            })
            .collect()
    };

    let projection = replay(&ledger);
    info!(entries = ledger.len(), "migrated session from version 1");

    SessionState {
        version: SESSION_VERSION,
        source_dir: legacy.source_dir,
        mode: legacy.mode,
        cursor: projection.cursor,
        keep_list: projection.keep_list,
        discard_list: projection.discard_list,
        ledger,
    }
}

fn corrupt(e: serde_json::Error) -> PswpError {
    PswpError::SessionCorrupt(e.to_string())
}

/// Parses a session file, migrating older schema versions
pub fn parse_session(contents: &str) -> Result<SessionState> {
    let value: Value = serde_json::from_str(contents).map_err(corrupt)?;
    let version = value
        .get("version")
        .and_then(Value::as_u64)
        .ok_or_else(|| PswpError::SessionCorrupt("missing version".to_string()))?;

    match version {
        1 => {
            let legacy: LegacySession = serde_json::from_value(value).map_err(corrupt)?;
            Ok(migrate_v1(legacy))
        }
        v if v == u64::from(SESSION_VERSION) => {
            let mut state: SessionState = serde_json::from_value(value).map_err(corrupt)?;
            state.normalize();
            Ok(state)
        }
        other => Err(PswpError::SessionCorrupt(format!(
            "unsupported version {}",
            other
        ))),
    }
}

/// Durable storage for a single [`SessionState`]
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location (~/.local/share/pswp/session.json on Linux)
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("pswp").join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the full state to a temp file, flushes it to disk, then
    /// renames it into place. On failure the temp file is removed and the
    /// previous session file is left as it was.
    pub fn save(&self, state: &SessionState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(state)?;
        let tmp = self.tmp_path();
        let written =
            write_synced(&tmp, contents.as_bytes()).and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            fs::remove_file(&tmp).ok();
            return Err(e.into());
        }

        debug!(path = %self.path.display(), entries = state.ledger.len(), "saved session");
        Ok(())
    }

    /// Loads the stored session.
    ///
    /// Missing, unreadable, malformed and unknown-version files all yield
    /// `None` so the caller starts fresh.
    pub fn load(&self) -> Option<SessionState> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not read session file");
                return None;
            }
        };

        match parse_session(&contents) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unusable session file");
                None
            }
        }
    }

    /// Deletes the stored file and clears `state`
    pub fn reset(&self, state: &mut SessionState) -> Result<()> {
        state.clear();

        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        info!(path = %self.path.display(), "session reset");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

fn write_synced(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}
