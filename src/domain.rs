pub mod export;
pub mod ledger;
pub mod plan;
pub mod raw;
pub mod session;
pub mod transfer;

pub use ledger::{replay, LedgerEntry, LedgerProjection, RecordOutcome};
pub use plan::{build_plan, PlanOptions, PlannedTransfer, TransferKind, TransferPlan};
pub use raw::{find_raw_siblings, RawCatalog, RAW_EXTENSIONS};
pub use session::{SessionState, SessionStore, SESSION_VERSION};
pub use transfer::{execute, ExecuteOptions, TransferOutcome, TransferReport, TransferStatus};

use crate::error::{PswpError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Extensions eligible for review, compared case-insensitively
pub const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "webp", "gif", "bmp", "tiff"];

pub fn is_image_extension(ext: &str) -> bool {
    let ext = ext.to_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Returns the file name without its extension
pub fn stem_of(name: &str) -> &str {
    Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
}

/// The two decisions an operator can record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Keep,
    Discard,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Keep => "keep",
            Action::Discard => "discard",
        }
    }
}

/// Current decision for an item, derived from the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Keep,
    Discard,
    Undecided,
}

impl From<Action> for Decision {
    fn from(action: Action) -> Self {
        match action {
            Action::Keep => Decision::Keep,
            Action::Discard => Decision::Discard,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferMode {
    #[default]
    Copy,
    Move,
}

impl TransferMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferMode::Copy => "copy",
            TransferMode::Move => "move",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageItem {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub modified_date: DateTime<Utc>,
}

impl ImageItem {
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let metadata = fs::metadata(path)?;
        let modified_date: DateTime<Utc> = metadata.modified()?.into();

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "Non UTF-8 file name"))?
            .to_string();

        Ok(ImageItem {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
            modified_date,
        })
    }

    /// Base name used to match RAW siblings
    pub fn stem(&self) -> &str {
        stem_of(&self.name)
    }
}

/// Ordered listing of the reviewable images in one source directory.
///
/// Items are sorted case-insensitively by file name so cursor positions stay
/// meaningful across reloads of unchanged directory content. Lookups from the
/// ledger always go through names, never positions.
#[derive(Debug, Clone, Default)]
pub struct FileIndex {
    source_dir: PathBuf,
    items: Vec<ImageItem>,
    /// RAW files of `source_dir`, scanned together with the items
    raws: RawCatalog,
    notice: Option<String>,
}

impl FileIndex {
    /// Builds the index for `source_dir`.
    ///
    /// A missing directory is a normal state: the index is empty and
    /// [`FileIndex::notice`] carries the message for the operator.
    pub fn build(source_dir: &Path) -> Self {
        match discover_images(source_dir) {
            Ok(items) => {
                let raws = RawCatalog::scan(source_dir);
                debug!(dir = %source_dir.display(), count = items.len(), "built file index");
                FileIndex {
                    source_dir: source_dir.to_path_buf(),
                    items,
                    raws,
                    notice: None,
                }
            }
            Err(e) => {
                warn!(dir = %source_dir.display(), error = %e, "could not index source directory");
                FileIndex {
                    source_dir: source_dir.to_path_buf(),
                    items: Vec::new(),
                    raws: RawCatalog::default(),
                    notice: Some(e.to_string()),
                }
            }
        }
    }

    /// Index over known items. No directory is read, so no RAW siblings
    /// are known.
    pub fn from_items(source_dir: &Path, mut items: Vec<ImageItem>) -> Self {
        sort_items(&mut items);
        FileIndex {
            source_dir: source_dir.to_path_buf(),
            items,
            raws: RawCatalog::default(),
            notice: None,
        }
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn items(&self) -> &[ImageItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&ImageItem> {
        self.items.get(position)
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// RAW siblings of `stem` as of the last build
    pub fn raw_siblings(&self, stem: &str) -> BTreeSet<PathBuf> {
        self.raws.siblings(stem)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&ImageItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// First item in index order whose base name matches
    pub fn find_by_stem(&self, stem: &str) -> Option<&ImageItem> {
        self.items.iter().find(|item| item.stem() == stem)
    }

    /// Resolves a ledger name: exact file name first, then base name
    pub fn resolve(&self, name: &str) -> Option<&ImageItem> {
        self.resolve_excluding(name, &HashSet::new())
    }

    /// Like [`FileIndex::resolve`], but the base name fallback never lands
    /// on an item whose own name is in `taken`.
    pub fn resolve_excluding(&self, name: &str, taken: &HashSet<&str>) -> Option<&ImageItem> {
        self.find_by_name(name).or_else(|| {
            let stem = stem_of(name);
            self.items
                .iter()
                .find(|item| item.stem() == stem && !taken.contains(item.name.as_str()))
        })
    }

    /// Like [`FileIndex::resolve_excluding`], failing with `UnresolvedSource`
    pub fn require(&self, name: &str, taken: &HashSet<&str>) -> Result<&ImageItem> {
        self.resolve_excluding(name, taken)
            .ok_or_else(|| PswpError::UnresolvedSource(name.to_string()))
    }
}

/// Lists image files directly inside `dir_path`.
///
/// - Skips directories, hidden files and unreadable entries
/// - Keeps only [`IMAGE_EXTENSIONS`], case-insensitive
/// - Sorts by lowercase file name, ties broken by the exact name
pub fn discover_images(dir_path: &Path) -> Result<Vec<ImageItem>> {
    if !dir_path.is_dir() {
        return Err(PswpError::DirectoryNotFound(dir_path.to_path_buf()));
    }

    let mut items = Vec::new();

    for entry_result in fs::read_dir(dir_path)? {
        let entry = match entry_result {
            Ok(e) => e,
            Err(_) => continue,
        };

        let path = entry.path();

        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };

        if file_name.starts_with('.') {
            continue;
        }

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !is_image_extension(extension) {
            continue;
        }

        match fs::metadata(&path) {
            Ok(m) if m.is_file() => {}
            _ => continue,
        }

        if let Ok(item) = ImageItem::from_path(&path) {
            items.push(item);
        }
    }

    sort_items(&mut items);
    Ok(items)
}

fn sort_items(items: &mut [ImageItem]) {
    items.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Counts shown to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionStatistics {
    pub total_files: usize,
    pub kept: usize,
    pub discarded: usize,
    pub position: usize,
}

/// The single mutable session owned by the presentation layer.
///
/// Every mutating call persists the session before returning.
#[derive(Debug)]
pub struct AppState {
    pub index: FileIndex,
    pub session: SessionState,
    pub plan_options: PlanOptions,
    store: SessionStore,
}

impl AppState {
    /// Builds the index and restores the stored session when it belongs to
    /// the same source directory.
    pub fn open(
        source_dir: &Path,
        mode: TransferMode,
        store: SessionStore,
        plan_options: PlanOptions,
    ) -> Self {
        let source_dir = fs::canonicalize(source_dir).unwrap_or_else(|_| source_dir.to_path_buf());
        let index = FileIndex::build(&source_dir);

        let mut session = match store.load() {
            Some(stored) if stored.source_dir() == source_dir.as_path() => {
                info!(
                    entries = stored.ledger().len(),
                    cursor = stored.cursor(),
                    "restored session"
                );
                stored
            }
            Some(stored) => {
                info!(
                    stored = %stored.source_dir().display(),
                    requested = %source_dir.display(),
                    "session belongs to another directory, starting fresh"
                );
                SessionState::new(&source_dir, mode)
            }
            None => SessionState::new(&source_dir, mode),
        };
        session.set_mode(mode);

        Self {
            index,
            session,
            plan_options,
            store,
        }
    }

    pub fn new(index: FileIndex, session: SessionState, store: SessionStore, plan_options: PlanOptions) -> Self {
        Self {
            index,
            session,
            plan_options,
            store,
        }
    }

    /// Cursor clamped to the current index
    pub fn position(&self) -> usize {
        self.session.cursor().min(self.index.len())
    }

    pub fn current_item(&self) -> Option<&ImageItem> {
        self.index.get(self.position())
    }

    pub fn is_review_complete(&self) -> bool {
        self.position() >= self.index.len()
    }

    pub fn decision_for(&self, name: &str) -> Decision {
        self.session.decision_for(name)
    }

    pub fn statistics(&self) -> DecisionStatistics {
        DecisionStatistics {
            total_files: self.index.len(),
            kept: self.session.keep_list().len(),
            discarded: self.session.discard_list().len(),
            position: self.position(),
        }
    }

    pub fn keep_current(&mut self) -> Result<RecordOutcome> {
        self.record_current(Action::Keep)
    }

    pub fn discard_current(&mut self) -> Result<RecordOutcome> {
        self.record_current(Action::Discard)
    }

    fn record_current(&mut self, action: Action) -> Result<RecordOutcome> {
        let name = match self.current_item() {
            Some(item) => item.name.clone(),
            None => return Ok(RecordOutcome::ReviewComplete),
        };

        let outcome = self.session.record(action, &name, &self.index);
        if outcome == RecordOutcome::Recorded {
            self.store.save(&self.session)?;
        }
        Ok(outcome)
    }

    pub fn undo(&mut self) -> Result<Option<LedgerEntry>> {
        let undone = self.session.undo();
        if undone.is_some() {
            self.store.save(&self.session)?;
        }
        Ok(undone)
    }

    /// Rebuilds the index from disk; the ledger is left untouched
    pub fn reload(&mut self) {
        self.index = FileIndex::build(self.session.source_dir());
    }

    /// Clears all decisions and deletes the stored session
    pub fn reset(&mut self) -> Result<()> {
        self.store.reset(&mut self.session)
    }

    pub fn plan(&self) -> TransferPlan {
        build_plan(
            &self.session,
            &self.index,
            self.session.source_dir(),
            &self.plan_options,
        )
    }

    /// Executes the current plan in the session's mode.
    ///
    /// A confirmed run without failures commits the session: decisions are
    /// cleared and the index is rebuilt.
    pub fn execute(&mut self, options: ExecuteOptions) -> Result<TransferReport> {
        let plan = self.plan();
        let report = execute(&plan, self.session.mode(), options)?;

        if !report.dry_run && !report.has_failures() {
            info!(transfers = report.succeeded(), "transfers committed, resetting session");
            self.reset()?;
            self.reload();
        }

        Ok(report)
    }

    pub fn export(&self, dir: &Path) -> Result<PathBuf> {
        export::export_decisions(&self.session, dir)
    }
}
