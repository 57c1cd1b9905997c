use super::raw::RawCatalog;
use super::{stem_of, Action, FileIndex, SessionState};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where decided files go and how ambiguous RAW matches are handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanOptions {
    pub keep_dir: PathBuf,
    pub discard_dir: PathBuf,
    /// Transfer every RAW sibling even when more than one matches
    pub include_ambiguous_raws: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        PlanOptions {
            keep_dir: PathBuf::from("keep"),
            discard_dir: PathBuf::from("discard"),
            include_ambiguous_raws: false,
        }
    }
}

impl PlanOptions {
    pub fn root_for(&self, action: Action) -> &Path {
        match action {
            Action::Keep => &self.keep_dir,
            Action::Discard => &self.discard_dir,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    Primary,
    Raw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTransfer {
    /// Ledger name that produced this transfer
    pub item_name: String,
    pub action: Action,
    pub kind: TransferKind,
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// File operations implied by the current decisions. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferPlan {
    pub transfers: Vec<PlannedTransfer>,
    /// Decided name -> RAW sibling file names found, including unresolved
    /// names (empty list) and ambiguous ones that were skipped
    pub raw_report: BTreeMap<String, Vec<String>>,
    /// Decided names with no matching file on disk
    pub unresolved: Vec<String>,
    /// Decided names whose RAW siblings were left out as ambiguous
    pub ambiguous: Vec<String>,
}

impl TransferPlan {
    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transfers.len()
    }

    pub fn count(&self, action: Action) -> usize {
        self.transfers.iter().filter(|t| t.action == action).count()
    }

    pub fn raw_count(&self) -> usize {
        self.transfers
            .iter()
            .filter(|t| t.kind == TransferKind::Raw)
            .count()
    }
}

/// Computes the transfers implied by `state`.
///
/// Decided names are walked in ledger order. Each one resolves to a file in
/// `index` by exact name, then by base name; the base name fallback skips
/// files that are decided under their own name. Unresolved names only get an
/// empty `raw_report` entry. RAW siblings come from `source_dir`. When more
/// than one sibling exists and `include_ambiguous_raws` is off, only the
/// primary file is planned. The result depends only on the inputs and the
/// directory contents.
///
/// A source file is planned at most once. A name that resolves to a file
/// already planned for an earlier name is unresolved, and RAW siblings already
/// planned with an earlier name make the later one ambiguous.
pub fn build_plan(
    state: &SessionState,
    index: &FileIndex,
    source_dir: &Path,
    options: &PlanOptions,
) -> TransferPlan {
    let catalog = RawCatalog::scan(source_dir);
    let decided = state.decided();
    let decided_names: HashSet<&str> = decided.iter().map(|(name, _)| *name).collect();
    let mut planned: HashSet<PathBuf> = HashSet::new();
    let mut plan = TransferPlan::default();

    for &(name, action) in &decided {
        let root = options.root_for(action);

        let item = match index.require(name, &decided_names) {
            Ok(item) if planned.contains(&item.path) => {
                debug!(item = name, source = %item.path.display(), "source already planned");
                plan.raw_report.insert(name.to_string(), Vec::new());
                plan.unresolved.push(name.to_string());
                continue;
            }
            Ok(item) => item,
            Err(e) => {
                debug!(error = %e, "decided item skipped");
                plan.raw_report.insert(name.to_string(), Vec::new());
                plan.unresolved.push(name.to_string());
                continue;
            }
        };

        planned.insert(item.path.clone());
        plan.transfers.push(PlannedTransfer {
            item_name: name.to_string(),
            action,
            kind: TransferKind::Primary,
            source: item.path.clone(),
            destination: root.join(&item.name),
        });

        let siblings = catalog.siblings(stem_of(&item.name));
        let sibling_names: Vec<String> = siblings
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(String::from))
            .collect();
        plan.raw_report.insert(name.to_string(), sibling_names);

        if siblings.iter().any(|p| planned.contains(p)) {
            debug!(item = name, "RAW siblings already planned with another item");
            plan.ambiguous.push(name.to_string());
            continue;
        }

        if siblings.len() > 1 && !options.include_ambiguous_raws {
            debug!(item = name, count = siblings.len(), "skipping ambiguous RAW siblings");
            plan.ambiguous.push(name.to_string());
            continue;
        }

        for raw_path in siblings {
            let file_name = match raw_path.file_name() {
                Some(file_name) => file_name.to_owned(),
                None => continue,
            };
            planned.insert(raw_path.clone());
            plan.transfers.push(PlannedTransfer {
                item_name: name.to_string(),
                action,
                kind: TransferKind::Raw,
                destination: root.join(file_name),
                source: raw_path,
            });
        }
    }

    debug!(
        transfers = plan.transfers.len(),
        unresolved = plan.unresolved.len(),
        ambiguous = plan.ambiguous.len(),
        "built transfer plan"
    );
    plan
}
