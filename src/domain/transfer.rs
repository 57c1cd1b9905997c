use super::plan::TransferPlan;
use super::TransferMode;
use crate::error::{PswpError, Result};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecuteOptions {
    /// Operator confirmed the transfer; required unless `dry_run`
    pub confirmed: bool,
    /// Report what would happen without touching the file system
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferStatus {
    /// Dry run: would be transferred
    Planned,
    Done,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    pub source: PathBuf,
    /// Final destination after collision handling
    pub destination: PathBuf,
    pub bytes: u64,
    pub status: TransferStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReport {
    pub mode: TransferMode,
    pub dry_run: bool,
    pub outcomes: Vec<TransferOutcome>,
    /// Bytes transferred, or estimated for a dry run
    pub total_bytes: u64,
}

impl TransferReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == TransferStatus::Done)
            .count()
    }

    pub fn failed(&self) -> Vec<&TransferOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, TransferStatus::Failed(_)))
            .collect()
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| matches!(o.status, TransferStatus::Failed(_)))
    }
}

/// Applies `plan` in order.
///
/// Without `confirmed` (and outside a dry run) nothing is touched and
/// [`PswpError::NotConfirmed`] is returned. Existing destinations are never
/// overwritten: the file gets a `_1`, `_2`, ... suffix instead. A failing
/// pair is recorded in the report and the remaining pairs still run.
pub fn execute(plan: &TransferPlan, mode: TransferMode, options: ExecuteOptions) -> Result<TransferReport> {
    if !options.dry_run && !options.confirmed {
        return Err(PswpError::NotConfirmed);
    }

    let mut claimed: HashSet<PathBuf> = HashSet::new();
    let mut outcomes = Vec::with_capacity(plan.transfers.len());
    let mut total_bytes = 0;

    for transfer in &plan.transfers {
        let destination = unique_destination(&transfer.destination, &claimed);
        claimed.insert(destination.clone());

        let size = match fs::metadata(&transfer.source) {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                warn!(source = %transfer.source.display(), error = %e, "source not readable");
                outcomes.push(TransferOutcome {
                    source: transfer.source.clone(),
                    destination,
                    bytes: 0,
                    status: TransferStatus::Failed(e.to_string()),
                });
                continue;
            }
        };

        let status = if options.dry_run {
            total_bytes += size;
            TransferStatus::Planned
        } else {
            match transfer_file(&transfer.source, &destination, mode) {
                Ok(()) => {
                    debug!(
                        source = %transfer.source.display(),
                        destination = %destination.display(),
                        mode = mode.as_str(),
                        "transferred"
                    );
                    total_bytes += size;
                    TransferStatus::Done
                }
                Err(e) => {
                    warn!(
                        source = %transfer.source.display(),
                        destination = %destination.display(),
                        error = %e,
                        "transfer failed"
                    );
                    TransferStatus::Failed(e.to_string())
                }
            }
        };

        outcomes.push(TransferOutcome {
            source: transfer.source.clone(),
            destination,
            bytes: size,
            status,
        });
    }

    let report = TransferReport {
        mode,
        dry_run: options.dry_run,
        outcomes,
        total_bytes,
    };

    info!(
        mode = mode.as_str(),
        dry_run = report.dry_run,
        done = report.succeeded(),
        failed = report.failed().len(),
        bytes = report.total_bytes,
        "executed transfer plan"
    );
    Ok(report)
}

/// Returns `destination`, or the first free `stem_N.ext` next to it.
///
/// A path counts as taken if it exists on disk or is in `claimed`.
pub fn unique_destination(destination: &Path, claimed: &HashSet<PathBuf>) -> PathBuf {
    let is_free = |path: &Path| !path.exists() && !claimed.contains(path);

    if is_free(destination) {
        return destination.to_path_buf();
    }

    let parent = destination.parent().unwrap_or_else(|| Path::new(""));
    let stem = destination
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("file");
    let extension = destination.extension().and_then(|e| e.to_str());

    let mut counter: u32 = 1;
    loop {
        let file_name = match extension {
            Some(ext) => format!("{}_{}.{}", stem, counter, ext),
            None => format!("{}_{}", stem, counter),
        };
        let candidate = parent.join(file_name);
        if is_free(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

fn transfer_file(source: &Path, destination: &Path, mode: TransferMode) -> io::Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }

    match mode {
        TransferMode::Copy => copy_file(source, destination),
        TransferMode::Move => move_file(source, destination),
    }
}

/// Copies `source` to `destination`. A failed copy leaves no partial file
/// behind.
fn copy_file(source: &Path, destination: &Path) -> io::Result<()> {
    remove_on_error(fs::copy(source, destination).map(|_| ()), destination)
}

/// Removes `destination` when `result` is an error. `destination` must be a
/// path claimed for this run.
fn remove_on_error<T>(result: io::Result<T>, destination: &Path) -> io::Result<T> {
    if result.is_err() {
        if let Err(e) = fs::remove_file(destination) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!(path = %destination.display(), error = %e, "could not remove partial copy");
            }
        }
    }
    result
}

/// Renames when possible, otherwise copies then removes the source
fn move_file(source: &Path, destination: &Path) -> io::Result<()> {
    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            debug!(error = %rename_err, "rename failed, falling back to copy");
            copy_file(source, destination)?;
            if let Err(e) = fs::remove_file(source) {
                // Source could not be removed: undo the copy
                fs::remove_file(destination).ok();
                return Err(e);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::plan::{PlannedTransfer, TransferKind};
    use crate::domain::Action;
    use tempfile::TempDir;

    fn plan_for(pairs: &[(PathBuf, PathBuf)]) -> TransferPlan {
        TransferPlan {
            transfers: pairs
                .iter()
                .map(|(source, destination)| PlannedTransfer {
                    item_name: source.file_name().unwrap().to_string_lossy().to_string(),
                    action: Action::Keep,
                    kind: TransferKind::Primary,
                    source: source.clone(),
                    destination: destination.clone(),
                })
                .collect(),
            ..TransferPlan::default()
        }
    }

    const CONFIRMED: ExecuteOptions = ExecuteOptions {
        confirmed: true,
        dry_run: false,
    };

    mod copy_tests {
        use super::*;

        #[test]
        fn test_failed_copy_removes_partial_destination() {
            let temp_dir = TempDir::new().unwrap();
            let destination = temp_dir.path().join("keep").join("photo.jpg");
            fs::create_dir_all(destination.parent().unwrap()).unwrap();
            fs::write(&destination, b"half written").unwrap();

            let failed: io::Result<()> = Err(io::Error::new(io::ErrorKind::Other, "disk full"));
            let result = remove_on_error(failed, &destination);

            assert_eq!(result.unwrap_err().kind(), io::ErrorKind::Other);
            assert!(!destination.exists());
        }

        #[test]
        fn test_successful_copy_keeps_destination() {
            let temp_dir = TempDir::new().unwrap();
            let source = temp_dir.path().join("photo.jpg");
            let destination = temp_dir.path().join("keep").join("photo.jpg");
            fs::write(&source, b"pixels").unwrap();

            transfer_file(&source, &destination, TransferMode::Copy).unwrap();

            assert_eq!(fs::read(&destination).unwrap(), b"pixels");
            assert!(source.exists());
        }

        #[test]
        fn test_copy_of_missing_source_leaves_no_destination() {
            let temp_dir = TempDir::new().unwrap();
            let source = temp_dir.path().join("gone.jpg");
            let destination = temp_dir.path().join("keep").join("gone.jpg");

            for mode in [TransferMode::Copy, TransferMode::Move] {
                assert!(transfer_file(&source, &destination, mode).is_err());
                assert!(!destination.exists());
            }
        }
    }

    mod collision_tests {
        use super::*;

        #[test]
        fn test_free_destination_unchanged() {
            let temp_dir = TempDir::new().unwrap();
            let dest = temp_dir.path().join("photo1.jpg");

            assert_eq!(unique_destination(&dest, &HashSet::new()), dest);
        }

        #[test]
        fn test_existing_destination_gets_suffix() {
            let temp_dir = TempDir::new().unwrap();
            let dest = temp_dir.path().join("photo1.jpg");
            fs::write(&dest, b"x").unwrap();
            fs::write(temp_dir.path().join("photo1_1.jpg"), b"x").unwrap();

            assert_eq!(
                unique_destination(&dest, &HashSet::new()),
                temp_dir.path().join("photo1_2.jpg")
            );
        }

        #[test]
        fn test_claimed_destination_gets_suffix() {
            let temp_dir = TempDir::new().unwrap();
            let dest = temp_dir.path().join("notes");
            let claimed: HashSet<PathBuf> = [dest.clone()].into_iter().collect();

            assert_eq!(unique_destination(&dest, &claimed), temp_dir.path().join("notes_1"));
        }
    }

    mod execute_tests {
        use super::*;

        #[test]
        fn test_copy_creates_destination_dirs() {
            let temp_dir = TempDir::new().unwrap();
            let source = temp_dir.path().join("photo1.jpg");
            fs::write(&source, b"jpeg").unwrap();
            let dest = temp_dir.path().join("keep").join("nested").join("photo1.jpg");

            let report = execute(&plan_for(&[(source.clone(), dest.clone())]), TransferMode::Copy, CONFIRMED).unwrap();

            assert_eq!(report.succeeded(), 1);
            assert_eq!(report.total_bytes, 4);
            assert!(source.exists());
            assert_eq!(fs::read(&dest).unwrap(), b"jpeg");
        }

        #[test]
        fn test_move_disambiguates_existing_destination() {
            let temp_dir = TempDir::new().unwrap();
            let source = temp_dir.path().join("photo1.jpg");
            fs::write(&source, b"new").unwrap();
            let keep = temp_dir.path().join("keep");
            fs::create_dir(&keep).unwrap();
            fs::write(keep.join("photo1.jpg"), b"old").unwrap();

            let report = execute(
                &plan_for(&[(source.clone(), keep.join("photo1.jpg"))]),
                TransferMode::Move,
                CONFIRMED,
            )
            .unwrap();

            assert_eq!(report.outcomes[0].destination, keep.join("photo1_1.jpg"));
            assert!(!source.exists());
            assert_eq!(fs::read(keep.join("photo1.jpg")).unwrap(), b"old");
            assert_eq!(fs::read(keep.join("photo1_1.jpg")).unwrap(), b"new");
        }

        #[test]
        fn test_not_confirmed_touches_nothing() {
            let temp_dir = TempDir::new().unwrap();
            let source = temp_dir.path().join("photo1.jpg");
            fs::write(&source, b"x").unwrap();
            let dest = temp_dir.path().join("keep").join("photo1.jpg");

            let result = execute(
                &plan_for(&[(source.clone(), dest)]),
                TransferMode::Move,
                ExecuteOptions::default(),
            );

            assert!(matches!(result, Err(PswpError::NotConfirmed)));
            assert!(source.exists());
            assert!(!temp_dir.path().join("keep").exists());
        }

        #[test]
        fn test_dry_run_estimates_without_mutation() {
            let temp_dir = TempDir::new().unwrap();
            let a = temp_dir.path().join("a.jpg");
            let b = temp_dir.path().join("b.cr2");
            fs::write(&a, b"12345").unwrap();
            fs::write(&b, b"123").unwrap();
            let keep = temp_dir.path().join("keep");

            let report = execute(
                &plan_for(&[(a.clone(), keep.join("a.jpg")), (b.clone(), keep.join("b.cr2"))]),
                TransferMode::Move,
                ExecuteOptions {
                    confirmed: false,
                    dry_run: true,
                },
            )
            .unwrap();

            assert!(report.dry_run);
            assert_eq!(report.total_bytes, 8);
            assert!(report
                .outcomes
                .iter()
                .all(|o| o.status == TransferStatus::Planned));
            assert!(a.exists() && b.exists());
            assert!(!keep.exists());
        }

        #[test]
        fn test_failure_does_not_cascade() {
            let temp_dir = TempDir::new().unwrap();
            let missing = temp_dir.path().join("missing.jpg");
            let present = temp_dir.path().join("present.jpg");
            fs::write(&present, b"x").unwrap();
            let keep = temp_dir.path().join("keep");

            let report = execute(
                &plan_for(&[
                    (missing, keep.join("missing.jpg")),
                    (present.clone(), keep.join("present.jpg")),
                ]),
                TransferMode::Copy,
                CONFIRMED,
            )
            .unwrap();

            assert!(report.has_failures());
            assert_eq!(report.failed().len(), 1);
            assert_eq!(report.succeeded(), 1);
            assert!(keep.join("present.jpg").exists());
        }

        #[test]
        fn test_same_destination_twice_in_one_plan() {
            let temp_dir = TempDir::new().unwrap();
            let first = temp_dir.path().join("a").join("photo.jpg");
            let second = temp_dir.path().join("b").join("photo.jpg");
            for path in [&first, &second] {
                fs::create_dir_all(path.parent().unwrap()).unwrap();
                fs::write(path, b"x").unwrap();
            }
            let dest = temp_dir.path().join("keep").join("photo.jpg");

            let report = execute(
                &plan_for(&[(first, dest.clone()), (second, dest.clone())]),
                TransferMode::Copy,
                CONFIRMED,
            )
            .unwrap();

            assert_eq!(report.outcomes[0].destination, dest);
            assert_eq!(
                report.outcomes[1].destination,
                temp_dir.path().join("keep").join("photo_1.jpg")
            );
        }
    }
}
