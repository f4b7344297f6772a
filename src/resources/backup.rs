//! Backup resolver: frees an occupied destination by renaming it along a
//! `.bak` chain.
//!
//! The first backup of `X` becomes `X.bak`. If `X.bak` is already taken its
//! occupant is pushed to `X.bak.bak` first, and so on, so the most recent
//! backup always sits closest to the original name and nothing is deleted.
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use super::{Filesystem, Node};
use crate::error::InstallError;
use crate::installer::report::{Action, Reporter};

/// Suffix appended to a final path component to form its backup name.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Return `path` with [`BACKUP_SUFFIX`] appended to its final component.
///
/// # Errors
///
/// Returns [`InstallError::NoFileName`] if `path` has no final component
/// (for example `/` or a path ending in `..`).
pub fn backup_name(path: &Path) -> Result<PathBuf, InstallError> {
    let name = path.file_name().ok_or_else(|| InstallError::NoFileName {
        path: path.to_path_buf(),
    })?;
    let mut bak = OsString::from(name);
    bak.push(BACKUP_SUFFIX);
    Ok(path.with_file_name(bak))
}

/// Compute the renames that free `dest`, in execution order.
///
/// Walks `dest`, `dest.bak`, `dest.bak.bak`, ... until an unoccupied name is
/// found, then returns the renames deepest-first so that each one lands on a
/// free name.
///
/// # Errors
///
/// Returns an error if a candidate cannot be inspected or named.
pub fn plan(fs: &dyn Filesystem, dest: &Path) -> Result<Vec<(PathBuf, PathBuf)>, InstallError> {
    plan_with(|p| fs.inspect(p), dest)
}

fn plan_with(
    inspect: impl Fn(&Path) -> io::Result<Node>,
    dest: &Path,
) -> Result<Vec<(PathBuf, PathBuf)>, InstallError> {
    let mut chain = vec![dest.to_path_buf()];
    let mut current = dest.to_path_buf();
    loop {
        let candidate = backup_name(&current)?;
        let occupied = inspect(&candidate)
            .map_err(|source| InstallError::Inspect {
                path: candidate.clone(),
                source,
            })?
            .is_occupied();
        chain.push(candidate.clone());
        if !occupied {
            break;
        }
        current = candidate;
    }

    Ok(chain
        .windows(2)
        .rev()
        .filter_map(|pair| match pair {
            [from, to] => Some((from.clone(), to.clone())),
            _ => None,
        })
        .collect())
}

/// Move the occupant of `dest` out of the way, reporting each rename at
/// `depth` before performing it.
///
/// After a real run `dest` is unoccupied. In dry-run the renames are only
/// reported and planned, so later inspections in the same run see them.
///
/// # Errors
///
/// Returns an error if the chain cannot be computed or a rename fails. A
/// failed rename aborts immediately so that the caller never links over a
/// path that is still occupied.
pub(crate) fn backup(
    fs: &dyn Filesystem,
    dest: &Path,
    depth: usize,
    reporter: &mut Reporter<'_>,
) -> Result<(), InstallError> {
    let renames = plan_with(|p| reporter.inspect(fs, p), dest)?;
    for (from, to) in renames {
        reporter.record(
            depth,
            Action::Backup {
                from: from.clone(),
                to: to.clone(),
            },
        );
        match reporter.planned() {
            Some(overlay) => overlay
                .rename(fs, &from, &to)
                .map_err(|source| InstallError::Inspect { path: from, source })?,
            None => fs
                .rename(&from, &to)
                .map_err(|source| InstallError::Rename { from, to, source })?,
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::test_helpers::MemoryLog;
    use crate::resources::fs::RealFs;
    use crate::resources::test_helpers::{CountingFs, FailingFs, FsOp, snapshot};

    fn run_backup(fs: &dyn Filesystem, dest: &Path, dry_run: bool) -> Vec<Action> {
        let log = MemoryLog::default();
        let mut reporter = Reporter::new(&log, dry_run);
        backup(fs, dest, 1, &mut reporter).unwrap();
        reporter.into_report().actions
    }

    #[test]
    fn backup_name_appends_suffix() {
        assert_eq!(
            backup_name(Path::new("/home/u/.vimrc")).unwrap(),
            PathBuf::from("/home/u/.vimrc.bak")
        );
        assert_eq!(
            backup_name(Path::new("/home/u/.vimrc.bak")).unwrap(),
            PathBuf::from("/home/u/.vimrc.bak.bak")
        );
    }

    #[test]
    fn backup_name_ignores_trailing_separator() {
        assert_eq!(
            backup_name(Path::new("/home/u/.bash/")).unwrap(),
            PathBuf::from("/home/u/.bash.bak")
        );
    }

    #[test]
    fn backup_name_rejects_root() {
        assert!(matches!(
            backup_name(Path::new("/")),
            Err(InstallError::NoFileName { .. })
        ));
    }

    #[test]
    fn single_backup_moves_occupant() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("x");
        std::fs::write(&dest, "old").unwrap();

        let actions = run_backup(&RealFs, &dest, false);

        assert_eq!(
            actions,
            vec![Action::Backup {
                from: dest.clone(),
                to: dir.path().join("x.bak"),
            }]
        );
        assert!(!RealFs.inspect(&dest).unwrap().is_occupied());
        assert_eq!(std::fs::read(dir.path().join("x.bak")).unwrap(), b"old");
    }

    #[test]
    fn chain_pushes_older_backups_further() {
        let dir = tempfile::tempdir().unwrap();
        let x = dir.path().join("x");
        let x_bak = dir.path().join("x.bak");
        let x_bak_bak = dir.path().join("x.bak.bak");
        std::fs::write(&x, "current").unwrap();
        std::fs::write(&x_bak, "previous").unwrap();

        let actions = run_backup(&RealFs, &x, false);

        assert_eq!(
            actions,
            vec![
                Action::Backup {
                    from: x_bak.clone(),
                    to: x_bak_bak.clone(),
                },
                Action::Backup {
                    from: x.clone(),
                    to: x_bak.clone(),
                },
            ]
        );
        assert!(!RealFs.inspect(&x).unwrap().is_occupied());
        assert_eq!(std::fs::read(&x_bak).unwrap(), b"current");
        assert_eq!(std::fs::read(&x_bak_bak).unwrap(), b"previous");
    }

    #[test]
    fn long_chain_preserves_every_generation() {
        let dir = tempfile::tempdir().unwrap();
        let mut name = String::from("x");
        for generation in 0..5 {
            std::fs::write(dir.path().join(&name), generation.to_string()).unwrap();
            name.push_str(BACKUP_SUFFIX);
        }

        let actions = run_backup(&RealFs, &dir.path().join("x"), false);
        assert_eq!(actions.len(), 5);

        let mut name = String::from("x");
        for generation in 0..5 {
            name.push_str(BACKUP_SUFFIX);
            assert_eq!(
                std::fs::read_to_string(dir.path().join(&name)).unwrap(),
                generation.to_string()
            );
        }
    }

    #[cfg(unix)]
    #[test]
    fn dangling_link_counts_as_occupied_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let x = dir.path().join("x");
        let x_bak = dir.path().join("x.bak");
        std::fs::write(&x, "data").unwrap();
        std::os::unix::fs::symlink("/nonexistent", &x_bak).unwrap();

        run_backup(&RealFs, &x, false);

        assert_eq!(std::fs::read(&x_bak).unwrap(), b"data");
        assert_eq!(
            std::fs::read_link(dir.path().join("x.bak.bak")).unwrap(),
            PathBuf::from("/nonexistent")
        );
    }

    #[test]
    fn directories_are_renamed_whole() {
        let dir = tempfile::tempdir().unwrap();
        let x = dir.path().join("x");
        std::fs::create_dir(&x).unwrap();
        std::fs::write(x.join("inner"), "keep").unwrap();

        run_backup(&RealFs, &x, false);

        assert_eq!(
            std::fs::read(dir.path().join("x.bak").join("inner")).unwrap(),
            b"keep"
        );
    }

    #[test]
    fn dry_run_reports_same_chain_without_renaming() {
        let dir = tempfile::tempdir().unwrap();
        let x = dir.path().join("x");
        std::fs::write(&x, "current").unwrap();
        std::fs::write(dir.path().join("x.bak"), "previous").unwrap();
        let before = snapshot(dir.path());

        let fs = CountingFs::default();
        let planned = run_backup(&fs, &x, true);

        assert_eq!(fs.mutations(), 0);
        assert_eq!(snapshot(dir.path()), before);

        let performed = run_backup(&RealFs, &x, false);
        assert_eq!(planned, performed);
    }

    #[test]
    fn failed_rename_aborts_and_keeps_occupant() {
        let dir = tempfile::tempdir().unwrap();
        let x = dir.path().join("x");
        std::fs::write(&x, "current").unwrap();
        std::fs::write(dir.path().join("x.bak"), "previous").unwrap();
        let log = MemoryLog::default();
        let mut reporter = Reporter::new(&log, false);
        let fs = FailingFs::new(FsOp::Rename);

        let err = backup(&fs, &x, 0, &mut reporter).unwrap_err();

        assert!(matches!(err, InstallError::Rename { ref from, .. } if from.ends_with("x.bak")));
        // The first rename of the chain failed, so the second was never tried.
        assert_eq!(fs.calls(), vec![FsOp::Rename]);
        assert_eq!(std::fs::read_to_string(&x).unwrap(), "current");
    }

    #[test]
    fn dry_run_backups_see_earlier_planned_renames() {
        let dir = tempfile::tempdir().unwrap();
        let x = dir.path().join("x");
        let y = dir.path().join("x.bak");
        std::fs::write(&x, "x").unwrap();
        std::fs::write(&y, "y").unwrap();
        let log = MemoryLog::default();
        let mut reporter = Reporter::new(&log, true);

        // Backing up `x.bak` first vacates it, so `x` moves straight there.
        backup(&RealFs, &y, 0, &mut reporter).unwrap();
        backup(&RealFs, &x, 0, &mut reporter).unwrap();

        assert_eq!(
            reporter.into_report().actions,
            vec![
                Action::Backup {
                    from: y.clone(),
                    to: dir.path().join("x.bak.bak"),
                },
                Action::Backup { from: x, to: y },
            ]
        );
    }
}
