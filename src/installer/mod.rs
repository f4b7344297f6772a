//! Recursive link-tree installer.
//!
//! Given a source path and a destination path, the installer decides for
//! every node whether to create a symlink, create a directory and recurse,
//! or move existing content out of the way first. It never deletes: any
//! occupant that is not already the desired end state goes through the
//! [backup resolver](crate::resources::backup).
//!
//! Decisions are computed identically with and without dry-run. A dry run
//! applies its mutations to a planned overlay instead of the filesystem, so
//! later decisions still see them.
mod overlay;
pub mod report;

use std::io;
use std::path::{Path, PathBuf};

use crate::error::InstallError;
use crate::logging::Log;
use crate::resources::{Filesystem, Node, SourceKind, backup, symlink};
use report::{Action, Report, Reporter};

/// Child name reserved for keeping otherwise-empty source directories in
/// version control. Never installed.
pub const PLACEHOLDER: &str = "dummy";

/// Materializes source trees as symlinks under a destination.
#[derive(Debug)]
pub struct Installer<'a> {
    fs: &'a dyn Filesystem,
    source_root: &'a Path,
    reporter: Reporter<'a>,
}

impl<'a> Installer<'a> {
    /// Create an installer.
    ///
    /// `source_root` is only used to shorten source paths in the report.
    #[must_use]
    pub fn new(
        fs: &'a dyn Filesystem,
        log: &'a dyn Log,
        source_root: &'a Path,
        dry_run: bool,
    ) -> Self {
        Self {
            fs,
            source_root,
            reporter: Reporter::new(log, dry_run),
        }
    }

    /// Install one work item.
    ///
    /// Trailing separators are dropped from both paths so that a
    /// destination like `.bash/` is inspected as the entry itself rather
    /// than whatever a symlink there points to.
    ///
    /// # Errors
    ///
    /// Returns an error if `source` does not exist or any filesystem
    /// operation fails. The run should be aborted: nothing already done is
    /// rolled back.
    pub fn install(&mut self, source: &Path, dest: &Path) -> Result<(), InstallError> {
        let source: PathBuf = source.components().collect();
        let dest: PathBuf = dest.components().collect();
        self.install_node(&source, &dest, 0, false)
    }

    /// Consume the installer and return everything it decided.
    #[must_use]
    pub fn finish(self) -> Report {
        self.reporter.into_report()
    }

    /// `parent_fresh` is set when `dest`'s parent was (or in dry-run would
    /// have been) just created, in which case `dest` is known to be absent.
    fn install_node(
        &mut self,
        source: &Path,
        dest: &Path,
        depth: usize,
        parent_fresh: bool,
    ) -> Result<(), InstallError> {
        let relative = source.strip_prefix(self.source_root).unwrap_or(source);
        self.reporter.record(
            depth,
            Action::Visit {
                source: relative.to_path_buf(),
                dest: dest.to_path_buf(),
            },
        );

        let kind = self.fs.source_kind(source).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                InstallError::SourceMissing {
                    path: source.to_path_buf(),
                }
            } else {
                InstallError::Inspect {
                    path: source.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let node = if parent_fresh {
            Node::Absent
        } else {
            self.reporter
                .inspect(self.fs, dest)
                .map_err(|source| InstallError::Inspect {
                    path: dest.to_path_buf(),
                    source,
                })?
        };

        match kind {
            SourceKind::Directory => self.install_dir(source, dest, depth, &node),
            SourceKind::File => self.install_leaf(source, dest, depth, &node),
        }
    }

    fn install_dir(
        &mut self,
        source: &Path,
        dest: &Path,
        depth: usize,
        node: &Node,
    ) -> Result<(), InstallError> {
        let fresh = match node {
            Node::Directory => false,
            Node::Absent => true,
            // A link to a directory is still replaced: recursing through it
            // would place links inside whatever it points at.
            Node::Symlink(_) | Node::Other => {
                backup::backup(self.fs, dest, depth + 1, &mut self.reporter)?;
                true
            }
        };

        if fresh {
            self.reporter.record(
                depth + 1,
                Action::CreateDir {
                    path: dest.to_path_buf(),
                },
            );
            let fs = self.fs;
            let created = match self.reporter.planned() {
                Some(overlay) => overlay.create_dir_all(fs, dest),
                None => fs.create_dir_all(dest),
            };
            created.map_err(|source| InstallError::CreateDir {
                path: dest.to_path_buf(),
                source,
            })?;
        }

        let children = self
            .fs
            .read_dir(source)
            .map_err(|e| InstallError::ReadDir {
                path: source.to_path_buf(),
                source: e,
            })?;
        for name in children {
            if name == PLACEHOLDER {
                continue;
            }
            self.install_node(&source.join(&name), &dest.join(&name), depth + 1, fresh)?;
        }
        Ok(())
    }

    fn install_leaf(
        &mut self,
        source: &Path,
        dest: &Path,
        depth: usize,
        node: &Node,
    ) -> Result<(), InstallError> {
        match node {
            Node::Symlink(stored) if symlink::points_to(stored, source) => {
                self.reporter.record(
                    depth + 1,
                    Action::AlreadyLinked {
                        link: dest.to_path_buf(),
                    },
                );
                return Ok(());
            }
            Node::Absent => {}
            Node::Symlink(_) | Node::Directory | Node::Other => {
                backup::backup(self.fs, dest, depth + 1, &mut self.reporter)?;
            }
        }

        self.reporter.record(
            depth + 1,
            Action::Link {
                link: dest.to_path_buf(),
                target: source.to_path_buf(),
            },
        );
        let fs = self.fs;
        if let Some(parent) = dest.parent() {
            let created = match self.reporter.planned() {
                Some(overlay) => overlay.create_dir_all(fs, parent),
                None => fs.create_dir_all(parent),
            };
            created.map_err(|e| InstallError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        if let Some(overlay) = self.reporter.planned() {
            overlay.symlink(source, dest);
            return Ok(());
        }
        fs.symlink(source, dest)
            .map_err(|e| InstallError::CreateLink {
                link: dest.to_path_buf(),
                target: source.to_path_buf(),
                source: e,
            })
    }
}
