//! Recorded installer decisions and their console rendering.
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use super::overlay::Overlay;
use crate::logging::Log;
use crate::resources::{Filesystem, Node};

/// One decision taken by the installer.
///
/// Every action is reported before it is executed; in dry-run mode the
/// mutating ones ([`Backup`](Self::Backup), [`CreateDir`](Self::CreateDir),
/// [`Link`](Self::Link)) are reported and never executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A work item was reached (source shown relative to the source root).
    Visit {
        /// Source path relative to the source root.
        source: PathBuf,
        /// Destination path.
        dest: PathBuf,
    },
    /// An occupant was moved to a backup name.
    Backup {
        /// Occupied path.
        from: PathBuf,
        /// Backup name.
        to: PathBuf,
    },
    /// A destination directory was created (with parents).
    CreateDir {
        /// The new directory.
        path: PathBuf,
    },
    /// A symbolic link was created.
    Link {
        /// Where the link lives.
        link: PathBuf,
        /// Its stored target.
        target: PathBuf,
    },
    /// The destination already was the desired link.
    AlreadyLinked {
        /// The existing link.
        link: PathBuf,
    },
}

impl Action {
    /// Return `true` for actions that change the filesystem.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::Backup { .. } | Self::CreateDir { .. } | Self::Link { .. }
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Visit { source, dest } => {
                write!(f, "{} => {}", source.display(), dest.display())
            }
            Self::Backup { from, to } => {
                write!(f, "Backing up {} to {}", from.display(), to.display())
            }
            Self::CreateDir { path } => write!(f, "create directory {}", path.display()),
            Self::Link { link, target } => {
                write!(f, "link {} -> {}", link.display(), target.display())
            }
            Self::AlreadyLinked { link } => write!(f, "ok: {} (already linked)", link.display()),
        }
    }
}

/// Everything one run decided, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Actions in the order they were reported.
    pub actions: Vec<Action>,
    /// Whether the run was a dry run.
    pub dry_run: bool,
}

impl Report {
    fn count(&self, pred: impl Fn(&Action) -> bool) -> usize {
        self.actions.iter().filter(|a| pred(a)).count()
    }

    /// Number of links created.
    #[must_use]
    pub fn links_created(&self) -> usize {
        self.count(|a| matches!(a, Action::Link { .. }))
    }

    /// Number of links found already correct.
    #[must_use]
    pub fn already_linked(&self) -> usize {
        self.count(|a| matches!(a, Action::AlreadyLinked { .. }))
    }

    /// Number of renames performed by the backup resolver.
    #[must_use]
    pub fn backups(&self) -> usize {
        self.count(|a| matches!(a, Action::Backup { .. }))
    }

    /// Number of directories created.
    #[must_use]
    pub fn dirs_created(&self) -> usize {
        self.count(|a| matches!(a, Action::CreateDir { .. }))
    }

    /// Return `true` if any action changed (or would change) the filesystem.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.actions.iter().any(Action::is_mutation)
    }

    /// One-line human summary.
    #[must_use]
    pub fn summary(&self) -> String {
        let verb = if self.dry_run { "would link" } else { "linked" };
        format!(
            "{} {verb}, {} already ok, {} backed up, {} directories created",
            self.links_created(),
            self.already_linked(),
            self.backups(),
            self.dirs_created()
        )
    }
}

/// Writes each action to the log at its recursion depth and records it.
///
/// In dry-run it also carries the [`Overlay`] of planned mutations, so every
/// inspection during the run sees what earlier decisions would have done.
pub(crate) struct Reporter<'a> {
    log: &'a dyn Log,
    report: Report,
    overlay: Option<Overlay>,
}

impl<'a> Reporter<'a> {
    pub(crate) fn new(log: &'a dyn Log, dry_run: bool) -> Self {
        Self {
            log,
            report: Report {
                actions: Vec::new(),
                dry_run,
            },
            overlay: dry_run.then(Overlay::default),
        }
    }

    /// Planned state to update instead of the filesystem; `None` outside
    /// dry-run.
    pub(crate) const fn planned(&mut self) -> Option<&mut Overlay> {
        self.overlay.as_mut()
    }

    /// Inspect `path`, seeing through planned mutations in dry-run.
    pub(crate) fn inspect(&self, fs: &dyn Filesystem, path: &Path) -> io::Result<Node> {
        match &self.overlay {
            Some(overlay) => overlay.inspect(fs, path),
            None => fs.inspect(path),
        }
    }

    pub(crate) fn record(&mut self, depth: usize, action: Action) {
        let line = format!("{}{action}", "  ".repeat(depth));
        if action.is_mutation() && self.report.dry_run {
            self.log.dry_run(&line);
        } else if matches!(action, Action::Visit { .. } | Action::Backup { .. }) {
            self.log.info(&line);
        } else {
            self.log.debug(&line);
        }
        self.report.actions.push(action);
    }

    pub(crate) fn into_report(self) -> Report {
        self.report
    }
}

impl fmt::Debug for Reporter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter")
            .field("report", &self.report)
            .field("overlay", &self.overlay)
            .finish_non_exhaustive()
    }
}
