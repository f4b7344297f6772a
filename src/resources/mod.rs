//! Filesystem primitives consumed by the installer.
//!
//! The installer never touches `std::fs` directly; it goes through the
//! [`Filesystem`] trait so that every primitive it depends on is listed in
//! one place and can be wrapped in tests. [`RealFs`](fs::RealFs) is the
//! production implementation.
pub mod backup;
pub mod fs;
pub mod symlink;

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Classification of a destination path, produced by one inspection call.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use dotlink::resources::Node;
///
/// let link = Node::Symlink(PathBuf::from("/repo/vimrc"));
/// assert!(link.is_occupied());
/// assert!(!Node::Absent.is_occupied());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nothing exists at the path, not even a dangling link.
    Absent,
    /// A real directory (not a link to one).
    Directory,
    /// A symbolic link, carrying its literal stored target.
    Symlink(PathBuf),
    /// A regular file or any other non-directory, non-link node.
    Other,
}

impl Node {
    /// Return `true` unless the path is [`Node::Absent`].
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        !matches!(self, Self::Absent)
    }
}

/// Kind of a source path, following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// The source (or what it links to) is a directory.
    Directory,
    /// Anything else; installed as a leaf link.
    File,
}

/// The filesystem operations the installer is allowed to perform.
///
/// Read-only queries ([`inspect`](Self::inspect),
/// [`source_kind`](Self::source_kind), [`read_dir`](Self::read_dir)) run in
/// every mode; the mutating ones are only called outside dry-run.
pub trait Filesystem: fmt::Debug {
    /// Classify `path` without following a final symlink.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than the path not existing.
    fn inspect(&self, path: &Path) -> io::Result<Node>;

    /// Classify a source path, following symlinks.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::NotFound`] if the source does not exist.
    fn source_kind(&self, path: &Path) -> io::Result<SourceKind>;

    /// Names of the direct children of `path` in enumeration order.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>>;

    /// Create `path` and any missing ancestors.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create a symbolic link at `link` whose stored target is `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if `link` exists or cannot be created.
    fn symlink(&self, target: &Path, link: &Path) -> io::Result<()>;

    /// Atomically move `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if the rename fails.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}
