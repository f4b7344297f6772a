//! Domain-specific error types for the installer.
//!
//! Internal modules return typed errors ([`InstallError`], [`ConfigError`])
//! while the command handler at the CLI boundary converts them to
//! [`anyhow::Error`] via the standard `?` operator and adds context naming
//! the mapping entry being processed.
//!
//! # Error hierarchy
//!
//! ```text
//! ConfigError:  root resolution, links.toml parsing, mapping validation
//! InstallError: filesystem failures while materializing the link tree
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while materializing the link tree.
///
/// Every variant is fatal: the installer aborts on the first one so that a
/// half-finished backup can never be followed by a link that overwrites data.
#[derive(Error, Debug)]
pub enum InstallError {
    /// The source path of a work item does not exist.
    #[error("source does not exist: {}", path.display())]
    SourceMissing {
        /// The missing source path.
        path: PathBuf,
    },

    /// A path could not be classified.
    #[error("cannot inspect {}: {source}", path.display())]
    Inspect {
        /// Path that was being inspected.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A source directory could not be enumerated.
    #[error("cannot read directory {}: {source}", path.display())]
    ReadDir {
        /// Directory that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A destination directory could not be created.
    #[error("cannot create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A symbolic link could not be created.
    #[error("cannot create link {} -> {}: {source}", link.display(), target.display())]
    CreateLink {
        /// Where the link was being created.
        link: PathBuf,
        /// What the link should point to.
        target: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An occupant could not be moved to its backup name.
    #[error("cannot back up {} to {}: {source}", from.display(), to.display())]
    Rename {
        /// Current location of the occupant.
        from: PathBuf,
        /// Backup name it was being moved to.
        to: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A destination has no final name component to append a suffix to.
    #[error("cannot derive a backup name for {}", path.display())]
    NoFileName {
        /// The offending destination.
        path: PathBuf,
    },
}

/// Errors that arise while resolving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No `--directory` was given and the home directory is unknown.
    #[error("cannot determine home directory; pass --directory")]
    HomeNotFound,

    /// The source root does not exist or cannot be resolved.
    #[error("invalid source root {}: {source}", path.display())]
    SourceRoot {
        /// The source root as given.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A path could not be made absolute.
    #[error("cannot resolve {}: {source}", path.display())]
    Io {
        /// Path that was being resolved or read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// `links.toml` is not valid TOML or does not match the schema.
    #[error("invalid mapping file {}: {source}", path.display())]
    Parse {
        /// Path to the mapping file.
        path: PathBuf,
        /// Underlying parse error.
        source: toml::de::Error,
    },

    /// A mapping entry has an unusable source or target.
    #[error("invalid mapping '{entry}': {reason}")]
    InvalidMapping {
        /// The entry as `source => target`.
        entry: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Two mapping entries install to the same destination.
    #[error("destination '{0}' is mapped more than once")]
    DuplicateTarget(String),

    /// One destination lies inside another.
    #[error("destination '{inner}' is nested inside '{outer}'")]
    OverlappingTargets {
        /// The enclosing destination.
        outer: String,
        /// The nested destination.
        inner: String,
    },
}
