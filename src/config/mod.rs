//! Run configuration: roots, dry-run flag and the mapping table.
//!
//! Everything the installer needs is resolved here once, up front, and
//! passed down explicitly; nothing deeper in the crate reads the
//! environment.
pub mod mapping;

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::error::ConfigError;

/// Fully resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute, canonical source root. Link targets are built from it.
    pub source_root: PathBuf,
    /// Absolute destination root (symlinks in it are not resolved).
    pub dest_root: PathBuf,
    /// Inspect and report only.
    pub dry_run: bool,
    /// Ordered work list.
    pub mappings: Vec<mapping::Mapping>,
}

impl Config {
    /// Resolve configuration from parsed command-line arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if either root cannot be resolved or the mapping
    /// table is invalid.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let source_root = resolve_source_root(cli.source.as_deref())?;
        let dest_root = resolve_dest_root(cli.directory.as_deref(), dirs::home_dir())?;
        let mappings = mapping::load(&source_root)?;
        Ok(Self {
            source_root,
            dest_root,
            dry_run: cli.dry_run,
            mappings,
        })
    }

    /// Absolute source and destination paths for every mapping entry.
    #[must_use]
    pub fn work_items(&self) -> Vec<(PathBuf, PathBuf)> {
        self.mappings
            .iter()
            .map(|m| (self.source_root.join(&m.source), self.dest_root.join(&m.target)))
            .collect()
    }
}

/// Resolve the source root: explicit path (or `DOTLINK_ROOT`, folded in by
/// the CLI parser), else the current directory, made canonical.
///
/// # Errors
///
/// Returns [`ConfigError::SourceRoot`] if the directory does not exist.
pub fn resolve_source_root(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let raw = match explicit {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir().map_err(|source| ConfigError::Io {
            path: PathBuf::from("."),
            source,
        })?,
    };
    dunce::canonicalize(&raw).map_err(|source| ConfigError::SourceRoot { path: raw, source })
}

/// Resolve the destination root: explicit path, else `home`.
///
/// The result is made absolute against the current directory but symlinks
/// in it are left alone, so links are created exactly where the user asked.
///
/// # Errors
///
/// Returns [`ConfigError::HomeNotFound`] when neither is available.
pub fn resolve_dest_root(
    explicit: Option<&Path>,
    home: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    let raw = explicit
        .map(Path::to_path_buf)
        .or(home)
        .ok_or(ConfigError::HomeNotFound)?;
    std::path::absolute(&raw).map_err(|source| ConfigError::Io { path: raw, source })
}
