//! The mapping table: which source paths land where under the destination.
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use crate::error::ConfigError;

/// Name of the optional mapping file looked up in the source root.
pub const MAPPING_FILE: &str = "links.toml";

/// Default table, in install order: directories first, then single files.
const BUILTIN: &[(&str, &str)] = &[
    // Directories
    ("bash/", ".bash/"),
    ("bin/", "bin/"),
    ("git/", ".git/"),
    ("vim/", ".vim/"),
    // Files
    ("ackrc", ".ackrc"),
    ("bash_profile", ".bash_profile"),
    ("bashrc", ".bashrc"),
    ("clang-format", ".clang-format"),
    ("flake8", ".flake8"),
    ("gitconfig", ".gitconfig"),
    ("inputrc", ".inputrc"),
    ("tmux.conf", ".tmux.conf"),
    ("vimrc", ".vimrc"),
];

/// One (source, destination) pair, both relative to their roots.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Mapping {
    /// Path relative to the source root.
    pub source: String,
    /// Path relative to the destination root.
    pub target: String,
}

impl Mapping {
    /// Create a mapping entry.
    #[must_use]
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

/// On-disk shape of `links.toml`.
#[derive(Debug, Deserialize)]
struct MappingFile {
    #[serde(default)]
    link: Vec<Mapping>,
}

/// The built-in mapping table.
#[must_use]
pub fn builtin() -> Vec<Mapping> {
    BUILTIN
        .iter()
        .map(|(source, target)| Mapping::new(source, target))
        .collect()
}

/// Load the mapping table for `source_root`.
///
/// Uses `<source_root>/links.toml` when present, the built-in table
/// otherwise. Either way the result is validated.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if validation
/// fails.
pub fn load(source_root: &Path) -> Result<Vec<Mapping>, ConfigError> {
    let path = source_root.join(MAPPING_FILE);
    let mappings = if path.exists() {
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        parse(&content).map_err(|source| ConfigError::Parse { path, source })?
    } else {
        builtin()
    };
    validate(&mappings)?;
    Ok(mappings)
}

/// Parse the contents of a mapping file.
///
/// # Errors
///
/// Returns an error if `content` is not a valid mapping file.
pub fn parse(content: &str) -> Result<Vec<Mapping>, toml::de::Error> {
    toml::from_str::<MappingFile>(content).map(|f| f.link)
}

/// Check that every entry is usable and no destination is visited twice.
///
/// # Errors
///
/// Returns the first problem found.
pub fn validate(mappings: &[Mapping]) -> Result<(), ConfigError> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut targets: Vec<(PathBuf, &str)> = Vec::new();

    for m in mappings {
        check_relative(m, &m.source, "source")?;
        check_relative(m, &m.target, "target")?;

        let normalized: PathBuf = Path::new(&m.target).components().collect();
        if !seen.insert(normalized.clone()) {
            return Err(ConfigError::DuplicateTarget(m.target.clone()));
        }
        targets.push((normalized, m.target.as_str()));
    }

    for (outer, outer_raw) in &targets {
        for (inner, inner_raw) in &targets {
            if inner != outer && inner.starts_with(outer) {
                return Err(ConfigError::OverlappingTargets {
                    outer: (*outer_raw).to_string(),
                    inner: (*inner_raw).to_string(),
                });
            }
        }
    }
    Ok(())
}

fn check_relative(m: &Mapping, path: &str, what: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidMapping {
        entry: format!("{} => {}", m.source, m.target),
        reason,
    };
    if path.trim().is_empty() {
        return Err(invalid(format!("{what} is empty")));
    }
    let p = Path::new(path);
    if p.has_root() || p.is_absolute() {
        return Err(invalid(format!("{what} must be relative")));
    }
    if p.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(invalid(format!("{what} must not contain '..'")));
    }
    if p.components().all(|c| matches!(c, Component::CurDir)) {
        return Err(invalid(format!("{what} must name a path below its root")));
    }
    Ok(())
}
