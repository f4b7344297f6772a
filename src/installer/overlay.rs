//! Planned filesystem state for dry runs.
//!
//! A dry run performs no mutation, yet later decisions in the same run must
//! see what earlier ones would have done: a link created for one sibling
//! occupies a name another sibling's backup chain walks through. The
//! overlay records every planned mutation and answers inspections from it,
//! falling back to the real filesystem for anything it has not touched.
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::resources::{Filesystem, Node};

/// A planned path and, for renamed content, where that content lives on disk.
#[derive(Debug, Clone)]
struct Entry {
    node: Node,
    /// Real path the content started at, for content that was only moved.
    /// `None` for content the run itself created.
    origin: Option<PathBuf>,
}

/// Paths a dry run would have filled or emptied.
#[derive(Debug, Default)]
pub(crate) struct Overlay {
    entries: HashMap<PathBuf, Entry>,
}

impl Overlay {
    /// Classify `path` as it would be after the planned mutations so far.
    pub(crate) fn inspect(&self, fs: &dyn Filesystem, path: &Path) -> io::Result<Node> {
        if let Some(entry) = self.entries.get(path) {
            return Ok(entry.node.clone());
        }
        for ancestor in path.ancestors().skip(1) {
            let Some(entry) = self.entries.get(ancestor) else {
                continue;
            };
            let rel = path.strip_prefix(ancestor).unwrap_or(path);
            return match (&entry.origin, &entry.node) {
                (Some(origin), _) => fs.inspect(&origin.join(rel)),
                // Fresh directories are empty; nothing exists under a vacated path.
                (None, Node::Directory | Node::Absent) => Ok(Node::Absent),
                (None, _) => fs.inspect(path),
            };
        }
        fs.inspect(path)
    }

    /// Plan `create_dir_all(path)`.
    pub(crate) fn create_dir_all(&mut self, fs: &dyn Filesystem, path: &Path) -> io::Result<()> {
        let mut missing = Vec::new();
        for dir in path.ancestors() {
            if dir.as_os_str().is_empty() || self.inspect(fs, dir)?.is_occupied() {
                break;
            }
            missing.push(dir.to_path_buf());
        }
        for dir in missing {
            self.set(dir, Node::Directory, None);
        }
        Ok(())
    }

    /// Plan `symlink(target, link)`.
    pub(crate) fn symlink(&mut self, target: &Path, link: &Path) {
        self.set(link.to_path_buf(), Node::Symlink(target.to_path_buf()), None);
    }

    /// Plan `rename(from, to)`. Anything already planned under `from` moves
    /// along with it.
    pub(crate) fn rename(&mut self, fs: &dyn Filesystem, from: &Path, to: &Path) -> io::Result<()> {
        let node = self.inspect(fs, from)?;
        let origin = self.origin(from);

        self.entries.retain(|p, _| !p.starts_with(to));
        let moved: Vec<(PathBuf, Entry)> = self
            .entries
            .iter()
            .filter(|(p, _)| p.as_path() != from && p.starts_with(from))
            .map(|(p, e)| (p.clone(), e.clone()))
            .collect();
        for (path, entry) in moved {
            self.entries.remove(&path);
            if let Ok(rel) = path.strip_prefix(from) {
                self.entries.insert(to.join(rel), entry);
            }
        }

        self.set(to.to_path_buf(), node, origin);
        self.set(from.to_path_buf(), Node::Absent, None);
        Ok(())
    }

    fn set(&mut self, path: PathBuf, node: Node, origin: Option<PathBuf>) {
        self.entries.insert(path, Entry { node, origin });
    }

    fn origin(&self, path: &Path) -> Option<PathBuf> {
        if let Some(entry) = self.entries.get(path) {
            return entry.origin.clone();
        }
        for ancestor in path.ancestors().skip(1) {
            if let Some(entry) = self.entries.get(ancestor) {
                let rel = path.strip_prefix(ancestor).unwrap_or(path);
                return entry.origin.as_ref().map(|o| o.join(rel));
            }
        }
        Some(path.to_path_buf())
    }
}
