//! `std::fs`-backed [`Filesystem`] implementation.
use std::ffi::OsString;
use std::io;
use std::path::Path;

use super::{Filesystem, Node, SourceKind};

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl Filesystem for RealFs {
    fn inspect(&self, path: &Path) -> io::Result<Node> {
        let meta = match std::fs::symlink_metadata(path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Node::Absent),
            Err(e) => return Err(e),
        };
        if meta.file_type().is_symlink() {
            return Ok(Node::Symlink(std::fs::read_link(path)?));
        }
        if meta.is_dir() {
            Ok(Node::Directory)
        } else {
            Ok(Node::Other)
        }
    }

    fn source_kind(&self, path: &Path) -> io::Result<SourceKind> {
        let meta = std::fs::metadata(path)?;
        Ok(if meta.is_dir() {
            SourceKind::Directory
        } else {
            SourceKind::File
        })
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn symlink(&self, target: &Path, link: &Path) -> io::Result<()> {
        super::symlink::create_symlink(target, link)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }
}
