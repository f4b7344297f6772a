// Shared helpers for integration tests.
//
// Provides a temporary dotfiles checkout and destination directory with a
// fluent builder, plus a `Log` implementation that records every line, so
// each integration test can drive the install command in isolation.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use clap::Parser as _;
use dotlink::cli::Cli;
use dotlink::logging::Log;

/// A [`Log`] that keeps every message as `"<channel>: <msg>"`.
#[derive(Debug, Default)]
pub struct RecordingLog {
    lines: RefCell<Vec<String>>,
}

impl RecordingLog {
    /// All recorded lines, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    fn push(&self, channel: &str, msg: &str) {
        self.lines.borrow_mut().push(format!("{channel}: {msg}"));
    }
}

impl Log for RecordingLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }

    fn info(&self, msg: &str) {
        self.push("info", msg);
    }

    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }

    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }

    fn error(&self, msg: &str) {
        self.push("error", msg);
    }

    fn dry_run(&self, msg: &str) {
        self.push("dry_run", msg);
    }
}

/// A dotfiles checkout and a destination directory, both backed by one
/// [`tempfile::TempDir`] that is deleted on drop.
pub struct IntegrationTestContext {
    _tmp: tempfile::TempDir,
    source: PathBuf,
    dest: PathBuf,
}

impl IntegrationTestContext {
    /// Create empty source and destination directories.
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let base = dunce::canonicalize(tmp.path()).expect("canonicalize temp dir");
        let source = base.join("dotfiles");
        let dest = base.join("home");
        std::fs::create_dir(&source).expect("create source dir");
        std::fs::create_dir(&dest).expect("create dest dir");
        Self {
            _tmp: tmp,
            source,
            dest,
        }
    }

    /// The dotfiles checkout.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The destination root.
    pub fn dest(&self) -> &Path {
        &self.dest
    }

    /// Parse a command line pointing at this context, with `extra` flags.
    pub fn cli(&self, extra: &[&str]) -> Cli {
        let mut args = vec![
            "dotlink".to_string(),
            "--source".to_string(),
            self.source.display().to_string(),
            "--directory".to_string(),
            self.dest.display().to_string(),
        ];
        args.extend(extra.iter().map(ToString::to_string));
        Cli::parse_from(args)
    }

    /// Snapshot of every path under the destination: relative path, link
    /// target (if a link) and file content (if a regular file).
    pub fn dest_snapshot(&self) -> Vec<(PathBuf, Option<PathBuf>, Vec<u8>)> {
        let mut out = Vec::new();
        walk(&self.dest, &self.dest, &mut out);
        out.sort();
        out
    }
}

fn walk(root: &Path, dir: &Path, out: &mut Vec<(PathBuf, Option<PathBuf>, Vec<u8>)>) {
    for entry in std::fs::read_dir(dir).expect("read dir") {
        let path = entry.expect("dir entry").path();
        let rel = path.strip_prefix(root).expect("under root").to_path_buf();
        let meta = std::fs::symlink_metadata(&path).expect("lstat");
        if meta.file_type().is_symlink() {
            out.push((rel, Some(std::fs::read_link(&path).expect("read link")), Vec::new()));
        } else if meta.is_dir() {
            out.push((rel, None, Vec::new()));
            walk(root, &path, out);
        } else {
            out.push((rel, None, std::fs::read(&path).expect("read file")));
        }
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a context with empty directories.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Write a file into the checkout, creating parent directories.
    pub fn with_source_file(self, rel: &str, content: &str) -> Self {
        write_file(&self.ctx.source.join(rel), content);
        self
    }

    /// Write a file into the destination, creating parent directories.
    pub fn with_dest_file(self, rel: &str, content: &str) -> Self {
        write_file(&self.ctx.dest.join(rel), content);
        self
    }

    /// Write `links.toml` into the checkout.
    pub fn with_mapping(self, content: &str) -> Self {
        write_file(&self.ctx.source.join("links.toml"), content);
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent");
    }
    std::fs::write(path, content).expect("write file");
}
