//! Dotfiles link-tree installer.
//!
//! Materializes a version-controlled dotfiles checkout into a destination
//! directory (normally the home directory) as a tree of symbolic links.
//! Existing files that are in the way are renamed aside with a `.bak` suffix,
//! never deleted, and a second run over an installed tree changes nothing.
//!
//! The crate is organised into layers:
//!
//! - **[`config`]**: resolve the source and destination roots and load the mapping table
//! - **[`resources`]**: filesystem primitives, symlink identity and the backup resolver
//! - **[`installer`]**: the recursive walk deciding what to link, create or move aside
//! - **[`commands`]**: top-level orchestration driven by the [`cli`] arguments
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod installer;
pub mod logging;
pub mod resources;
