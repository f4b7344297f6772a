//! Stamps `DOTLINK_VERSION` into the build for `--version` and the log header.
//!
//! An explicit `DOTLINK_VERSION` (set by release builds) wins. Otherwise the
//! version is `git describe` of the checkout, and when neither is available
//! the package version from the manifest is used as is.

use std::process::Command;

const VERSION_VAR: &str = "DOTLINK_VERSION";

fn git_describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();
    (output.status.success() && !described.is_empty()).then(|| described.to_string())
}

fn main() {
    let version = std::env::var(VERSION_VAR).ok().or_else(git_describe);
    if let Some(version) = version {
        println!("cargo:rustc-env={VERSION_VAR}={version}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
    println!("cargo:rerun-if-env-changed={VERSION_VAR}");
}
