//! The install command: link every mapping entry into the destination root.
use anyhow::{Context as _, Result};

use crate::cli::Cli;
use crate::config::Config;
use crate::installer::Installer;
use crate::installer::report::Report;
use crate::logging::Log;
use crate::resources::Filesystem;
use crate::resources::fs::RealFs;

/// Resolve configuration from `cli` and install it on the real filesystem.
///
/// # Errors
///
/// Returns an error if configuration cannot be resolved or any entry fails
/// to install.
pub fn run(cli: &Cli, log: &dyn Log) -> Result<Report> {
    let config = Config::resolve(cli)?;
    install_entries(&config, &RealFs, log)
}

/// Run the installer over every mapping entry of `config`.
///
/// Entries are processed in table order. The first failure aborts the run;
/// work already done is left in place and later entries are not visited.
///
/// # Errors
///
/// Returns an error naming the mapping entry that failed.
pub fn install_entries(config: &Config, fs: &dyn Filesystem, log: &dyn Log) -> Result<Report> {
    log.stage(&format!("Installing to {}", config.dest_root.display()));
    log.debug(&format!("source root: {}", config.source_root.display()));
    log.debug(&format!("{} mapping entries", config.mappings.len()));
    if config.dry_run {
        log.dry_run("no changes will be made");
    }

    let mut installer = Installer::new(fs, log, &config.source_root, config.dry_run);
    for (mapping, (source, dest)) in config.mappings.iter().zip(config.work_items()) {
        installer
            .install(&source, &dest)
            .with_context(|| format!("installing {} => {}", mapping.source, mapping.target))?;
    }
    let report = installer.finish();

    log.stage("Summary");
    log.info(&report.summary());
    if !report.has_changes() {
        log.info("everything already up to date");
    }
    Ok(report)
}
