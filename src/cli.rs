//! Command-line argument definitions.
use std::path::PathBuf;

use clap::Parser;

/// Command-line interface of the installer.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dotlink",
    about = "Link a dotfiles checkout into a target directory, backing up anything in the way",
    version = option_env!("DOTLINK_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
)]
pub struct Cli {
    /// Install to this directory (defaults to the home directory)
    #[arg(short, long, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Report what would be done without touching the filesystem
    #[arg(short = 'n', long, visible_alias = "dryrun")]
    pub dry_run: bool,

    /// Dotfiles checkout to link from (defaults to the current directory)
    #[arg(short, long, value_name = "PATH", env = "DOTLINK_ROOT")]
    pub source: Option<PathBuf>,

    /// Show every action, including links that are already correct
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["dotlink"]);
        assert!(cli.directory.is_none());
        assert!(!cli.dry_run);
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_directory() {
        let cli = Cli::parse_from(["dotlink", "--directory", "/tmp/home"]);
        assert_eq!(cli.directory, Some(PathBuf::from("/tmp/home")));
    }

    #[test]
    fn parse_directory_short() {
        let cli = Cli::parse_from(["dotlink", "-d", "/tmp/home"]);
        assert_eq!(cli.directory, Some(PathBuf::from("/tmp/home")));
    }

    #[test]
    fn parse_dry_run() {
        assert!(Cli::parse_from(["dotlink", "--dry-run"]).dry_run);
        assert!(Cli::parse_from(["dotlink", "-n"]).dry_run);
    }

    #[test]
    fn parse_dryrun_alias() {
        assert!(Cli::parse_from(["dotlink", "--dryrun"]).dry_run);
    }

    #[test]
    fn parse_source_override() {
        let cli = Cli::parse_from(["dotlink", "--source", "/tmp/dotfiles"]);
        assert_eq!(cli.source, Some(PathBuf::from("/tmp/dotfiles")));
    }

    #[test]
    fn parse_verbose() {
        assert!(Cli::parse_from(["dotlink", "-v"]).verbose);
    }

    #[test]
    fn rejects_subcommands() {
        assert!(Cli::try_parse_from(["dotlink", "install"]).is_err());
    }
}
