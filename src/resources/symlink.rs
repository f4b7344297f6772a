//! Symlink creation and the literal link-identity rule.
use std::io;
use std::path::Path;

/// Return `true` if a link whose stored target is `stored` counts as
/// pointing at `source`.
///
/// The comparison is on the raw path bytes: no canonicalization, no
/// relative-path resolution, no trailing-separator normalization.
#[must_use]
pub fn points_to(stored: &Path, source: &Path) -> bool {
    stored.as_os_str() == source.as_os_str()
}

/// Create a symlink at `link` pointing to `target`.
///
/// On Windows the link flavour is picked from the target's kind.
///
/// # Errors
///
/// Returns an error if the link cannot be created.
pub fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link)
    }

    #[cfg(windows)]
    {
        if target.is_dir() {
            std::os::windows::fs::symlink_dir(target, link)
        } else {
            std::os::windows::fs::symlink_file(target, link)
        }
    }
}
