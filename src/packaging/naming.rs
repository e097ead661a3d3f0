//! Output file naming

use crate::core::errors::{Result, TofuError};
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Generic stem used when a derived name is rejected
pub const FALLBACK_STEM: &str = "tofu";

/// Write to `dir/derived`, retrying once at `dir/fallback`
///
/// A failure at the fallback path is fatal.
pub fn write_with_fallback<F>(dir: &Path, derived: &str, fallback: &str, mut write: F) -> Result<PathBuf>
where
    F: FnMut(&Path) -> io::Result<()>,
{
    let preferred = dir.join(derived);
    match write(&preferred) {
        Ok(()) => Ok(preferred),
        Err(err) => {
            warn!(
                "Could not write {} ({}); using {} instead",
                preferred.display(),
                err,
                fallback
            );
            let fallback_path = dir.join(fallback);
            write(&fallback_path).map_err(|source| TofuError::OutputRejected {
                path: fallback_path.clone(),
                source,
            })?;
            Ok(fallback_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ErrorKind;
    use std::fs;

    #[test]
    fn test_derived_name_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_with_fallback(dir.path(), "tofu_U+0041_U+0044.ttf", "tofu.ttf", |p| {
            fs::write(p, b"font")
        })
        .unwrap();
        assert_eq!(path, dir.path().join("tofu_U+0041_U+0044.ttf"));
        assert!(path.exists());
    }

    #[test]
    fn test_overlong_name_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let derived = format!("{}.ttc", "U+0041_U+0044_".repeat(40));
        let path = write_with_fallback(dir.path(), &derived, "tofu.ttc", |p| fs::write(p, b"ttc"))
            .unwrap();
        assert_eq!(path, dir.path().join("tofu.ttc"));
        assert_eq!(fs::read(&path).unwrap(), b"ttc");
    }

    #[test]
    fn test_second_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut attempts = 0;
        let err = write_with_fallback(dir.path(), "a.ttf", "b.ttf", |_| {
            attempts += 1;
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        })
        .unwrap_err();
        assert_eq!(attempts, 2);
        assert_eq!(err.kind(), ErrorKind::Resource);
        assert!(matches!(err, TofuError::OutputRejected { .. }));
    }
}
