//! Image upload handling.
//!
//! Uploaded files are written into the configured image directory under a
//! sanitized version of the client-supplied filename. A same-named upload
//! overwrites the previous file; collisions are not detected.

use anyhow::{Context, Result};
use std::path::Path;

/// Strip an uploaded filename down to a safe path component.
///
/// Path separators are treated as whitespace, runs of whitespace collapse to
/// a single `_`, anything outside ASCII alphanumerics and `.`/`-`/`_` is
/// dropped, and leading/trailing dots and underscores are trimmed. Returns an
/// empty string when nothing safe remains; callers must reject that case.
pub fn sanitize_filename(name: &str) -> String {
    let spaced = name.replace(['/', '\\'], " ");

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();

    filtered.trim_matches(['.', '_']).to_string()
}

/// Write uploaded bytes under the image directory.
///
/// `filename` must already be sanitized. The directory itself is not created
/// here; a missing directory surfaces as a write error.
pub fn save(image_dir: &Path, filename: &str, bytes: &[u8]) -> Result<()> {
    let dest = image_dir.join(filename);
    std::fs::write(&dest, bytes)
        .with_context(|| format!("Failed to write upload to {}", dest.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_plain_names() {
        assert_eq!(sanitize_filename("logo.png"), "logo.png");
        assert_eq!(sanitize_filename("My Photo 01.jpg"), "My_Photo_01.jpg");
        assert_eq!(sanitize_filename("çekici.png"), "ekici.png");
    }

    #[test]
    fn test_sanitize_strips_path_traversal() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_filename("..\\..\\boot.ini"), "boot.ini");
        assert_eq!(sanitize_filename("/var/www/shell.php"), "var_www_shell.php");
    }

    #[test]
    fn test_sanitize_can_leave_nothing() {
        assert_eq!(sanitize_filename(""), "");
        assert_eq!(sanitize_filename("../.."), "");
        assert_eq!(sanitize_filename("...."), "");
    }

    #[test]
    fn test_save_overwrites_same_name() {
        let temp = TempDir::new().unwrap();

        save(temp.path(), "a.png", b"first").unwrap();
        save(temp.path(), "a.png", b"second").unwrap();

        let stored = std::fs::read(temp.path().join("a.png")).unwrap();
        assert_eq!(stored, b"second");
    }

    #[test]
    fn test_save_fails_when_directory_missing() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        assert!(save(&missing, "a.png", b"data").is_err());
    }
}
