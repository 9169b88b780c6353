//! Post-mutation attribute effects
//!
//! Applied to files only, after the rename/copy/move has succeeded. All of
//! these are best-effort: a failure produces a warning, never a batch error.

use std::fs::{self, File, FileTimes};
use std::path::Path;
use std::time::SystemTime;

use super::apply::ApplyOptions;

/// Apply the configured attribute effects to one file
///
/// Returns warnings for effects that failed or are unsupported on this
/// platform.
pub fn apply_attributes(path: &Path, options: &ApplyOptions) -> Vec<String> {
    let mut warnings = Vec::new();

    if options.touch_times {
        if let Err(e) = touch(path) {
            warnings.push(format!("Could not touch {}: {e}", path.display()));
        }
    }

    if options.hidden {
        // Hidden is a real attribute only on Windows; on other platforms a
        // rename to a dot-name would change the path the batch just produced.
        warnings.push(format!(
            "Hidden attribute not supported on this platform, skipped for {}",
            path.display()
        ));
    }

    // Read-only last: touching needs write access.
    if options.read_only {
        if let Err(e) = set_read_only(path) {
            warnings.push(format!(
                "Could not mark {} read-only: {e}",
                path.display()
            ));
        }
    }

    warnings
}

fn touch(path: &Path) -> std::io::Result<()> {
    let now = SystemTime::now();
    let file = File::options().write(true).open(path)?;
    file.set_times(FileTimes::new().set_accessed(now).set_modified(now))
}

fn set_read_only(path: &Path) -> std::io::Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_readonly(true);
    fs::set_permissions(path, permissions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_no_options_no_warnings() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("f.txt");
        File::create(&path).unwrap();
        let warnings = apply_attributes(&path, &ApplyOptions::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_read_only() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("f.txt");
        File::create(&path).unwrap();

        let options = ApplyOptions {
            read_only: true,
            ..Default::default()
        };
        let warnings = apply_attributes(&path, &options);
        assert!(warnings.is_empty(), "{warnings:?}");
        assert!(fs::metadata(&path).unwrap().permissions().readonly());
    }

    #[test]
    fn test_touch_updates_modified() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("f.txt");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"content").unwrap();
        drop(file);

        let before = SystemTime::now();
        let options = ApplyOptions {
            touch_times: true,
            ..Default::default()
        };
        let warnings = apply_attributes(&path, &options);
        assert!(warnings.is_empty(), "{warnings:?}");
        let modified = fs::metadata(&path).unwrap().modified().unwrap();
        assert!(modified >= before || before.duration_since(modified).unwrap().as_secs() < 2);
    }

    #[test]
    fn test_hidden_warns_on_unix() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("f.txt");
        File::create(&path).unwrap();

        let options = ApplyOptions {
            hidden: true,
            ..Default::default()
        };
        let warnings = apply_attributes(&path, &options);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_missing_file_warns_not_panics() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("gone.txt");
        let options = ApplyOptions {
            touch_times: true,
            read_only: true,
            hidden: false,
        };
        let warnings = apply_attributes(&path, &options);
        assert_eq!(warnings.len(), 2);
    }
}
