//! Output file handling.

use chrono::Local;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Comment written at the top of every generated file.
pub const GENERATED_HEADER: &str = "/* Do not change, this code is generated. Only code between //[Name:] and //[end] markers is preserved. */\n\n";

/// Timestamp format used in backup file names.
pub const BACKUP_TIMESTAMP: &str = "%Y-%m-%dT%H_%M_%S%.3f";

/// Copies `path` into `dir` as `{file name}-{timestamp}.backup`.
///
/// Returns the backup path, or `None` if `path` does not exist yet.
///
/// # Errors
/// Returns an IO error if the directory or the copy cannot be created.
pub fn backup(path: &Path, dir: &Path) -> io::Result<Option<PathBuf>> {
    match fs::metadata(path) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    }

    fs::create_dir_all(dir)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let target = dir.join(format!(
        "{file_name}-{}.backup",
        Local::now().format(BACKUP_TIMESTAMP)
    ));

    fs::copy(path, &target)?;
    restrict_permissions(&target)?;
    info!(from = %path.display(), to = %target.display(), "backed up previous output");

    Ok(Some(target))
}

/// Writes generated code to `path`, replacing its contents.
///
/// # Errors
/// Returns an IO error if the file cannot be written.
pub fn write_output(path: &Path, code: &str) -> io::Result<()> {
    fs::write(path, format!("{GENERATED_HEADER}{code}"))
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o700))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_missing_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let result = backup(&dir.path().join("models.ts"), &dir.path().join("bak"))
            .expect("Failed to back up");
        assert!(result.is_none());
        assert!(!dir.path().join("bak").exists());
    }

    #[test]
    fn test_backup_copies_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("models.ts");
        fs::write(&path, "old").expect("Failed to write");

        let target = backup(&path, &dir.path().join("bak"))
            .expect("Failed to back up")
            .expect("No backup created");

        let name = target.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("models.ts-"));
        assert!(name.ends_with(".backup"));
        assert_eq!(fs::read_to_string(&target).unwrap(), "old");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&target).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o700);
        }
    }

    #[test]
    fn test_write_output_header() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("models.ts");
        write_output(&path, "export enum A {\n}").expect("Failed to write");
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("/* Do not change"));
        assert!(content.ends_with("\n\nexport enum A {\n}"));
    }
}
