//! I/O boundary traits for testability
//!
//! The render service only talks to the file system through [`FileSystem`],
//! so it can be tested with in-memory implementations.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replace the file at `path` with `content`.
    ///
    /// Either the whole content is written or the previous file is left untouched.
    /// A symlink at `path` is followed and its target replaced.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;

    /// Check if the current user may write to an existing file.
    fn is_writable(&self, path: &Path) -> io::Result<bool>;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        let target = resolve_link(path)?;
        let dir = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let previous = std::fs::metadata(&target).ok().map(|m| m.permissions());

        let mut tmp = temp_file_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        if let Some(perms) = previous {
            tmp.as_file().set_permissions(perms)?;
        }
        tmp.persist(&target).map_err(|e| e.error)?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_writable(&self, path: &Path) -> io::Result<bool> {
        if std::fs::metadata(path)?.permissions().readonly() {
            return Ok(false);
        }
        // permission bits alone miss files owned by someone else
        Ok(OpenOptions::new().append(true).open(path).is_ok())
    }
}

/// Follow symlinks so the link survives and its target gets the content.
fn resolve_link(path: &Path) -> io::Result<PathBuf> {
    match std::fs::canonicalize(path) {
        Ok(target) => Ok(target),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            if !path.is_symlink() {
                return Ok(path.to_path_buf());
            }
            // dangling link: create the file it points to
            let link = std::fs::read_link(path)?;
            Ok(match path.parent() {
                Some(dir) => dir.join(link),
                None => link,
            })
        }
        Err(e) => Err(e),
    }
}

/// Temporary file that becomes a new output: created 0666 minus the umask,
/// like any file the user writes, instead of tempfile's private 0600.
#[cfg(unix)]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new()
        .prefix(".treerender")
        .permissions(Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    tempfile::Builder::new().prefix(".treerender").tempfile_in(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_and_replaces_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.txt");
        let fs = RealFileSystem;

        fs.write(&path, "first\n").unwrap();
        fs.write(&path, "second\n").unwrap();

        assert_eq!(fs.read_to_string(&path).unwrap(), "second\n");
        // no temporary files left behind
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_is_writable_reflects_permissions() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ro.txt");
        std::fs::write(&path, "x").unwrap();
        let fs = RealFileSystem;
        assert!(fs.is_writable(&path).unwrap());

        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_readonly(true);
        std::fs::set_permissions(&path, perms).unwrap();
        assert!(!fs.is_writable(&path).unwrap());
    }

    #[test]
    fn test_is_writable_missing_path_errors() {
        let temp = TempDir::new().unwrap();
        assert!(RealFileSystem.is_writable(&temp.path().join("nope")).is_err());
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::os::unix::fs::{symlink, PermissionsExt};

        fn mode(path: &Path) -> u32 {
            std::fs::metadata(path).unwrap().permissions().mode() & 0o777
        }

        #[test]
        fn test_write_keeps_mode_of_replaced_file() {
            let temp = TempDir::new().unwrap();
            let path = temp.path().join("out.txt");
            std::fs::write(&path, "old\n").unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();

            RealFileSystem.write(&path, "new\n").unwrap();

            assert_eq!(mode(&path), 0o640);
            assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
        }

        #[test]
        fn test_write_new_file_gets_umask_mode_not_private() {
            let temp = TempDir::new().unwrap();
            let plain = temp.path().join("plain.txt");
            let rendered = temp.path().join("rendered.txt");
            std::fs::write(&plain, "x").unwrap();

            RealFileSystem.write(&rendered, "x").unwrap();

            assert_eq!(mode(&rendered), mode(&plain));
        }

        #[test]
        fn test_write_through_symlink_updates_target() {
            let temp = TempDir::new().unwrap();
            let target = temp.path().join("target.txt");
            let link = temp.path().join("link.txt");
            std::fs::write(&target, "old").unwrap();
            symlink(&target, &link).unwrap();

            RealFileSystem.write(&link, "new").unwrap();

            assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
            assert_eq!(std::fs::read_to_string(&target).unwrap(), "new");
        }

        #[test]
        fn test_write_through_dangling_symlink_creates_target() {
            let temp = TempDir::new().unwrap();
            let target = temp.path().join("missing.txt");
            let link = temp.path().join("link.txt");
            symlink(&target, &link).unwrap();

            RealFileSystem.write(&link, "made").unwrap();

            assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
            assert_eq!(std::fs::read_to_string(&target).unwrap(), "made");
        }
    }
}
