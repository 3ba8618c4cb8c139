use std::fs;
use std::io;
use std::path::Path;

/// Mode for every directory below the home root.
pub const DIR_MODE: u32 = 0o755;

/// Recursively create `path` (missing parents included) with `mode` applied to
/// each directory this call creates. An already existing directory is not an error.
pub fn create_dir_all_with_mode(path: &Path, mode: u32) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    builder.create(path)
}

/// Make sure the directory at `path` exists.
///
/// Returns `Ok(true)` when something was already there (left untouched) and
/// `Ok(false)` when the directory was freshly created. Stat errors other than
/// `NotFound` and creation errors are returned as-is.
///
/// The existence check and the create are two separate syscalls; a concurrent
/// caller can slip in between them.
pub fn create_if_not_exist(path: impl AsRef<Path>) -> io::Result<bool> {
    let path = path.as_ref();
    match fs::metadata(path) {
        Ok(_) => {
            tracing::trace!(path = %path.display(), "directory already exists");
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            create_dir_all_with_mode(path, DIR_MODE)?;
            tracing::debug!(path = %path.display(), "created directory");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_missing_directory_with_parents() {
        let dir = TempDir::new().expect("tempdir");
        let p = dir.path().join("a/b/c");

        let existed = create_if_not_exist(&p).expect("create");
        assert!(!existed);
        assert!(p.is_dir());
    }

    #[test]
    fn existing_directory_is_left_alone() {
        let dir = TempDir::new().expect("tempdir");
        let p = dir.path().join("keep");
        fs::create_dir(&p).expect("mkdir");
        fs::write(p.join("marker"), "x").expect("write");

        let existed = create_if_not_exist(&p).expect("create");
        assert!(existed);
        assert_eq!(fs::read_to_string(p.join("marker")).expect("read"), "x");
    }

    #[test]
    fn existing_file_counts_as_present() {
        let dir = TempDir::new().expect("tempdir");
        let p = dir.path().join("not-a-dir");
        fs::write(&p, "x").expect("write");

        assert!(create_if_not_exist(&p).expect("create"));
        assert!(p.is_file());
    }

    #[cfg(unix)]
    #[test]
    fn stat_error_other_than_not_found_is_surfaced() {
        let dir = TempDir::new().expect("tempdir");
        let file = dir.path().join("file");
        fs::write(&file, "x").expect("write");

        let err = create_if_not_exist(file.join("child")).expect_err("stat under a file");
        assert_ne!(err.kind(), io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn created_directory_mode_stays_within_0755() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().expect("tempdir");
        let p = dir.path().join("moded");
        create_if_not_exist(&p).expect("create");

        let mode = fs::metadata(&p).expect("stat").permissions().mode() & 0o777;
        assert_eq!(mode & !DIR_MODE, 0, "unexpected bits in {mode:o}");
        assert_eq!(mode & 0o700, 0o700);
    }
}
