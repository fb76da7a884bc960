use crate::error;
use crate::util::Result;
use snafu::ResultExt;
use std::fs::Permissions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// The mode of newly created output files, readable by everyone
#[cfg(unix)]
const OUTPUT_FILE_MODE: u32 = 0o644;

/// Writes `bytes` to `path` by writing a temporary file next to it and renaming it afterwards.
///
/// Either the whole content is written or `path` stays untouched. An existing file is
/// replaced and its permissions are kept.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let directory = parent_directory(path);
    let permissions = output_permissions(path);

    let mut file = tempfile::Builder::new()
        .prefix(".cmviz-")
        .suffix(".tmp")
        .tempfile_in(&directory)
        .context(error::CreateOutputFile {
            directory: &directory,
        })?;

    // temporary files are private until they are set to the output's permissions
    if let Some(permissions) = permissions {
        file.as_file()
            .set_permissions(permissions)
            .context(error::WriteOutputFile { path })?;
    }

    file.write_all(bytes)
        .and_then(|()| file.as_file().sync_all())
        .context(error::WriteOutputFile { path })?;

    file.persist(path).context(error::PersistOutputFile { path })?;

    Ok(())
}

/// The directory `path` lives in; relative file names live in the working directory
fn parent_directory(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// The permissions of the file at `path`, or the defaults for new output files
fn output_permissions(path: &Path) -> Option<Permissions> {
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => Some(metadata.permissions()),
        _ => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(Permissions::from_mode(OUTPUT_FILE_MODE))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    #[test]
    fn it_writes_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.png");

        write_atomically(&path, b"first").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"first");

        write_atomically(&path, b"second").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");

        // no temporary files are left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn it_fails_for_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist").join("matrix.png");

        let error = write_atomically(&path, b"content").unwrap_err();

        assert!(matches!(error, RenderError::CreateOutputFile { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn it_fails_for_directories_as_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("matrix.png");
        std::fs::create_dir(&target).unwrap();

        let error = write_atomically(&target, b"content").unwrap_err();

        assert!(matches!(error, RenderError::PersistOutputFile { .. }));
    }

    #[test]
    fn relative_paths_live_in_working_directory() {
        assert_eq!(parent_directory(Path::new("matrix.png")), PathBuf::from("."));
        assert_eq!(
            parent_directory(Path::new("out/matrix.png")),
            PathBuf::from("out")
        );
    }

    #[cfg(unix)]
    fn mode_of(path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;

        std::fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[cfg(unix)]
    fn set_mode(path: &Path, mode: u32) {
        use std::os::unix::fs::PermissionsExt;

        std::fs::set_permissions(path, Permissions::from_mode(mode)).unwrap();
    }

    #[test]
    #[cfg(unix)]
    fn new_files_are_readable_by_everyone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.png");

        write_atomically(&path, b"content").unwrap();

        assert_eq!(mode_of(&path), 0o644);
    }

    #[test]
    #[cfg(unix)]
    fn overwritten_files_keep_their_permissions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.png");

        std::fs::write(&path, b"first").unwrap();
        set_mode(&path, 0o640);

        write_atomically(&path, b"second").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        assert_eq!(mode_of(&path), 0o640);
    }

    #[test]
    #[cfg(unix)]
    fn it_fails_for_read_only_directories() {
        let dir = tempfile::tempdir().unwrap();
        let read_only = dir.path().join("read-only");
        std::fs::create_dir(&read_only).unwrap();
        set_mode(&read_only, 0o555);

        // permissions are not enforced for privileged users
        let unenforced = std::fs::File::create(read_only.join("writable")).is_ok();

        let path = read_only.join("matrix.png");
        let result = write_atomically(&path, b"content");

        set_mode(&read_only, 0o755);

        if unenforced {
            return;
        }

        assert!(matches!(
            result,
            Err(RenderError::CreateOutputFile { directory, .. }) if directory == read_only
        ));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(&read_only).unwrap().count(), 0);
    }
}
