/// Shared filesystem helpers.
pub mod fs {
    use std::fs;
    use std::io;
    use std::path::Path;

    /// Create a single directory, treating an existing directory as success.
    ///
    /// The parent must already exist; an existing non-directory at `path` is
    /// reported as `AlreadyExists`.
    pub fn ensure_dir(path: &Path) -> io::Result<()> {
        match fs::create_dir(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
            Err(err) => Err(err),
        }
    }

    /// Whether the current process may both read and write `path`.
    #[cfg(unix)]
    pub fn can_read_write(path: &Path) -> bool {
        use std::ffi::CString;
        use std::os::unix::ffi::OsStrExt;

        let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
            return false;
        };
        // SAFETY: `c_path` is NUL-terminated and outlives the call.
        unsafe { libc::access(c_path.as_ptr(), libc::R_OK | libc::W_OK) == 0 }
    }

    #[cfg(not(unix))]
    pub fn can_read_write(path: &Path) -> bool {
        fs::metadata(path)
            .map(|meta| !meta.permissions().readonly())
            .unwrap_or(false)
    }

}
