use std::io;

use tracing::{debug, error, info};

use crate::config::Layout;
use crate::error::ProvisionError;
use crate::util::fs::{can_read_write, ensure_dir};

/// Verify the layout root and create its `projects` and `logs` directories.
///
/// Fails with [`ProvisionError::RootNotFound`] when the root is missing and
/// [`ProvisionError::PermissionDenied`] when it is not both readable and
/// writable. Existing child directories are left alone, so repeated calls are
/// safe. Nothing guards the gap between the checks and the creation step.
pub fn ensure_directories(layout: &Layout) -> Result<(), ProvisionError> {
    let root = layout.root();

    match root.as_std_path().try_exists() {
        Ok(true) => {}
        Ok(false) => {
            return Err(reject(ProvisionError::RootNotFound {
                path: root.to_path_buf(),
            }));
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(reject(ProvisionError::RootNotFound {
                path: root.to_path_buf(),
            }));
        }
        // An ancestor without search permission hides the root from stat.
        Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
            return Err(reject(ProvisionError::PermissionDenied {
                path: root.to_path_buf(),
            }));
        }
        Err(err) => return Err(err.into()),
    }

    if !can_read_write(root.as_std_path()) {
        return Err(reject(ProvisionError::PermissionDenied {
            path: root.to_path_buf(),
        }));
    }

    for dir in [layout.projects_dir(), layout.logs_dir()] {
        debug!(dir = %dir, "ensuring directory");
        ensure_dir(dir.as_std_path())?;
    }

    info!(root = %root, "directories ensured");
    Ok(())
}

fn reject(err: ProvisionError) -> ProvisionError {
    if let Some(path) = err.path() {
        error!(root = %path, "{err}");
    }
    err
}
