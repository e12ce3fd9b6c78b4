use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Failures raised while provisioning the root layout.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// The root directory does not exist.
    #[error("root directory not found: {path}")]
    RootNotFound { path: Utf8PathBuf },
    /// The root exists but is not both readable and writable.
    #[error("no read/write permission for root directory: {path}")]
    PermissionDenied { path: Utf8PathBuf },
    /// Any other filesystem fault, passed through untouched.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ProvisionError {
    /// Path the error refers to, when it names one.
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            ProvisionError::RootNotFound { path } | ProvisionError::PermissionDenied { path } => {
                Some(path)
            }
            ProvisionError::Io(_) => None,
        }
    }
}

/// Failures raised while resolving configuration and the layout.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("determining current directory")]
    CurrentDir(#[source] io::Error),
    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(String),
    #[error("unable to determine home directory")]
    NoHomeDir,
    #[error("reading config {path}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parsing config {path}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
