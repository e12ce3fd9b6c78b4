//! Provisioning for the bootmgr root directory layout.
//!
//! A [`Layout`] names the root and the paths derived from it;
//! [`ensure_directories`] checks the root and creates `projects/` and `logs/`.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod provision;
pub mod runner;
pub mod util;

pub use config::{Layout, SCHEMA_VERSION};
pub use error::{ConfigError, ProvisionError};
pub use provision::ensure_directories;
