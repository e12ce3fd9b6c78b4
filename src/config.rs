use std::fmt::Write as _;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

use crate::error::ConfigError;

pub const PROJECTS_DIR: &str = "projects";
pub const LOGS_DIR: &str = "logs";
pub const STATE_FILE: &str = "state";
/// Layout schema version. Reported only; nothing reads or enforces it.
pub const SCHEMA_VERSION: &str = "v1.0";

/// Directory layout rooted at a single base directory.
///
/// Built once at startup and handed to [`crate::provision::ensure_directories`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Layout {
    root: Utf8PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Layout rooted at the parent of `cwd`, or `cwd` itself when it has none.
    pub fn from_working_dir(cwd: &Utf8Path) -> Self {
        let root = cwd.parent().unwrap_or(cwd);
        Self::new(root)
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn projects_dir(&self) -> Utf8PathBuf {
        self.root.join(PROJECTS_DIR)
    }

    pub fn logs_dir(&self) -> Utf8PathBuf {
        self.root.join(LOGS_DIR)
    }

    /// Reserved for persisted state; never touched by provisioning.
    pub fn state_file(&self) -> Utf8PathBuf {
        self.root.join(STATE_FILE)
    }

    pub fn schema_version(&self) -> &'static str {
        SCHEMA_VERSION
    }
}

/// Optional configuration document, `.bootmgr/config.toml` by default.
#[derive(Debug, Default, Deserialize)]
pub struct BootConfig {
    /// Root override. Relative values are resolved against the config file's directory.
    pub root: Option<String>,
}

/// Load a configuration file from disk and deserialize it.
pub fn load_from_path(path: &Utf8Path) -> Result<BootConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl BootConfig {
    /// Configured root made absolute relative to `config_path`'s directory.
    pub fn resolved_root(&self, config_path: &Utf8Path) -> Option<Utf8PathBuf> {
        let root = Utf8PathBuf::from(self.root.as_deref()?);
        if root.is_absolute() {
            return Some(root);
        }
        let base = config_path.parent().unwrap_or(Utf8Path::new(""));
        Some(base.join(root))
    }
}

/// Pick the root in precedence order: explicit flag, config file, working directory.
///
/// A relative `flag_root` is joined onto `cwd`.
pub fn resolve_layout(
    flag_root: Option<&Utf8Path>,
    config_root: Option<Utf8PathBuf>,
    cwd: &Utf8Path,
) -> Layout {
    if let Some(root) = flag_root {
        let root = if root.is_absolute() {
            root.to_path_buf()
        } else {
            cwd.join(root)
        };
        return Layout::new(root);
    }

    match config_root {
        Some(root) => Layout::new(root),
        None => Layout::from_working_dir(cwd),
    }
}

pub fn current_dir() -> Result<Utf8PathBuf, ConfigError> {
    let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
    Utf8PathBuf::from_path_buf(cwd)
        .map_err(|path| ConfigError::NonUtf8Path(path.display().to_string()))
}

pub fn format_summary(layout: &Layout) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Root: {}", layout.root());
    let _ = writeln!(out, "Projects: {}", layout.projects_dir());
    let _ = writeln!(out, "Logs: {}", layout.logs_dir());
    let _ = writeln!(out, "State file: {}", layout.state_file());
    let _ = writeln!(out, "Schema version: {}", layout.schema_version());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_parent_of_working_dir() {
        let layout = Layout::from_working_dir(Utf8Path::new("/opt/bootmgr/src"));
        assert_eq!(layout.root(), Utf8Path::new("/opt/bootmgr"));
        assert_eq!(layout.projects_dir(), Utf8PathBuf::from("/opt/bootmgr/projects"));
        assert_eq!(layout.logs_dir(), Utf8PathBuf::from("/opt/bootmgr/logs"));
        assert_eq!(layout.state_file(), Utf8PathBuf::from("/opt/bootmgr/state"));
        assert_eq!(layout.schema_version(), "v1.0");
    }

    #[test]
    fn filesystem_root_is_its_own_root() {
        let layout = Layout::from_working_dir(Utf8Path::new("/"));
        assert_eq!(layout.root(), Utf8Path::new("/"));
    }

    #[test]
    fn flag_beats_config_beats_cwd() {
        let cwd = Utf8Path::new("/work/bootmgr/src");

        let layout = resolve_layout(
            Some(Utf8Path::new("/flag")),
            Some(Utf8PathBuf::from("/config")),
            cwd,
        );
        assert_eq!(layout.root(), Utf8Path::new("/flag"));

        let layout = resolve_layout(None, Some(Utf8PathBuf::from("/config")), cwd);
        assert_eq!(layout.root(), Utf8Path::new("/config"));

        let layout = resolve_layout(None, None, cwd);
        assert_eq!(layout.root(), Utf8Path::new("/work/bootmgr"));
    }

    #[test]
    fn relative_flag_root_joins_cwd() {
        let layout = resolve_layout(Some(Utf8Path::new("data")), None, Utf8Path::new("/work"));
        assert_eq!(layout.root(), Utf8Path::new("/work/data"));
    }

    #[test]
    fn config_root_resolves_relative_to_file() {
        let config: BootConfig = toml::from_str("root = '../data'\n").unwrap();
        let resolved = config
            .resolved_root(Utf8Path::new("/home/me/.bootmgr/config.toml"))
            .unwrap();
        assert_eq!(resolved, Utf8PathBuf::from("/home/me/.bootmgr/../data"));

        let config: BootConfig = toml::from_str("root = '/srv/boot'\n").unwrap();
        let resolved = config
            .resolved_root(Utf8Path::new("/home/me/.bootmgr/config.toml"))
            .unwrap();
        assert_eq!(resolved, Utf8PathBuf::from("/srv/boot"));
    }

    #[test]
    fn empty_config_has_no_root() {
        let config: BootConfig = toml::from_str("").unwrap();
        assert!(config.resolved_root(Utf8Path::new("/x/config.toml")).is_none());
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(tmp.path().join("config.toml")).unwrap();
        fs::write(&path, "root = [").unwrap();
        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(path.as_str()));
    }

    #[test]
    fn load_reads_root_as_string() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "root = 'data'\n").unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.root.as_deref(), Some("data"));
        assert_eq!(config.resolved_root(&path), Some(dir.join("data")));
    }

    #[test]
    fn load_reports_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(tmp.path().join("absent.toml")).unwrap();
        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn summary_lists_every_path() {
        let summary = format_summary(&Layout::new("/srv/boot"));
        assert!(summary.contains("Root: /srv/boot"));
        assert!(summary.contains("Projects: /srv/boot/projects"));
        assert!(summary.contains("Logs: /srv/boot/logs"));
        assert!(summary.contains("State file: /srv/boot/state"));
        assert!(summary.contains("Schema version: v1.0"));
    }
}
