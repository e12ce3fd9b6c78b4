use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::cli::{Cli, Command, ConfigCommand};
use crate::config::{self, Layout};
use crate::error::ConfigError;
use crate::provision;

const CONFIG_DIR: &str = ".bootmgr";
const CONFIG_FILE: &str = "config.toml";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ConfigPathSource {
    Explicit,
    Discovered,
    HomeDefault,
}

impl ConfigPathSource {
    fn as_str(&self) -> &'static str {
        match self {
            ConfigPathSource::Explicit => "explicit",
            ConfigPathSource::Discovered => "discovered",
            ConfigPathSource::HomeDefault => "home-default",
        }
    }
}

#[derive(Clone, Debug)]
struct ResolvedConfigPath {
    path: Utf8PathBuf,
    source: ConfigPathSource,
}

pub fn run(cli: Cli) -> Result<()> {
    let ctx = CliContext::from(&cli);
    ctx.apply_chdir()?;
    let cwd = config::current_dir()?;

    match cli.command {
        Command::Ensure => handle_ensure(&ctx, &cwd),
        Command::Paths => {
            let layout = ctx.resolve_layout(&cwd)?;
            print!("{}", config::format_summary(&layout));
            Ok(())
        }
        Command::Config {
            command: ConfigCommand::Path,
        } => {
            let resolved = ctx.resolve_config_path(&cwd)?;
            println!(
                "Config path: {} ({})",
                resolved.path,
                resolved.source.as_str()
            );
            if !resolved.path.exists() {
                println!("No config file present; defaults apply.");
            }
            Ok(())
        }
    }
}

fn handle_ensure(ctx: &CliContext, cwd: &Utf8Path) -> Result<()> {
    let layout = ctx.resolve_layout(cwd)?;
    provision::ensure_directories(&layout)?;
    println!("Directories ensured in {}", layout.root());
    Ok(())
}

/// Walk up from `start` looking for `.bootmgr/config.toml`.
fn discover_config(start: &Utf8Path) -> Option<Utf8PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
        .find(|candidate| candidate.exists())
}

fn utf8_path(path: &Path) -> Result<Utf8PathBuf, ConfigError> {
    Utf8PathBuf::from_path_buf(path.to_path_buf())
        .map_err(|path| ConfigError::NonUtf8Path(path.display().to_string()))
}

struct CliContext {
    chdir: Option<PathBuf>,
    file: Option<PathBuf>,
    root: Option<PathBuf>,
}

impl CliContext {
    fn apply_chdir(&self) -> Result<()> {
        if let Some(path) = &self.chdir {
            std::env::set_current_dir(path)
                .with_context(|| format!("changing directory to {}", path.display()))?;
        }
        Ok(())
    }

    fn resolve_config_path(&self, cwd: &Utf8Path) -> Result<ResolvedConfigPath> {
        if let Some(path) = &self.file {
            return Ok(ResolvedConfigPath {
                path: cwd.join(utf8_path(path)?),
                source: ConfigPathSource::Explicit,
            });
        }

        if let Some(path) = discover_config(cwd) {
            return Ok(ResolvedConfigPath {
                path,
                source: ConfigPathSource::Discovered,
            });
        }

        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        let path = utf8_path(&home.join(CONFIG_DIR).join(CONFIG_FILE))?;
        Ok(ResolvedConfigPath {
            path,
            source: ConfigPathSource::HomeDefault,
        })
    }

    /// Root from the config file, if one applies. A missing explicit file is an error.
    fn config_root(&self, cwd: &Utf8Path) -> Result<Option<Utf8PathBuf>> {
        let resolved = self.resolve_config_path(cwd)?;
        if resolved.source != ConfigPathSource::Explicit && !resolved.path.exists() {
            debug!(path = %resolved.path, "no config file; using defaults");
            return Ok(None);
        }

        debug!(
            path = %resolved.path,
            source = resolved.source.as_str(),
            "loading config"
        );
        let loaded = config::load_from_path(&resolved.path)?;
        Ok(loaded.resolved_root(&resolved.path))
    }

    fn resolve_layout(&self, cwd: &Utf8Path) -> Result<Layout> {
        let layout = match &self.root {
            Some(root) => {
                let root = utf8_path(root)?;
                config::resolve_layout(Some(&root), None, cwd)
            }
            None => config::resolve_layout(None, self.config_root(cwd)?, cwd),
        };
        debug!(root = %layout.root(), "resolved layout");
        Ok(layout)
    }
}

impl From<&Cli> for CliContext {
    fn from(cli: &Cli) -> Self {
        Self {
            chdir: cli.chdir.clone(),
            file: cli.file.clone(),
            root: cli.root.clone(),
        }
    }
}
