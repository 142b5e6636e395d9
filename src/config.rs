use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Flags that can be supplied on the command line or persisted in a config
/// file. File flags and CLI flags are unioned, CLI winning where both set an
/// option.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub panel: bool,
    pub no_panel: bool,
    pub autosave: bool,
}

impl ConfigFlags {
    pub const fn union(&self, other: &Self) -> Self {
        Self {
            panel: self.panel || other.panel,
            no_panel: self.no_panel || other.no_panel,
            autosave: self.autosave || other.autosave,
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("blockpad").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("blockpad")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("blockpad").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("blockpad")
                .join("config");
        }
    }

    PathBuf::from(".blockpadrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".blockpadrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# blockpad defaults (saved with --save)".to_string());
    if flags.panel {
        lines.push("--panel".to_string());
    }
    if flags.no_panel {
        lines.push("--no-panel".to_string());
    }
    if flags.autosave {
        lines.push("--autosave".to_string());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    for token in tokens {
        if token == "--panel" {
            flags.panel = true;
        } else if token == "--no-panel" {
            flags.no_panel = true;
        } else if token == "--autosave" {
            flags.autosave = true;
        }
    }
    flags
}
