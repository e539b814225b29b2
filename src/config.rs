use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::document::{OptionsError, RenderMode, RenderOptions};

/// Glyph used for list items when none is configured.
pub const DEFAULT_BULLET: &str = "•";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub width: Option<usize>,
    pub mode: Option<RenderMode>,
    pub bullet: Option<String>,
    pub perf: bool,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            width: other.width.or(self.width),
            mode: other.mode.or(self.mode),
            bullet: other.bullet.clone().or_else(|| self.bullet.clone()),
            perf: self.perf || other.perf,
        }
    }

    /// Layout options for these flags, defaults filling the gaps.
    ///
    /// # Errors
    /// Returns an error if the resulting options are unusable for layout.
    pub fn render_options(&self) -> Result<RenderOptions, OptionsError> {
        let defaults = RenderOptions::default();
        let bullet = self.bullet.as_deref().unwrap_or(DEFAULT_BULLET);
        if bullet.is_empty() {
            return Err(OptionsError::EmptyBullet);
        }
        let options = RenderOptions {
            width: self.width.unwrap_or(defaults.width),
            mode: self.mode.unwrap_or(defaults.mode),
            bullet: format!("{bullet} "),
        };
        options.validate()?;
        Ok(options)
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("gemless").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("gemless")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("gemless").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("gemless")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".gemlessrc")
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
    lines.push("# gemless defaults (saved with --save)".to_string());
    if let Some(width) = flags.width {
        lines.push(format!("--width {width}"));
    }
    if let Some(mode) = flags.mode {
        lines.push(format!("--mode {mode}"));
    }
    if let Some(bullet) = &flags.bullet {
        lines.push(format!("--bullet {bullet}"));
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
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

/// Extract known flags from command-line style tokens, ignoring the rest.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--perf" {
            flags.perf = true;
        } else if let Some(name) = value_flag_name(token) {
            if let Some(next) = tokens.get(i + 1) {
                apply_value(&mut flags, name, next);
                i += 1;
            }
        } else if let Some((name, value)) = token.split_once('=')
            && value_flag_name(name).is_some()
        {
            apply_value(&mut flags, name, value);
        }
        i += 1;
    }
    flags
}

fn value_flag_name(token: &str) -> Option<&str> {
    matches!(token, "--width" | "--mode" | "--bullet").then_some(token)
}

fn apply_value(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "--width" => flags.width = value.parse().ok(),
        "--mode" => flags.mode = value.parse().ok(),
        "--bullet" => flags.bullet = Some(value.to_string()),
        _ => {}
    }
}
