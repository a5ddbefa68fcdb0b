//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use avatar_downloader::{CameraMode, ServiceEndpoints};

/// TOML-style file configuration for downloader defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Default number of concurrent avatars (same range as CLI).
    pub threads: Option<u8>,
    /// Default per-request timeout in seconds.
    pub timeout: Option<u64>,
    /// Default preview size (clamped like the CLI value).
    pub size: Option<i64>,
    /// Default camera framing.
    pub camera: Option<CameraMode>,
    /// Default background color.
    pub background: Option<String>,
    /// Model endpoint base URL.
    pub model_base_url: Option<String>,
    /// Render endpoint base URL.
    pub render_base_url: Option<String>,
}

impl FileConfig {
    /// Validates config values against runtime and CLI constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(threads) = self.threads
            && !(1..=64).contains(&threads)
        {
            bail!("Invalid config value for `threads`: {threads}. Expected range: 1..=64");
        }

        if let Some(timeout) = self.timeout
            && !(1..=3600).contains(&timeout)
        {
            bail!("Invalid config value for `timeout`: {timeout}. Expected range: 1..=3600");
        }

        // Each base URL is checked on its own; the other side uses the default.
        if let Some(model_base_url) = &self.model_base_url {
            ServiceEndpoints::new(model_base_url, avatar_downloader::avatar::DEFAULT_RENDER_BASE_URL)
                .context("Invalid config value for `model_base_url`")?;
        }
        if let Some(render_base_url) = &self.render_base_url {
            ServiceEndpoints::new(avatar_downloader::avatar::DEFAULT_MODEL_BASE_URL, render_base_url)
                .context("Invalid config value for `render_base_url`")?;
        }

        Ok(())
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/avatar-downloader/config.toml`
/// 2. `$HOME/.config/avatar-downloader/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("avatar-downloader")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("avatar-downloader")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let Some(path_ref) = path.as_deref() else {
        return Ok(LoadedConfig { path, config: None });
    };

    if !path_ref.exists() {
        return Ok(LoadedConfig { path, config: None });
    }

    let config = load_file_config(path_ref)?;
    Ok(LoadedConfig {
        path,
        config: Some(config),
    })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_no = line_index + 1;
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_no}: expected key = value");
        };

        let key = raw_key.trim();
        let value = raw_value.trim();

        match key {
            "threads" => {
                let parsed = parse_integer_u8(value)
                    .with_context(|| format!("Invalid `threads` value on line {line_no}"))?;
                cfg.threads = Some(parsed);
            }
            "timeout" => {
                let parsed = parse_integer_u64(value)
                    .with_context(|| format!("Invalid `timeout` value on line {line_no}"))?;
                cfg.timeout = Some(parsed);
            }
            "size" => {
                let parsed = value
                    .parse::<i64>()
                    .with_context(|| format!("Invalid `size` value on line {line_no}"))?;
                cfg.size = Some(parsed);
            }
            "camera" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `camera` value on line {line_no}"))?;
                let camera = parsed.parse::<CameraMode>().map_err(|e| {
                    anyhow::anyhow!("Invalid `camera` value '{parsed}' on line {line_no}: {e}")
                })?;
                cfg.camera = Some(camera);
            }
            "background" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `background` value on line {line_no}"))?;
                cfg.background = Some(parsed);
            }
            "model_base_url" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `model_base_url` value on line {line_no}"))?;
                cfg.model_base_url = Some(parsed);
            }
            "render_base_url" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!("Invalid `render_base_url` value on line {line_no}")
                })?;
                cfg.render_base_url = Some(parsed);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_no}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u8(raw_value: &str) -> Result<u8> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<u16>()?;
    u8::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u8"))
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u64"))
}
