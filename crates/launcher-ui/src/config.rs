//! Menu configuration.
//!
//! Read-only at runtime. The on-disk form is a versioned line format:
//!
//! ```text
//! v1
//! hover_timeout_ms=100
//! wrap_selection=0
//! game_extensions=.d64 .t64 .prg .p00
//! ```
//!
//! Unknown keys are skipped; a missing file means defaults.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// Errors from parsing a config file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unsupported config header '{0}'")]
    BadHeader(String),
    #[error("line {line}: expected key=value")]
    Malformed { line: usize },
    #[error("line {line}: invalid value for '{key}'")]
    InvalidValue { line: usize, key: String },
    #[cfg(feature = "std")]
    #[error("config read failed: {0}")]
    Io(String),
}

/// Tunables for menus and the disc browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuConfig {
    /// Hover time before a disc entry's info is loaded.
    pub hover_timeout_ms: u32,
    /// Up/Down wrap at the list ends.
    pub wrap_selection: bool,
    /// Rows in a full-height menu.
    pub visible_rows: usize,
    /// Disc image extensions, case-insensitive.
    pub game_extensions: Vec<String>,
    /// Extensions that are loaded as single programs.
    pub program_extensions: Vec<String>,
    pub game_base_path: String,
    pub metadata_base_path: String,
    pub tmp_path: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            hover_timeout_ms: Self::DEFAULT_HOVER_TIMEOUT_MS,
            wrap_selection: false,
            visible_rows: 14,
            game_extensions: [".d64", ".t64", ".prg", ".p00"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            program_extensions: [".prg", ".p00"].iter().map(|s| s.to_string()).collect(),
            game_base_path: String::from("/games"),
            metadata_base_path: String::from("/metadata"),
            tmp_path: String::from("/tmp"),
        }
    }
}

impl MenuConfig {
    pub const DEFAULT_HOVER_TIMEOUT_MS: u32 = 100;
    const HEADER: &'static str = "v1";

    /// Parse the `v1` line format on top of the defaults.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let mut lines = raw.lines().enumerate();
        let header = lines.next().map(|(_, l)| l.trim()).unwrap_or_default();
        if header != Self::HEADER {
            return Err(ConfigError::BadHeader(header.to_string()));
        }

        let mut config = Self::default();
        for (idx, line) in lines {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line
                .split_once('=')
                .ok_or(ConfigError::Malformed { line: line_no })?;
            let (key, value) = (key.trim(), value.trim());
            let invalid = || ConfigError::InvalidValue {
                line: line_no,
                key: key.to_string(),
            };

            match key {
                "hover_timeout_ms" => {
                    config.hover_timeout_ms = value.parse().map_err(|_| invalid())?
                }
                "wrap_selection" => {
                    config.wrap_selection = match value {
                        "1" | "true" => true,
                        "0" | "false" => false,
                        _ => return Err(invalid()),
                    }
                }
                "visible_rows" => {
                    config.visible_rows = value
                        .parse()
                        .ok()
                        .filter(|rows: &usize| *rows > 0)
                        .ok_or_else(invalid)?
                }
                "game_extensions" => config.game_extensions = split_list(value),
                "program_extensions" => config.program_extensions = split_list(value),
                "game_base_path" => config.game_base_path = value.to_string(),
                "metadata_base_path" => config.metadata_base_path = value.to_string(),
                "tmp_path" => config.tmp_path = value.to_string(),
                other => log::warn!("config line {}: unknown key '{}'", line_no, other),
            }
        }
        Ok(config)
    }

    /// Load from disk, falling back to defaults when the file is absent.
    #[cfg(feature = "std")]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::parse(&raw),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(ConfigError::Io(err.to_string())),
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value.split_whitespace().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_clamped_selection_and_100ms_hover() {
        let config = MenuConfig::default();
        assert_eq!(config.hover_timeout_ms, 100);
        assert!(!config.wrap_selection);
        assert!(config.game_extensions.iter().any(|e| e == ".d64"));
    }

    #[test]
    fn parse_overrides_known_keys() {
        let config = MenuConfig::parse(
            "v1\nhover_timeout_ms=250\nwrap_selection=1\n# comment\n\ngame_extensions=.d64 .g64\nfuture_key=x\n",
        )
        .unwrap();
        assert_eq!(config.hover_timeout_ms, 250);
        assert!(config.wrap_selection);
        assert_eq!(config.game_extensions, [".d64", ".g64"]);
        assert_eq!(config.game_base_path, "/games");
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(
            MenuConfig::parse("v2\n"),
            Err(ConfigError::BadHeader("v2".to_string()))
        );
        assert_eq!(
            MenuConfig::parse("v1\nhover_timeout_ms"),
            Err(ConfigError::Malformed { line: 1 })
        );
        assert_eq!(
            MenuConfig::parse("v1\nvisible_rows=0"),
            Err(ConfigError::InvalidValue {
                line: 1,
                key: "visible_rows".to_string()
            })
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn missing_file_means_defaults() {
        let config = MenuConfig::load("/definitely/not/here.cfg").unwrap();
        assert_eq!(config, MenuConfig::default());
    }
}
