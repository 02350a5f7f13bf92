use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::deck::parser::{DEFAULT_SEPARATOR, DEFAULT_TOPIC_ANNOUNCE, DeckFormat};
use crate::session::settings::{DEFAULT_PASS_LIMIT, DEFAULT_PAUSE, OrderMode, SessionConfig};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_topic_announce")]
    pub topic_announce: String,
    #[serde(default = "default_separator")]
    pub separator: String,
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
    #[serde(default = "default_pass_limit")]
    pub pass_limit: u32,
    #[serde(default)]
    pub linear: bool,
    #[serde(default)]
    pub interactive: bool,
    #[serde(default)]
    pub reversed: bool,
    #[serde(default)]
    pub no_repeat: bool,
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_topic_announce() -> String {
    DEFAULT_TOPIC_ANNOUNCE.to_string()
}
fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}
fn default_pause_ms() -> u64 {
    DEFAULT_PAUSE.as_millis() as u64
}
fn default_pass_limit() -> u32 {
    DEFAULT_PASS_LIMIT
}
fn default_color() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            topic_announce: default_topic_announce(),
            separator: default_separator(),
            pause_ms: default_pause_ms(),
            pass_limit: default_pass_limit(),
            linear: false,
            interactive: false,
            reversed: false,
            no_repeat: false,
            color: default_color(),
        }
    }
}

impl Config {
    /// Loads a config file, falling back to defaults when there is none.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("failed to parse config {}", path.display()))?;
            log::info!("using config file {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("qadrill")
            .join("config.toml")
    }

    pub fn deck_format(&self) -> DeckFormat {
        DeckFormat {
            topic_announce: self.topic_announce.clone(),
            separator: self.separator.clone(),
        }
    }

    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            interactive: self.interactive,
            pause: Duration::from_millis(self.pause_ms),
            order: if self.linear {
                OrderMode::Linear
            } else {
                OrderMode::Random
            },
            reversed: self.reversed,
            pass_limit: self.pass_limit,
            no_repeat_within_pass: self.no_repeat,
            seed: None,
            color: self.color,
        }
    }
}
