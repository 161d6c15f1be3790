//! Layered configuration: TOML file, then `NEXUS_*` environment variables.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::Context as _;
use nexus_core::schedule::DEFAULT_REPLY_DELAY;
use serde::Deserialize;

/// Runtime settings for the `nexus` binary.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// SQLite file holding the registered user. `~/` is expanded.
  #[serde(default = "default_store_path")]
  pub store_path:     PathBuf,
  #[serde(default = "default_reply_delay_ms")]
  pub reply_delay_ms: u64,
  #[serde(default = "default_log_file")]
  pub log_file:       PathBuf,
}

fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/nexus/nexus.db") }

fn default_reply_delay_ms() -> u64 { DEFAULT_REPLY_DELAY.as_millis() as u64 }

fn default_log_file() -> PathBuf { PathBuf::from("nexus.log") }

impl Default for Settings {
  fn default() -> Self {
    Self {
      store_path:     default_store_path(),
      reply_delay_ms: default_reply_delay_ms(),
      log_file:       default_log_file(),
    }
  }
}

impl Settings {
  /// Read `path` if it exists, then overlay `NEXUS_*` variables.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("NEXUS"))
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise Settings")
  }

  pub fn reply_delay(&self) -> Duration { Duration::from_millis(self.reply_delay_ms) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
