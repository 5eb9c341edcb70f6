use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SettingsError;
use crate::save::DEFAULT_SAVE_FILE;
use crate::types::{Difficulty, RuleSetKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
  #[serde(default = "default_save_path")]
  pub save_path: PathBuf,
  #[serde(default)]
  pub difficulty: Difficulty,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub seed: Option<u64>,
  #[serde(default)]
  pub rule_set: RuleSetKind,
}

fn default_save_path() -> PathBuf {
  PathBuf::from(DEFAULT_SAVE_FILE)
}

impl Default for GameSettings {
  fn default() -> Self {
    Self {
      save_path: default_save_path(),
      difficulty: Difficulty::default(),
      seed: None,
      rule_set: RuleSetKind::default(),
    }
  }
}

impl GameSettings {
  pub fn load(path: &Path) -> Result<Self, SettingsError> {
    let data = fs::read_to_string(path).map_err(SettingsError::Io)?;
    serde_json::from_str(&data).map_err(SettingsError::Parse)
  }

  pub fn load_or_default(path: &Path) -> Self {
    match Self::load(path) {
      Ok(settings) => settings,
      Err(err) => {
        warn!(path = %path.display(), "{}; using defaults", err);
        Self::default()
      }
    }
  }
}
