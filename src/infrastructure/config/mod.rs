//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;
use crate::application::services::member_finder::{DEFAULT_MIN_SCORE, DEFAULT_RESULTS};

/// Cog configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub roleplay: RoleplayConfig,
    pub modhelper: ModHelperConfig,
    pub members: MembersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RoleplayConfig {
    /// Directory holding one YAML file per action
    pub actions_dir: PathBuf,
    /// Reject actions whose consent or denial block is malformed
    #[serde(default)]
    pub strict_gates: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModHelperConfig {
    pub min_score: u8,
    pub results: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MembersConfig {
    /// YAML file listing guild members
    pub path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "ruff-cogs".to_string(),
                prefix: "!".to_string(),
            },
            roleplay: RoleplayConfig {
                actions_dir: PathBuf::from("./actions"),
                strict_gates: false,
            },
            modhelper: ModHelperConfig {
                min_score: DEFAULT_MIN_SCORE,
                results: DEFAULT_RESULTS,
            },
            members: MembersConfig {
                path: Some(PathBuf::from("./members.yaml")),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Override settings from `COGS_*` environment variables
    pub fn apply_env(&mut self) {
        if let Ok(prefix) = std::env::var("COGS_PREFIX") {
            self.bot.prefix = prefix;
        }

        if let Ok(dir) = std::env::var("COGS_ACTIONS_DIR") {
            self.roleplay.actions_dir = PathBuf::from(dir);
        }

        if let Ok(path) = std::env::var("COGS_MEMBERS") {
            self.members.path = Some(PathBuf::from(path));
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.prefix.is_empty() {
            return Err(ConfigError::MissingField("bot.prefix".to_string()));
        }
        if self.modhelper.min_score > 100 {
            return Err(ConfigError::InvalidValue(format!(
                "modhelper.min-score must be between 0 and 100, got {}",
                self.modhelper.min_score
            )));
        }
        if self.modhelper.results == 0 {
            return Err(ConfigError::InvalidValue(
                "modhelper.results must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
