use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{CardForgeError, Result};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OUTPUT_DIR: &str = "MTGCards";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub openai: Option<OpenAiConfig>,
    #[serde(default)]
    pub output_dir: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl Config {
    pub fn convention_defaults() -> Self {
        Self {
            openai: Some(OpenAiConfig {
                api_key: None,
                model: Some(DEFAULT_MODEL.to_string()),
                base_url: Some(DEFAULT_BASE_URL.to_string()),
            }),
            output_dir: Some(DEFAULT_OUTPUT_DIR.to_string()),
            system_prompt: None,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| CardForgeError::Config(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| CardForgeError::Config(format!("{}: {e}", path.display())))
    }

    /// A missing file is not an error: the program runs on defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::convention_defaults());
        }
        Self::from_file(path)
    }

    /// Fills the API key from the environment when the file left it unset.
    pub fn resolve_env(self) -> Self {
        self.resolve_api_key(std::env::var(API_KEY_ENV).ok())
    }

    pub fn resolve_api_key(mut self, env_key: Option<String>) -> Self {
        let openai = self.openai.get_or_insert_with(OpenAiConfig::default);
        if openai.api_key.as_deref().map_or(true, |key| key.trim().is_empty()) {
            openai.api_key = env_key.filter(|key| !key.trim().is_empty());
        }
        self
    }

    pub fn with_overrides(
        mut self,
        model: Option<String>,
        base_url: Option<String>,
        output_dir: Option<String>,
    ) -> Self {
        let openai = self.openai.get_or_insert_with(OpenAiConfig::default);
        if model.is_some() {
            openai.model = model;
        }
        if base_url.is_some() {
            openai.base_url = base_url;
        }
        if output_dir.is_some() {
            self.output_dir = output_dir;
        }
        self
    }

    pub fn model(&self) -> String {
        self.openai
            .as_ref()
            .and_then(|openai| openai.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    pub fn base_url(&self) -> String {
        self.openai
            .as_ref()
            .and_then(|openai| openai.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn output_dir(&self) -> String {
        self.output_dir
            .clone()
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_key_wins_over_environment() {
        let config = Config {
            openai: Some(OpenAiConfig {
                api_key: Some("from-file".to_string()),
                model: None,
                base_url: None,
            }),
            output_dir: None,
            system_prompt: None,
        }
        .resolve_api_key(Some("from-env".to_string()));
        assert_eq!(
            config.openai.unwrap().api_key.as_deref(),
            Some("from-file")
        );
    }

    #[test]
    fn environment_fills_missing_key_and_blank_is_ignored() {
        let config = Config::convention_defaults().resolve_api_key(Some("sk-env".to_string()));
        assert_eq!(
            config.openai.as_ref().unwrap().api_key.as_deref(),
            Some("sk-env")
        );

        let config = Config::convention_defaults().resolve_api_key(Some("  ".to_string()));
        assert_eq!(config.openai.unwrap().api_key, None);
    }

    #[test]
    fn overrides_replace_only_what_is_given() {
        let config = Config::convention_defaults().with_overrides(
            Some("gpt-4o-mini".to_string()),
            None,
            Some("cards".to_string()),
        );
        assert_eq!(config.model(), "gpt-4o-mini");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.output_dir(), "cards");
    }

    #[test]
    fn accessors_fall_back_without_openai_section() {
        let config: Config = serde_json::from_str(r#"{"openai": null}"#).unwrap();
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(config.output_dir(), DEFAULT_OUTPUT_DIR);
    }
}
