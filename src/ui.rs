use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{CardForgeError, Result};
use crate::iced_ui::{self, IcedUiLaunchConfig};
use crate::native_dialogs::NativePathPicker;
use crate::providers::openai::OpenAiProvider;
use crate::services::session::{Session, DEFAULT_SYSTEM_PROMPT};

pub fn session_for(config: &Config) -> Session {
    Session::seeded(
        config
            .system_prompt
            .as_deref()
            .filter(|prompt| !prompt.trim().is_empty())
            .unwrap_or(DEFAULT_SYSTEM_PROMPT),
    )
}

pub fn launch_ui(config: &Config) -> Result<()> {
    let provider = OpenAiProvider::from_config(config)?;
    tracing::info!(model = %provider.model(), output_dir = %config.output_dir(), "launching card window");

    let result = iced_ui::launch_ui(IcedUiLaunchConfig {
        generator: Arc::new(provider),
        picker: Arc::new(NativePathPicker),
        session: session_for(config),
        output_dir: PathBuf::from(config.output_dir()),
    });

    if let Err(err) = &result {
        tracing::error!(error = %err, "failed to launch iced UI");
    }
    result.map_err(|err| CardForgeError::Runtime(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_system_prompt_keeps_default() {
        let mut config = Config::convention_defaults();
        config.system_prompt = Some("   ".to_string());
        assert_eq!(session_for(&config).messages()[0].content, DEFAULT_SYSTEM_PROMPT);

        config.system_prompt = Some("Design only artifacts.".to_string());
        assert_eq!(session_for(&config).messages()[0].content, "Design only artifacts.");
    }
}
