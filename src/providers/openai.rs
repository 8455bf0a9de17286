use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs,
};

use crate::config::Config;
use crate::domains::conversation::{ChatMessage, Role};
use crate::error::{CardForgeError, Result};
use crate::interfaces::providers::TextGenerator;

#[derive(Clone)]
pub struct OpenAiProvider {
    model: String,
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: Option<String>, base_url: Option<String>) -> Self {
        let model = model.unwrap_or_else(|| crate::config::DEFAULT_MODEL.to_string());
        let base_url = base_url.unwrap_or_else(|| crate::config::DEFAULT_BASE_URL.to_string());
        Self {
            model,
            api_key,
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let openai = config
            .openai
            .as_ref()
            .ok_or_else(|| CardForgeError::Config("missing openai section".to_string()))?;
        let api_key = openai
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                CardForgeError::Config(format!(
                    "no API key: set {} or openai.api_key",
                    crate::config::API_KEY_ENV
                ))
            })?;
        Ok(Self::new(
            api_key,
            Some(config.model()),
            Some(config.base_url()),
        ))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_message(message: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
        let built = match message.role {
            Role::System => ChatCompletionRequestSystemMessageArgs::default()
                .content(message.content.as_str())
                .build()
                .map(ChatCompletionRequestMessage::System),
            Role::User => ChatCompletionRequestUserMessageArgs::default()
                .content(ChatCompletionRequestUserMessageContent::Text(
                    message.content.clone(),
                ))
                .build()
                .map(ChatCompletionRequestMessage::User),
            Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                .content(message.content.as_str())
                .build()
                .map(ChatCompletionRequestMessage::Assistant),
        };
        built.map_err(|e| CardForgeError::Runtime(e.to_string()))
    }

    fn build_request(&self, messages: &[ChatMessage]) -> Result<CreateChatCompletionRequest> {
        let messages = messages
            .iter()
            .map(Self::build_message)
            .collect::<Result<Vec<_>>>()?;
        CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .messages(messages)
            .build()
            .map_err(|e| CardForgeError::Runtime(e.to_string()))
    }

    async fn chat_completion(&self, request: &CreateChatCompletionRequest) -> Result<Value> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| CardForgeError::Http(format!("Chat completion transport failed: {e}")))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CardForgeError::Http(format!("Chat completion read failed: {e}")))?;

        if status != StatusCode::OK {
            return Err(CardForgeError::Http(format!(
                "Chat completion failed ({status}): {body}"
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            CardForgeError::Serialization(format!("Chat completion decode failed: {e}"))
        })
    }

    fn extract_text(response: &Value) -> Option<String> {
        response
            .get("choices")
            .and_then(|v| v.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .map(|text| text.to_string())
    }
}

#[async_trait]
impl TextGenerator for OpenAiProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let request = self.build_request(messages)?;
        debug!(model = %self.model, messages = messages.len(), "requesting chat completion");
        let response = self.chat_completion(&request).await?;
        Self::extract_text(&response)
            .ok_or_else(|| CardForgeError::Runtime("Empty chat response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::OpenAiProvider;
    use crate::config::{Config, OpenAiConfig};
    use crate::domains::conversation::ChatMessage;
    use crate::error::CardForgeError;
    use serde_json::json;

    #[test]
    fn request_carries_every_role_in_order() {
        let provider = OpenAiProvider::new("key".to_string(), Some("gpt-4o-mini".to_string()), None);
        let request = provider
            .build_request(&[
                ChatMessage::system("be a card designer"),
                ChatMessage::user("a dragon"),
                ChatMessage::assistant("{\"name\":\"Dragon\"}"),
            ])
            .unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], json!("gpt-4o-mini"));
        let roles: Vec<_> = value["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["role"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(roles, vec!["system", "user", "assistant"]);
        assert_eq!(value["messages"][1]["content"], json!("a dragon"));
    }

    #[test]
    fn extracts_first_choice_content() {
        let value = json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "{}"}}]
        });
        assert_eq!(OpenAiProvider::extract_text(&value).as_deref(), Some("{}"));
        assert_eq!(OpenAiProvider::extract_text(&json!({"choices": []})), None);
    }

    #[test]
    fn from_config_requires_api_key() {
        let err = OpenAiProvider::from_config(&Config::convention_defaults())
            .err()
            .unwrap();
        assert!(matches!(err, CardForgeError::Config(_)));

        let config = Config {
            openai: Some(OpenAiConfig {
                api_key: Some("sk-test".to_string()),
                model: None,
                base_url: None,
            }),
            output_dir: None,
            system_prompt: None,
        };
        let provider = OpenAiProvider::from_config(&config).unwrap();
        assert_eq!(provider.model(), crate::config::DEFAULT_MODEL);
    }
}
