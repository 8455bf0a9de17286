use tracing::{info, warn};

use crate::domains::conversation::ChatMessage;
use crate::error::Result;
use crate::interfaces::providers::TextGenerator;

pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are an AI used to generate Magic: The Gathering card concepts. You will return cards in the following JSON format, with no additional text or explanation: {"name": "Card Name", "manaCost": "{1}{B}{G}", "cmc": 3, "colors": ["Black", "Green"], "types": ["Creature"], "subtypes": ["Zombie", "Plant"], "text": "Some text describing the card's effect.", "power": 2, "toughness": 2, "flavorText": "The zombies rose from the ground, their vines tangling with those of the plants. Together they made an unstoppable force."}"#;

const EXAMPLE_REQUEST: &str = "Generate a card based on a valkyrie from Norse mythology.";

const EXAMPLE_REPLY: &str = r#"{"name": "Valkyrie's Charge", "manaCost": "{3}{W}{B}", "cmc": 5, "colors": ["White", "Black"], "types": ["Creature"], "subtypes": ["Valkyrie"], "text": "Flying, lifelink. Whenever Valkyrie's Charge attacks, choose one - \n• Creatures you control gain indestructible until end of turn. \n• Each opponent loses 2 life and you gain 2 life.", "power": 3, "toughness": 3, "flavorText": "In battle, the Valkyries swoop down from the skies to claim the souls of the worthy."}"#;

/// The conversation sent on every request. Append-only for its whole life.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    messages: Vec<ChatMessage>,
}

impl Default for Session {
    fn default() -> Self {
        Self::seeded(DEFAULT_SYSTEM_PROMPT)
    }
}

impl Session {
    /// System prompt plus one worked example so the model answers in card JSON.
    pub fn seeded(system_prompt: &str) -> Self {
        Self {
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(EXAMPLE_REQUEST),
                ChatMessage::assistant(EXAMPLE_REPLY),
            ],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn record_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
    }

    /// One user turn. On failure the pending user message is withdrawn.
    pub async fn exchange(&mut self, generator: &dyn TextGenerator, text: &str) -> Result<String> {
        self.messages.push(ChatMessage::user(text));
        match generator.complete(&self.messages).await {
            Ok(reply) => {
                info!(messages = self.messages.len() + 1, "assistant replied");
                self.messages.push(ChatMessage::assistant(reply.clone()));
                Ok(reply)
            }
            Err(err) => {
                warn!(error = %err, "exchange failed");
                self.messages.pop();
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::card::CardRecord;
    use crate::domains::conversation::Role;

    #[test]
    fn seed_example_is_a_valid_card() {
        let session = Session::default();
        assert_eq!(session.len(), 3);
        assert_eq!(session.messages()[0].role, Role::System);
        let card = CardRecord::parse(&session.messages()[2].content).unwrap();
        assert_eq!(card.name, "Valkyrie's Charge");
        assert_eq!(card.tone(), "gold");
    }

    #[test]
    fn record_assistant_appends_without_request() {
        let mut session = Session::seeded("prompt");
        session.record_assistant("{\"name\":\"Loaded\"}");
        assert_eq!(session.len(), 4);
        assert_eq!(session.messages()[3].role, Role::Assistant);
        assert_eq!(session.messages()[0].content, "prompt");
    }
}
