#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;

use card_forge::domains::conversation::ChatMessage;
use card_forge::error::{CardForgeError, Result};
use card_forge::interfaces::dialogs::PathPicker;
use card_forge::interfaces::providers::TextGenerator;

/// Replies in order and remembers how many messages each request carried.
pub struct QueueGenerator {
    replies: Mutex<VecDeque<Result<String>>>,
    seen_lengths: Mutex<Vec<usize>>,
}

impl QueueGenerator {
    pub fn new(replies: Vec<Result<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            seen_lengths: Mutex::new(Vec::new()),
        }
    }

    pub fn seen_lengths(&self) -> Vec<usize> {
        self.seen_lengths.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for QueueGenerator {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        self.seen_lengths.lock().unwrap().push(messages.len());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CardForgeError::Runtime("no reply queued".to_string())))
    }
}

/// Answers every prompt with the configured path, or cancels when `None`.
pub struct FixedPicker {
    pub open: Option<PathBuf>,
    pub save: Option<PathBuf>,
    pub suggested: Mutex<Vec<String>>,
}

impl FixedPicker {
    pub fn cancelling() -> Self {
        Self {
            open: None,
            save: None,
            suggested: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PathPicker for FixedPicker {
    async fn pick_open_path(&self) -> Option<PathBuf> {
        self.open.clone()
    }

    async fn pick_save_path(&self, suggested_name: &str) -> Option<PathBuf> {
        self.suggested.lock().unwrap().push(suggested_name.to_string());
        self.save.clone()
    }
}

pub fn card_json(name: &str) -> String {
    serde_json::json!({
        "name": name,
        "manaCost": "{1}{G}",
        "cmc": 2,
        "colors": ["Green"],
        "types": ["Creature"],
        "subtypes": ["Elf", "Druid"],
        "text": "{T}: Add {G}.",
        "power": 1,
        "toughness": 2,
        "flavorText": "The forest answers those who listen."
    })
    .to_string()
}
