use async_trait::async_trait;

use crate::domains::conversation::ChatMessage;
use crate::error::Result;

/// The external text-generation service: the whole conversation in, one reply out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}
