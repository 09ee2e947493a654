pub mod openrouter;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::ChatError;

/// One turn of conversation as the completion endpoint expects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        messages: &[Message],
    ) -> Result<String, ChatError>;
}
