use serde::{Deserialize, Serialize};

use super::agent::AgentKind;
use crate::error::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// What a request is for. Lets implementations route, meter or log calls
/// without parsing prompt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "agent", rename_all = "snake_case")]
pub enum RequestPurpose {
    Analysis(AgentKind),
    ExecutiveSummary,
    Conversation(AgentKind),
    SourceDescription,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub purpose: RequestPurpose,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// The hosted language model.
///
/// Calls are blocking and may run concurrently from several threads.
/// Implementations own transport, authentication and timeouts; no retry is
/// attempted on their behalf.
pub trait LanguageModel: Send + Sync {
    fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError>;
}
