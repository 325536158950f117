use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::ChatError;

pub const DEFAULT_TEMPERATURE: f32 = 1.0;
pub const DEFAULT_TOP_P: f32 = 1.0;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenderType {
    System,
    User,
}

impl SenderType {
    pub fn as_str(&self) -> &'static str {
        match &self {
            SenderType::System => "system",
            SenderType::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub text: String,
    pub sender: SenderType,
}

/// A single chat exchange: one system prompt, one user message.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system_prompt: String,
    pub user_message: String,
    pub model_id: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub stream: bool,
}

impl ChatRequest {
    /// Creates a request with default sampling settings and no streaming.
    pub fn new(
        model_id: impl Into<String>,
        system_prompt: impl Into<String>,
        user_message: impl Into<String>,
    ) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_message: user_message.into(),
            model_id: model_id.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            top_p: DEFAULT_TOP_P,
            stream: false,
        }
    }

    /// The message sequence sent to the model. The system entry is always
    /// present, even when the prompt is empty.
    pub fn messages(&self) -> [ChatMessage; 2] {
        [
            ChatMessage {
                text: self.system_prompt.clone(),
                sender: SenderType::System,
            },
            ChatMessage {
                text: self.user_message.clone(),
                sender: SenderType::User,
            },
        ]
    }
}

/// A piece of a streamed completion. Empty content is valid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    pub delta_content: String,
}

/// Single pass stream of fragments in arrival order.
pub type FragmentStream = BoxStream<'static, Result<Fragment, ChatError>>;

pub enum ChatResponse {
    Single { content: String },
    Stream(FragmentStream),
}

impl std::fmt::Debug for ChatResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatResponse::Single { content } => {
                f.debug_struct("Single").field("content", content).finish()
            }
            ChatResponse::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Sends the request. In streaming mode the returned stream yields
    /// fragments as the transport delivers them.
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError>;
}
