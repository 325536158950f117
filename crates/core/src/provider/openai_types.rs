//! Wire types for the OpenAI compatible chat completion endpoint.
use serde::{Deserialize, Serialize};

use crate::completion::ChatRequest;

#[derive(Debug, Serialize)]
pub(super) struct ChatCompletionRequest {
    pub(super) model: String,
    pub(super) messages: Vec<RequestMessage>,
    pub(super) temperature: f32,
    pub(super) max_tokens: u32,
    pub(super) top_p: f32,
    pub(super) stream: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct RequestMessage {
    pub(super) role: &'static str,
    pub(super) content: String,
}

impl From<&ChatRequest> for ChatCompletionRequest {
    fn from(request: &ChatRequest) -> Self {
        Self {
            model: request.model_id.clone(),
            messages: request
                .messages()
                .into_iter()
                .map(|m| RequestMessage {
                    role: m.sender.as_str(),
                    content: m.text,
                })
                .collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            top_p: request.top_p,
            stream: request.stream,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatCompletionResponse {
    pub(super) choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatCompletionChoice {
    pub(super) message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub(super) struct ResponseMessage {
    pub(super) content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatCompletionStreamResponse {
    #[serde(default)]
    pub(super) choices: Vec<ChatCompletionStreamChoice>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatCompletionStreamChoice {
    pub(super) delta: Delta,
    pub(super) finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Delta {
    pub(super) content: Option<String>,
}
