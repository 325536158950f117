use async_openai::Client as OpenAIClient;
use async_openai::config::OpenAIConfig;
use async_trait::async_trait;
use futures::stream::StreamExt;
use tracing::{debug, instrument};

use super::openai_types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatCompletionStreamResponse,
};
use crate::completion::{ChatRequest, ChatResponse, CompletionModel, Fragment};
use crate::config::ProviderConfig;
use crate::error::ChatError;

/// Completion model backed by the Groq OpenAI compatible endpoint.
#[derive(Debug, Clone)]
pub struct GroqModel {
    settings: ProviderConfig,
}

impl GroqModel {
    pub fn new(settings: ProviderConfig) -> Self {
        Self { settings }
    }

    /// Resolves the api key. `env:NAME` reads the named variable; a missing or
    /// empty variable is a configuration error.
    fn api_key(&self) -> Result<String, ChatError> {
        match self.settings.api_key.strip_prefix("env:") {
            Some(name) => {
                let name = name.trim();
                match std::env::var(name) {
                    Ok(key) if !key.is_empty() => Ok(key),
                    _ => Err(ChatError::Config(format!(
                        "Environment variable {name} not found"
                    ))),
                }
            }
            None => Ok(self.settings.api_key.clone()),
        }
    }

    fn client(&self) -> Result<OpenAIClient<OpenAIConfig>, ChatError> {
        let config = OpenAIConfig::new()
            .with_api_key(self.api_key()?)
            .with_api_base(self.settings.base_url.clone());
        Ok(OpenAIClient::with_config(config))
    }
}

#[async_trait]
impl CompletionModel for GroqModel {
    #[instrument(skip_all, fields(model = %request.model_id, stream = request.stream))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        let client = self.client()?;
        let body = ChatCompletionRequest::from(request);
        debug!(
            temperature = request.temperature,
            max_tokens = request.max_tokens,
            top_p = request.top_p,
            system_prompt_len = request.system_prompt.len(),
            "Sending chat completion request"
        );

        if request.stream {
            let stream = client
                .chat()
                .create_stream_byot::<_, ChatCompletionStreamResponse>(body)
                .await?;
            let fragments = stream.map(|chunk| -> Result<Fragment, ChatError> {
                let chunk = chunk?;
                let choice = chunk.choices.into_iter().next();
                if let Some(reason) = choice.as_ref().and_then(|c| c.finish_reason.as_deref()) {
                    debug!(finish_reason = reason, "Stream finished");
                }
                Ok(Fragment {
                    delta_content: choice.and_then(|c| c.delta.content).unwrap_or_default(),
                })
            });
            Ok(ChatResponse::Stream(fragments.boxed()))
        } else {
            let response: ChatCompletionResponse = client.chat().create_byot(body).await?;
            let choice = response
                .choices
                .into_iter()
                .next()
                .ok_or_else(|| ChatError::Vendor("Response contained no choices".to_string()))?;
            Ok(ChatResponse::Single {
                content: choice.message.content.unwrap_or_default(),
            })
        }
    }
}
