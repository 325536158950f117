use crate::completion::CompletionModel;
use crate::config::ProviderConfig;
use crate::provider::openai::GroqModel;
use tracing::instrument;

/// Builds the completion model for the configured provider.
#[instrument(skip(settings), fields(base_url = %settings.base_url))]
pub fn get_completion_llm(settings: ProviderConfig) -> Box<dyn CompletionModel> {
    Box::new(GroqModel::new(settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::ChatRequest;
    use crate::error::ChatError;

    #[tokio::test]
    async fn test_get_completion_llm_defers_key_lookup() {
        // Construction never fails; the key is only needed for a request.
        let model = get_completion_llm(ProviderConfig {
            base_url: "http://localhost:1234".to_string(),
            api_key: "env:GROQCHAT_TEST_FACTORY_UNSET_KEY".to_string(),
        });
        let err = model
            .complete(&ChatRequest::new("llama3-8b-8192", "", "hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Config(_)));
    }
}
