//! One chat exchange: load the system prompt, call the model, render the reply.
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use futures::StreamExt;
use groqchat_core::completion::{
    ChatRequest, ChatResponse, CompletionModel, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
    DEFAULT_TOP_P,
};
use groqchat_core::config::Config;
use groqchat_core::error::ChatError;
use groqchat_core::prompt::read_prompt;
use tracing::{error, info, warn};

use crate::cli::ux::{GenerationSpinner, Presenter};

/// Everything the user chose for a single exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatOptions {
    pub model_alias: String,
    pub prompt_alias: String,
    /// Base directory for relative prompt paths.
    pub prompt_dir: PathBuf,
    pub message: String,
    pub stream: bool,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

impl ChatOptions {
    /// Options using the configured default aliases and sampling settings.
    pub fn new(config: &Config, message: impl Into<String>) -> Self {
        Self {
            model_alias: config.defaults.model.clone(),
            prompt_alias: config.defaults.prompt.clone(),
            prompt_dir: PathBuf::from("."),
            message: message.into(),
            stream: false,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            top_p: DEFAULT_TOP_P,
        }
    }
}

/// Runs one exchange and renders the outcome.
///
/// Any failure is shown as a single error panel and is not returned; only a
/// failure to write to the sink itself is.
pub async fn run_chat<W: Write>(
    config: &Config,
    model: &dyn CompletionModel,
    options: &ChatOptions,
    presenter: &mut Presenter<W>,
) -> io::Result<()> {
    match exchange(config, model, options, presenter).await {
        Ok(()) => Ok(()),
        Err(err) => {
            error!("Chat failed: {err:#}");
            presenter.error(&err)
        }
    }
}

async fn exchange<W: Write>(
    config: &Config,
    model: &dyn CompletionModel,
    options: &ChatOptions,
    presenter: &mut Presenter<W>,
) -> anyhow::Result<()> {
    // Aliases are checked before anything touches the network.
    let model_id = config.model_id(&options.model_alias).ok_or_else(|| {
        ChatError::Config(format!("Unknown model alias '{}'", options.model_alias))
    })?;
    let prompt_path = config
        .prompt_path(&options.prompt_alias, &options.prompt_dir)
        .ok_or_else(|| {
            ChatError::Config(format!("Unknown prompt alias '{}'", options.prompt_alias))
        })?;

    let system_prompt = load_system_prompt(&prompt_path, presenter)?;
    let request = ChatRequest {
        system_prompt,
        user_message: options.message.clone(),
        model_id: model_id.to_string(),
        temperature: options.temperature,
        max_tokens: options.max_tokens,
        top_p: options.top_p,
        stream: options.stream,
    };
    info!(model = model_id, stream = options.stream, "Starting chat");

    let spinner = GenerationSpinner::new("Generating...");
    let response = model.complete(&request).await;
    spinner.clear();

    match response? {
        ChatResponse::Single { content } => presenter.response(model_id, &content)?,
        ChatResponse::Stream(mut fragments) => {
            presenter.stream_header(model_id)?;
            while let Some(fragment) = fragments.next().await {
                presenter.fragment(&fragment?.delta_content)?;
            }
        }
    }
    Ok(())
}

/// Reads the system prompt, falling back to an empty prompt with a warning.
pub fn load_system_prompt<W: Write>(
    path: &Path,
    presenter: &mut Presenter<W>,
) -> io::Result<String> {
    match read_prompt(path) {
        Ok(text) => Ok(text),
        Err(err) => {
            warn!(path = %path.display(), "Using empty system prompt: {err}");
            presenter.warning(&err.to_string())?;
            Ok(String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ScriptedModel, prompt_dir_with_default, test_config, write_prompt};
    use console::strip_ansi_codes;

    async fn render(model: &ScriptedModel, options: &ChatOptions) -> String {
        let config = test_config();
        let mut presenter = Presenter::new(Vec::new(), 60);
        run_chat(&config, model, options, &mut presenter)
            .await
            .unwrap();
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    fn options_in(dir: &Path, message: &str) -> ChatOptions {
        let mut options = ChatOptions::new(&test_config(), message);
        options.prompt_dir = dir.to_path_buf();
        options
    }

    #[test]
    fn test_chat_options_defaults() {
        let options = ChatOptions::new(&test_config(), "hi");
        assert_eq!(options.model_alias, "l3-70");
        assert_eq!(options.prompt_alias, "def");
        assert_eq!(options.temperature, 1.0);
        assert_eq!(options.top_p, 1.0);
        assert_eq!(options.max_tokens, 1024);
        assert!(!options.stream);
    }

    #[tokio::test]
    async fn test_single_response_in_one_panel() {
        let dir = prompt_dir_with_default("Hello");
        let mut options = options_in(dir.path(), "What is 2+2?");
        options.model_alias = "l3-8".to_string();
        let model = ScriptedModel::reply("2+2 is **4**.");

        let out = strip_ansi_codes(&render(&model, &options).await).to_string();

        assert_eq!(out.matches('╭').count(), 1);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("Chatbot: llama3-8b-8192"));
        assert!(lines[1].contains("2+2 is 4."));

        let requests = model.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model_id, "llama3-8b-8192");
        assert_eq!(requests[0].system_prompt, "Hello");
        assert_eq!(requests[0].user_message, "What is 2+2?");
        assert!(!requests[0].stream);
    }

    #[tokio::test]
    async fn test_sampling_options_are_passed_through() {
        let dir = prompt_dir_with_default("");
        let mut options = options_in(dir.path(), "hi");
        options.temperature = 0.2;
        options.top_p = 0.5;
        options.max_tokens = 64;
        let model = ScriptedModel::reply("ok");

        render(&model, &options).await;

        let request = &model.requests()[0];
        assert_eq!(request.temperature, 0.2);
        assert_eq!(request.top_p, 0.5);
        assert_eq!(request.max_tokens, 64);
        assert_eq!(request.model_id, "llama3-70b-8192");
    }

    #[tokio::test]
    async fn test_cli_prompt_alias() {
        let dir = prompt_dir_with_default("default");
        write_prompt(dir.path(), "prompts/cli_helper.md", "Shell expert.\n");
        let mut options = options_in(dir.path(), "list files");
        options.prompt_alias = "cli".to_string();
        let model = ScriptedModel::reply("`ls`");

        render(&model, &options).await;

        assert_eq!(model.requests()[0].system_prompt, "Shell expert.\n");
    }

    #[tokio::test]
    async fn test_missing_prompt_warns_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let options = options_in(dir.path(), "hi");
        let model = ScriptedModel::reply("hello there");

        let out = strip_ansi_codes(&render(&model, &options).await).to_string();

        let expected = dir.path().join("prompts/prompt_default.md");
        let first_line = out.lines().next().unwrap();
        assert_eq!(first_line, format!("File not found: {}", expected.display()));
        assert!(out.contains("hello there"));
        assert_eq!(model.requests()[0].system_prompt, "");
    }

    #[test]
    fn test_unreadable_prompt_is_not_reported_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.md");
        std::fs::write(&path, b"\xff\xfe\x00").unwrap();
        let mut presenter = Presenter::new(Vec::new(), 60);

        let prompt = load_system_prompt(&path, &mut presenter).unwrap();

        assert_eq!(prompt, "");
        let out = String::from_utf8(presenter.into_inner()).unwrap();
        let out = strip_ansi_codes(&out);
        let warning = out.lines().next().unwrap();
        assert!(
            warning.starts_with(&format!("Could not read {}: ", path.display())),
            "{warning}"
        );
        assert!(!out.contains("File not found"));
    }

    #[tokio::test]
    async fn test_streamed_fragments_in_order() {
        let dir = prompt_dir_with_default("");
        let mut options = options_in(dir.path(), "greet");
        options.model_alias = "l3-8".to_string();
        options.stream = true;
        let model = ScriptedModel::fragments(&["Hel", "lo", "!"]);

        let out = strip_ansi_codes(&render(&model, &options).await).to_string();

        assert_eq!(out, "llama3-8b-8192:\nHello!");
        assert!(model.requests()[0].stream);
    }

    #[tokio::test]
    async fn test_empty_fragments_print_nothing() {
        let dir = prompt_dir_with_default("");
        let mut options = options_in(dir.path(), "greet");
        options.stream = true;
        let model = ScriptedModel::fragments(&["", "Hi", "", ""]);

        let out = strip_ansi_codes(&render(&model, &options).await).to_string();

        assert_eq!(out, "llama3-70b-8192:\nHi");
    }

    #[tokio::test]
    async fn test_empty_single_response_is_not_an_error() {
        let dir = prompt_dir_with_default("");
        let options = options_in(dir.path(), "hi");
        let model = ScriptedModel::reply("");

        let out = strip_ansi_codes(&render(&model, &options).await).to_string();

        assert!(out.contains("Chatbot: llama3-70b-8192"));
        assert!(!out.contains("Error"));
    }

    #[tokio::test]
    async fn test_vendor_failure_renders_one_error_panel() {
        let dir = prompt_dir_with_default("");
        let options = options_in(dir.path(), "hi");
        let model = ScriptedModel::fail("Invalid API Key");

        let out = strip_ansi_codes(&render(&model, &options).await).to_string();

        assert_eq!(out.matches('╭').count(), 1);
        assert!(out.lines().next().unwrap().contains(" Error "));
        assert!(out.contains("Invalid API Key"));
    }

    #[tokio::test]
    async fn test_failure_mid_stream_keeps_partial_output() {
        let dir = prompt_dir_with_default("");
        let mut options = options_in(dir.path(), "hi");
        options.stream = true;
        let model = ScriptedModel::fail_after(&["Par", "tial"], "stream closed");

        let out = strip_ansi_codes(&render(&model, &options).await).to_string();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "llama3-70b-8192:");
        assert_eq!(lines[1], "Partial");
        assert!(lines[2].contains(" Error "));
        assert!(out.contains("stream closed"));
    }

    #[tokio::test]
    async fn test_unknown_alias_fails_before_request() {
        let dir = prompt_dir_with_default("");
        let mut options = options_in(dir.path(), "hi");
        options.model_alias = "gpt-9".to_string();
        let model = ScriptedModel::reply("unused");

        let out = strip_ansi_codes(&render(&model, &options).await).to_string();

        assert!(out.contains("Unknown model alias 'gpt-9'"));
        assert!(model.requests().is_empty());
    }

    #[tokio::test]
    async fn test_identical_runs_render_identical_output() {
        let dir = prompt_dir_with_default("Be brief.");
        let options = options_in(dir.path(), "What is Rust?");

        let first = render(&ScriptedModel::reply("# Rust\n\nA *systems* language."), &options).await;
        let second = render(&ScriptedModel::reply("# Rust\n\nA *systems* language."), &options).await;

        assert_eq!(first, second);
    }
}
