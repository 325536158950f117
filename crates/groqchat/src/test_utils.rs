//! Test helpers for the groqchat crate.
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use groqchat_core::completion::{ChatRequest, ChatResponse, CompletionModel, Fragment};
use groqchat_core::config::{Config, get_config};
use groqchat_core::error::ChatError;
use tempfile::TempDir;

enum Script {
    Reply(String),
    Fragments(Vec<String>),
    Fail(String),
    FailAfter(Vec<String>, String),
}

/// A `CompletionModel` that replays a fixed script and records every request.
pub struct ScriptedModel {
    script: Script,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedModel {
    fn with_script(script: Script) -> Self {
        Self {
            script,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn reply(text: &str) -> Self {
        Self::with_script(Script::Reply(text.to_string()))
    }

    pub fn fragments(parts: &[&str]) -> Self {
        Self::with_script(Script::Fragments(to_strings(parts)))
    }

    pub fn fail(message: &str) -> Self {
        Self::with_script(Script::Fail(message.to_string()))
    }

    pub fn fail_after(parts: &[&str], message: &str) -> Self {
        Self::with_script(Script::FailAfter(to_strings(parts), message.to_string()))
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn to_strings(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}

fn fragment(text: String) -> Result<Fragment, ChatError> {
    Ok(Fragment {
        delta_content: text,
    })
}

#[async_trait]
impl CompletionModel for ScriptedModel {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.script {
            Script::Reply(text) => Ok(ChatResponse::Single {
                content: text.clone(),
            }),
            Script::Fragments(parts) => Ok(ChatResponse::Stream(
                stream::iter(parts.clone().into_iter().map(fragment)).boxed(),
            )),
            Script::Fail(message) => Err(ChatError::Vendor(message.clone())),
            Script::FailAfter(parts, message) => {
                let items = parts
                    .clone()
                    .into_iter()
                    .map(fragment)
                    .chain(std::iter::once(Err(ChatError::Vendor(message.clone()))));
                Ok(ChatResponse::Stream(stream::iter(items).boxed()))
            }
        }
    }
}

/// The built-in configuration.
pub fn test_config() -> Config {
    get_config().unwrap()
}

/// A prompt base directory holding `prompts/prompt_default.md` with `content`.
pub fn prompt_dir_with_default(content: &str) -> TempDir {
    let dir = tempfile::Builder::new()
        .prefix("groqchat-test")
        .rand_bytes(8)
        .tempdir()
        .unwrap();
    write_prompt(dir.path(), "prompts/prompt_default.md", content);
    dir
}

pub fn write_prompt(base: &Path, relative: &str, content: &str) -> PathBuf {
    let path = base.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    path
}
