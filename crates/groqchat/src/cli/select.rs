//! Interactive prompts for values not given on the command line.
use std::io::{BufRead, Write};

use anyhow::{Result, bail};
use groqchat_core::config::Config;
use tracing::warn;

use super::ux::{ChatMessageType, style_chat_text};

/// Reads one line from `input` after printing `label`.
///
/// An empty answer takes `default`; without a default the question is asked
/// again. End of input falls back to `default` or fails.
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
    default: Option<&str>,
) -> Result<String> {
    loop {
        write!(out, "{}", style_chat_text(label, ChatMessageType::Prompt))?;
        if let Some(default) = default {
            write!(out, " [{default}]")?;
        }
        write!(out, ": ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return match default {
                Some(default) => Ok(default.to_string()),
                None => bail!("No input provided for '{label}'"),
            };
        }

        let answer = line.trim_end_matches(['\r', '\n']);
        if !answer.trim().is_empty() {
            return Ok(answer.to_string());
        }
        if let Some(default) = default {
            return Ok(default.to_string());
        }
    }
}

/// Asks for the user message.
pub fn prompt_message<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String> {
    prompt_line(input, out, "User", None)
}

/// Lists the models and asks for an alias. Unknown answers fall back to the
/// default model alias.
pub fn choose_model<R: BufRead, W: Write>(
    config: &Config,
    input: &mut R,
    out: &mut W,
) -> Result<String> {
    writeln!(
        out,
        "{}",
        style_chat_text("Available models:", ChatMessageType::ListHeader)
    )?;
    for (alias, model_id) in config.models.iter() {
        writeln!(
            out,
            "{} {}",
            style_chat_text(alias, ChatMessageType::Alias),
            style_chat_text(&format!("({model_id})"), ChatMessageType::Target)
        )?;
    }

    let default = config.defaults.model.as_str();
    let answer = prompt_line(input, out, "Please choose a model alias", Some(default))?;
    match config.models.find_ignore_case(answer.trim()) {
        Some(alias) => Ok(alias.to_string()),
        None => {
            warn!(answer = %answer, "Unknown model alias, using default");
            Ok(default.to_string())
        }
    }
}
