//! groqchat cli definition and entrypoint.
mod select;
pub mod ux;

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::{BoolishValueParser, PossibleValuesParser};
use clap::{ArgAction, Command, CommandFactory, FromArgMatches, Parser};
use groqchat_core::completion::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, DEFAULT_TOP_P};
use groqchat_core::config::{Config, get_config};
use groqchat_core::get_completion_llm;

use crate::log::setup_logging;
use crate::svc::chat::{ChatOptions, run_chat};
pub use select::{choose_model, prompt_line, prompt_message};
use ux::Presenter;

const BASIC: &str = "Basic options";
const ADVANCED: &str = "Advanced options";

/// Simple CLI chatbot using Groq API with multiple models.
#[derive(Parser, Debug)]
#[command(name = "groqchat", author, version, about, long_about = None)]
pub struct Cli {
    /// Your message to the chatbot. Asked for interactively if omitted.
    #[arg(short = 'd', long, help_heading = BASIC)]
    pub message: Option<String>,

    /// Choose a model for the chatbot.
    #[arg(short = 'm', long, help_heading = BASIC, ignore_case = true)]
    pub model: String,

    /// Alias for file path to read system prompts.
    #[arg(short = 'p', long, help_heading = BASIC, ignore_case = true)]
    pub prompt: String,

    /// Stream mode (true or false).
    #[arg(
        short = 's',
        long,
        help_heading = ADVANCED,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
    )]
    pub stream_mode: bool,

    /// Temperature for controlling randomness.
    #[arg(short = 't', long, help_heading = ADVANCED, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Maximum number of tokens.
    #[arg(short = 'x', long, help_heading = ADVANCED, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// Top p for nucleus sampling.
    #[arg(short = 'o', long, help_heading = ADVANCED, default_value_t = DEFAULT_TOP_P)]
    pub top_p: f32,

    /// Pick the model from a list instead of using --model.
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Directory the prompt paths are relative to.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub prompt_dir: PathBuf,

    /// Show verbose logs.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The clap command with alias choices and defaults taken from `config`.
    pub fn command_for(config: &Config) -> Command {
        let models: Vec<String> = config.models.aliases().map(str::to_string).collect();
        let prompts: Vec<String> = config.prompts.aliases().map(str::to_string).collect();
        Cli::command()
            .mut_arg("model", |arg| {
                arg.value_parser(PossibleValuesParser::new(models))
                    .default_value(config.defaults.model.clone())
                    .required(false)
            })
            .mut_arg("prompt", |arg| {
                arg.value_parser(PossibleValuesParser::new(prompts))
                    .default_value(config.defaults.prompt.clone())
                    .required(false)
            })
    }

    pub fn try_parse_with<I, T>(config: &Config, args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command_for(config).try_get_matches_from(args)?;
        let mut cli = Self::from_arg_matches(&matches)?;
        // Choices match ignoring case; keep the spelling used in the tables.
        if let Some(alias) = config.models.find_ignore_case(&cli.model) {
            cli.model = alias.to_string();
        }
        if let Some(alias) = config.prompts.find_ignore_case(&cli.prompt) {
            cli.prompt = alias.to_string();
        }
        Ok(cli)
    }

    /// Parses the process arguments, exiting with usage on error.
    pub fn parse_with(config: &Config) -> Self {
        Self::try_parse_with(config, std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    pub fn chat_options(&self, model_alias: String, message: String) -> ChatOptions {
        ChatOptions {
            model_alias,
            prompt_alias: self.prompt.clone(),
            prompt_dir: self.prompt_dir.clone(),
            message,
            stream: self.stream_mode,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_p: self.top_p,
        }
    }
}

/// Runs the main CLI application.
pub async fn run() -> Result<()> {
    let config = get_config().context("Failed to load configuration")?;
    let cli = Cli::parse_with(&config);

    if cli.verbose {
        setup_logging().context("Failed to set up logging")?;
    }

    let mut presenter = Presenter::stdout();
    let (model_alias, message) = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let model_alias = if cli.interactive {
            choose_model(&config, &mut input, presenter.writer())?
        } else {
            cli.model.clone()
        };
        let message = match &cli.message {
            Some(message) => message.clone(),
            None => prompt_message(&mut input, presenter.writer())?,
        };
        (model_alias, message)
    };

    let options = cli.chat_options(model_alias, message);
    let model = get_completion_llm(config.provider.clone());
    run_chat(&config, model.as_ref(), &options, &mut presenter).await?;

    // Streamed text has no trailing newline; give the shell prompt its own line.
    if options.stream && console::Term::stdout().is_term() {
        writeln!(presenter.writer())?;
    }
    Ok(())
}
