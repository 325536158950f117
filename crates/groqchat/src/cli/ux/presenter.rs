use std::io::{self, Stdout, Write};

use console::{Style, StyledObject};

use super::panel::Panel;
use super::render::{MarkdownRenderer, wrap_text};
use super::terminal_width;

/// Represents the type of console text, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatMessageType {
    /// The prompt for user input.
    Prompt,
    /// Heading of a streamed response.
    Header,
    /// Heading of the model list.
    ListHeader,
    /// A model or prompt alias.
    Alias,
    /// The value an alias stands for.
    Target,
    Warning,
    Error,
}

/// Styles a string of text according to the specified `ChatMessageType`.
pub fn style_chat_text(text: &str, style: ChatMessageType) -> StyledObject<&str> {
    let style_obj = match style {
        ChatMessageType::Prompt => Style::new().blue().bold(),
        ChatMessageType::Header => Style::new().magenta().bold(),
        ChatMessageType::ListHeader => Style::new().blue().bold(),
        ChatMessageType::Alias => Style::new().magenta().bold(),
        ChatMessageType::Target => Style::new().color256(218),
        ChatMessageType::Warning => Style::new().red().bold(),
        ChatMessageType::Error => Style::new().red(),
    };
    style_obj.apply_to(text)
}

/// Renders chat output to a sink.
pub struct Presenter<W: Write> {
    out: W,
    width: usize,
    mid_line: bool,
}

impl Presenter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout(), terminal_width())
    }
}

impl<W: Write> Presenter<W> {
    pub fn new(out: W, width: usize) -> Self {
        Self {
            out,
            width,
            mid_line: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Direct access to the sink, used for interactive prompts.
    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    /// A complete response as Markdown inside a titled panel.
    pub fn response(&mut self, model_id: &str, text: &str) -> io::Result<()> {
        let lines = MarkdownRenderer::new(Panel::inner_width(self.width)).render(text);
        let panel = Panel::new(lines)
            .title(format!("Chatbot: {model_id}"))
            .border_style(Style::new().magenta().bold());
        self.write_block(&panel.render(self.width))
    }

    /// The line printed before streamed fragments.
    pub fn stream_header(&mut self, model_id: &str) -> io::Result<()> {
        self.end_line()?;
        let header = format!("{model_id}:");
        writeln!(self.out, "{}", style_chat_text(&header, ChatMessageType::Header))?;
        self.out.flush()
    }

    /// Writes a streamed fragment as is and flushes it.
    pub fn fragment(&mut self, text: &str) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.out.write_all(text.as_bytes())?;
        self.mid_line = !text.ends_with('\n');
        self.out.flush()
    }

    pub fn warning(&mut self, message: &str) -> io::Result<()> {
        self.end_line()?;
        writeln!(self.out, "{}", style_chat_text(message, ChatMessageType::Warning))?;
        self.out.flush()
    }

    /// The error panel, with the full error chain as its body.
    pub fn error(&mut self, error: &anyhow::Error) -> io::Result<()> {
        self.end_line()?;
        let lines = wrap_text(&format!("{error:#}"), Panel::inner_width(self.width));
        let panel = Panel::new(lines)
            .title(style_chat_text("Error", ChatMessageType::Error).to_string())
            .border_style(Style::new().red());
        self.write_block(&panel.render(self.width))
    }

    fn write_block(&mut self, block: &str) -> io::Result<()> {
        self.end_line()?;
        self.out.write_all(block.as_bytes())?;
        self.out.flush()
    }

    // Keeps block output off the tail of a partially streamed line.
    fn end_line(&mut self) -> io::Result<()> {
        if self.mid_line {
            writeln!(self.out)?;
            self.mid_line = false;
        }
        Ok(())
    }
}
