mod panel;
mod presenter;
mod progress;
mod render;

pub use panel::Panel;
pub use presenter::{ChatMessageType, Presenter, style_chat_text};
pub use progress::GenerationSpinner;
pub use render::MarkdownRenderer;

use console::Term;

const DEFAULT_WIDTH: usize = 80;

/// Width of the attached terminal, or 80 columns when not a terminal.
pub fn terminal_width() -> usize {
    Term::stdout()
        .size_checked()
        .map(|(_, cols)| cols as usize)
        .unwrap_or(DEFAULT_WIDTH)
}
