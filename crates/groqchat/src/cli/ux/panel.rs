use console::{Style, measure_text_width, truncate_str};

const MIN_PANEL_WIDTH: usize = 12;

/// A rounded box around pre-wrapped lines, with an optional centered title.
#[derive(Debug, Clone)]
pub struct Panel {
    title: Option<String>,
    border_style: Style,
    lines: Vec<String>,
}

impl Panel {
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            title: None,
            border_style: Style::new(),
            lines,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    /// Columns available for content in a panel `width` columns wide.
    pub fn inner_width(width: usize) -> usize {
        width.max(MIN_PANEL_WIDTH) - 4
    }

    pub fn render(&self, width: usize) -> String {
        let width = width.max(MIN_PANEL_WIDTH);
        let inner = Self::inner_width(width);
        let horizontal = width - 2;
        let border = &self.border_style;

        let mut out = String::new();
        match &self.title {
            Some(title) => {
                let title = truncate_str(title, horizontal - 4, "…");
                let label = format!(" {title} ");
                let label_width = measure_text_width(&label);
                let left = (horizontal - label_width) / 2;
                let right = horizontal - label_width - left;
                out.push_str(&border.apply_to(format!("╭{}", "─".repeat(left))).to_string());
                out.push_str(&label);
                out.push_str(&border.apply_to(format!("{}╮", "─".repeat(right))).to_string());
            }
            None => {
                out.push_str(&border.apply_to(format!("╭{}╮", "─".repeat(horizontal))).to_string())
            }
        }
        out.push('\n');

        let empty = [String::new()];
        let lines = if self.lines.is_empty() {
            &empty[..]
        } else {
            &self.lines[..]
        };
        let side = border.apply_to("│").to_string();
        for line in lines {
            let pad = inner.saturating_sub(measure_text_width(line));
            out.push_str(&format!("{side} {line}{} {side}\n", " ".repeat(pad)));
        }

        out.push_str(&border.apply_to(format!("╰{}╯", "─".repeat(horizontal))).to_string());
        out.push('\n');
        out
    }
}
