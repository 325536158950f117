//! Markdown to styled terminal lines.
use console::{Style, measure_text_width, truncate_str};
use markdown::mdast::{List, Node, Table};
use markdown::{ParseOptions, to_mdast};

const MIN_WIDTH: usize = 8;

#[derive(Debug, Clone)]
struct Span {
    text: String,
    style: Style,
}

impl Span {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::new(),
        }
    }
}

enum Atom {
    Word(Vec<Span>),
    Space,
    Newline,
}

/// Renders Markdown into lines no wider than the configured width.
///
/// Block structure (headings, paragraphs, lists, quotes, code) is kept and
/// inline emphasis becomes terminal styling.
pub struct MarkdownRenderer {
    width: usize,
}

impl MarkdownRenderer {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(MIN_WIDTH),
        }
    }

    pub fn render(&self, text: &str) -> Vec<String> {
        match to_mdast(text, &ParseOptions::gfm()) {
            Ok(root) => self.render_block(&root, self.width),
            Err(_) => wrap_text(text, self.width),
        }
    }

    fn render_blocks(&self, nodes: &[Node], width: usize, tight: bool) -> Vec<String> {
        let mut lines = Vec::new();
        for node in nodes {
            let block = self.render_block(node, width);
            if block.is_empty() {
                continue;
            }
            if !tight && !lines.is_empty() {
                lines.push(String::new());
            }
            lines.extend(block);
        }
        lines
    }

    fn render_block(&self, node: &Node, width: usize) -> Vec<String> {
        match node {
            Node::Root(root) => self.render_blocks(&root.children, width, false),
            Node::Paragraph(p) => wrap_spans(&inline_spans(&p.children, &Style::new()), width),
            Node::Heading(h) => {
                let style = match h.depth {
                    1 => Style::new().magenta().bold().underlined(),
                    2 => Style::new().magenta().bold(),
                    _ => Style::new().bold(),
                };
                wrap_spans(&inline_spans(&h.children, &style), width)
            }
            Node::Code(code) => code_lines(&code.value, width),
            Node::List(list) => self.render_list(list, width),
            Node::Blockquote(quote) => {
                let prefix = Style::new().dim().apply_to("▌ ").to_string();
                let body = self.render_blocks(&quote.children, width.saturating_sub(2).max(1), false);
                prefix_lines(body, &prefix, &prefix)
            }
            Node::ThematicBreak(_) => vec![Style::new().dim().apply_to("─".repeat(width)).to_string()],
            Node::Table(table) => render_table(table, width),
            Node::Html(html) => wrap_text(&html.value, width),
            Node::Definition(_) | Node::Yaml(_) | Node::Toml(_) => Vec::new(),
            other => match other.children() {
                Some(children) => self.render_blocks(children, width, false),
                None => wrap_text(&other.to_string(), width),
            },
        }
    }

    fn render_list(&self, list: &List, width: usize) -> Vec<String> {
        let start = list.start.unwrap_or(1) as usize;
        let mut lines = Vec::new();
        for (i, item) in list.children.iter().enumerate() {
            let mut marker = if list.ordered {
                format!("{}. ", start + i)
            } else {
                "• ".to_string()
            };
            if let Node::ListItem(li) = item {
                match li.checked {
                    Some(true) => marker.push_str("[x] "),
                    Some(false) => marker.push_str("[ ] "),
                    None => {}
                }
            }
            let indent = " ".repeat(measure_text_width(&marker));
            let children = item.children().map(Vec::as_slice).unwrap_or(&[]);
            let body = self.render_blocks(
                children,
                width.saturating_sub(indent.len()).max(1),
                !list.spread,
            );

            if list.spread && !lines.is_empty() {
                lines.push(String::new());
            }
            let marker = Style::new().yellow().bold().apply_to(&marker).to_string();
            if body.is_empty() {
                lines.push(marker);
            } else {
                lines.extend(prefix_lines(body, &marker, &indent));
            }
        }
        lines
    }
}

/// Wraps plain text, keeping explicit line breaks.
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    wrap_spans(&[Span::plain(text)], width.max(1))
}

fn inline_spans(nodes: &[Node], style: &Style) -> Vec<Span> {
    let mut spans = Vec::new();
    collect_inline(nodes, style, &mut spans);
    spans
}

fn collect_inline(nodes: &[Node], style: &Style, spans: &mut Vec<Span>) {
    for node in nodes {
        match node {
            // Soft line breaks inside a paragraph read as spaces.
            Node::Text(t) => spans.push(Span {
                text: t.value.replace('\n', " "),
                style: style.clone(),
            }),
            Node::Strong(s) => collect_inline(&s.children, &style.clone().bold(), spans),
            Node::Emphasis(e) => collect_inline(&e.children, &style.clone().italic(), spans),
            Node::Delete(d) => collect_inline(&d.children, &style.clone().strikethrough(), spans),
            Node::InlineCode(c) => spans.push(Span {
                text: c.value.clone(),
                style: style.clone().cyan(),
            }),
            Node::Link(l) => {
                collect_inline(&l.children, &style.clone().blue().underlined(), spans)
            }
            Node::Image(i) => spans.push(Span {
                text: format!("[{}]", i.alt),
                style: style.clone().dim(),
            }),
            Node::Break(_) => spans.push(Span::plain("\n")),
            Node::Html(h) => spans.push(Span {
                text: h.value.clone(),
                style: style.clone(),
            }),
            other => match other.children() {
                Some(children) => collect_inline(children, style, spans),
                None => spans.push(Span {
                    text: other.to_string(),
                    style: style.clone(),
                }),
            },
        }
    }
}

fn atomize(spans: &[Span]) -> Vec<Atom> {
    let mut atoms = Vec::new();
    let mut word: Vec<Span> = Vec::new();
    for span in spans {
        let mut current = String::new();
        for ch in span.text.chars() {
            if ch.is_whitespace() {
                if !current.is_empty() {
                    word.push(Span {
                        text: std::mem::take(&mut current),
                        style: span.style.clone(),
                    });
                }
                if !word.is_empty() {
                    atoms.push(Atom::Word(std::mem::take(&mut word)));
                }
                atoms.push(if ch == '\n' { Atom::Newline } else { Atom::Space });
            } else {
                current.push(ch);
            }
        }
        if !current.is_empty() {
            word.push(Span {
                text: current,
                style: span.style.clone(),
            });
        }
    }
    if !word.is_empty() {
        atoms.push(Atom::Word(word));
    }
    atoms
}

struct LineBuilder {
    width: usize,
    lines: Vec<String>,
    line: String,
    line_width: usize,
}

impl LineBuilder {
    fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
            line: String::new(),
            line_width: 0,
        }
    }

    fn break_line(&mut self) {
        self.lines.push(std::mem::take(&mut self.line));
        self.line_width = 0;
    }

    fn push_styled(&mut self, text: &str, style: &Style, text_width: usize) {
        self.line.push_str(&style.apply_to(text).to_string());
        self.line_width += text_width;
    }

    fn push_word(&mut self, parts: &[Span], word_width: usize) {
        if self.line_width + word_width <= self.width {
            for part in parts {
                self.push_styled(&part.text, &part.style, measure_text_width(&part.text));
            }
            return;
        }
        // Too long for any line, split on characters.
        for part in parts {
            let mut chunk = String::new();
            let mut chunk_width = 0;
            for ch in part.text.chars() {
                let mut buf = [0u8; 4];
                let cw = measure_text_width(ch.encode_utf8(&mut buf));
                if self.line_width + chunk_width + cw > self.width
                    && self.line_width + chunk_width > 0
                {
                    self.push_styled(&chunk, &part.style, chunk_width);
                    chunk.clear();
                    chunk_width = 0;
                    self.break_line();
                }
                chunk.push(ch);
                chunk_width += cw;
            }
            if !chunk.is_empty() {
                self.push_styled(&chunk, &part.style, chunk_width);
            }
        }
    }

    fn finish(mut self) -> Vec<String> {
        if !self.line.is_empty() {
            self.break_line();
        }
        self.lines
    }
}

fn wrap_spans(spans: &[Span], width: usize) -> Vec<String> {
    let mut builder = LineBuilder::new(width);
    let mut pending_space = false;

    for atom in atomize(spans) {
        match atom {
            Atom::Newline => {
                builder.break_line();
                pending_space = false;
            }
            Atom::Space => pending_space = builder.line_width > 0,
            Atom::Word(parts) => {
                let word_width: usize = parts.iter().map(|p| measure_text_width(&p.text)).sum();
                let gap = usize::from(pending_space);
                if builder.line_width > 0 && builder.line_width + gap + word_width > width {
                    builder.break_line();
                } else if pending_space {
                    builder.push_styled(" ", &Style::new(), 1);
                }
                pending_space = false;
                builder.push_word(&parts, word_width);
            }
        }
    }
    builder.finish()
}

fn code_lines(code: &str, width: usize) -> Vec<String> {
    let style = Style::new().green();
    let inner = width.saturating_sub(2).max(1);
    let mut lines = Vec::new();
    for line in code.lines() {
        let mut builder = LineBuilder::new(inner);
        builder.push_word(&[Span { text: line.to_string(), style: style.clone() }], measure_text_width(line));
        let wrapped = builder.finish();
        if wrapped.is_empty() {
            lines.push(String::new());
        }
        lines.extend(wrapped.into_iter().map(|l| format!("  {l}")));
    }
    lines
}

fn render_table(table: &Table, width: usize) -> Vec<String> {
    let rows: Vec<Vec<String>> = table
        .children
        .iter()
        .map(|row| {
            row.children()
                .map(|cells| cells.iter().map(|c| c.to_string()).collect())
                .unwrap_or_default()
        })
        .collect();

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0; columns];
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(measure_text_width(cell));
        }
    }

    let mut lines = Vec::new();
    for (r, row) in rows.iter().enumerate() {
        let cells: Vec<String> = (0..columns)
            .map(|i| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                let pad = widths[i] - measure_text_width(cell);
                format!("{cell}{}", " ".repeat(pad))
            })
            .collect();
        let line = cells.join(" │ ");
        let line = truncate_str(&line, width, "…").to_string();
        if r == 0 {
            lines.push(Style::new().bold().apply_to(line).to_string());
            let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
            lines.push(truncate_str(&rule.join("─┼─"), width, "").to_string());
        } else {
            lines.push(line);
        }
    }
    lines
}

fn prefix_lines(lines: Vec<String>, first: &str, rest: &str) -> Vec<String> {
    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let prefix = if i == 0 { first } else { rest };
            if line.is_empty() {
                prefix.trim_end().to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect()
}
