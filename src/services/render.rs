// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

//! Terminal rendering for explanations and raw diffs.
//!
//! Markdown is walked as a `pulldown_cmark` event stream and written out as
//! plain text decorated with `console` styles. With `styled == false` the
//! output carries no escape codes, which keeps piped output and tests clean.

use console::Style;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

const RULE_WIDTH: usize = 40;
const CODE_INDENT: &str = "    ";

pub fn render_markdown(markdown: &str, styled: bool) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut writer = TerminalWriter::new(styled);
    for event in Parser::new_ext(markdown, options) {
        writer.handle(event);
    }
    writer.finish()
}

/// Colour a unified diff line by line
pub fn render_diff(diff: &str, styled: bool) -> String {
    let base = Style::new().force_styling(styled);
    diff.lines()
        .map(|line| {
            let style = if line.starts_with("+++") || line.starts_with("---") {
                base.clone().bold()
            } else if line.starts_with('+') {
                base.clone().green()
            } else if line.starts_with('-') {
                base.clone().red()
            } else if line.starts_with("@@") {
                base.clone().cyan()
            } else if line.starts_with("diff --git") {
                base.clone().bold().yellow()
            } else {
                base.clone()
            };
            style.apply_to(line).to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

struct TerminalWriter {
    styled: bool,
    out: String,
    line_start: bool,
    bold: usize,
    italic: usize,
    strike: usize,
    heading: Option<HeadingLevel>,
    links: Vec<String>,
    lists: Vec<Option<u64>>,
    item_start: bool,
    quote_depth: usize,
    in_code_block: bool,
    in_table_head: bool,
    table_cell: usize,
}

impl TerminalWriter {
    fn new(styled: bool) -> Self {
        Self {
            styled,
            out: String::new(),
            line_start: true,
            bold: 0,
            italic: 0,
            strike: 0,
            heading: None,
            links: Vec::new(),
            lists: Vec::new(),
            item_start: false,
            quote_depth: 0,
            in_code_block: false,
            in_table_head: false,
            table_cell: 0,
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                let style = if self.in_code_block {
                    self.base().green()
                } else {
                    self.inline_style()
                };
                self.write(&text, &style);
            }
            Event::Code(code) => {
                let code = if self.styled {
                    code.to_string()
                } else {
                    format!("`{code}`")
                };
                let style = self.base().cyan();
                self.write(&code, &style);
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                let style = self.base();
                self.write(&html, &style);
            }
            Event::SoftBreak => {
                let style = self.base();
                self.write(" ", &style);
            }
            Event::HardBreak => self.newline(),
            Event::Rule => {
                self.block_gap();
                let style = self.base().dim();
                self.write(&"─".repeat(RULE_WIDTH), &style);
                self.newline();
            }
            Event::TaskListMarker(done) => {
                let style = self.base();
                self.write(if done { "[x] " } else { "[ ] " }, &style);
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if !self.item_start {
                    self.block_gap();
                }
            }
            Tag::Heading { level, .. } => {
                self.block_gap();
                self.heading = Some(level);
                if !self.styled {
                    let hashes = format!("{} ", "#".repeat(heading_depth(level)));
                    let style = self.base();
                    self.write(&hashes, &style);
                }
            }
            Tag::BlockQuote(_) => {
                self.block_gap();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(kind) => {
                self.block_gap();
                if let CodeBlockKind::Fenced(lang) = kind
                    && !lang.is_empty()
                {
                    let style = self.base().dim();
                    self.write(&lang, &style);
                    self.newline();
                }
                self.in_code_block = true;
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.block_gap();
                } else {
                    self.ensure_newline();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.ensure_newline();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                let plain = self.base();
                let bold = self.base().bold();
                self.write(&indent, &plain);
                self.write(&marker, &bold);
                self.item_start = true;
            }
            Tag::Table(_) => self.block_gap(),
            Tag::TableHead => {
                self.in_table_head = true;
                self.table_cell = 0;
            }
            Tag::TableRow => self.table_cell = 0,
            Tag::TableCell => {
                if self.table_cell > 0 {
                    let style = self.base().dim();
                    self.write(" │ ", &style);
                }
                self.table_cell += 1;
            }
            Tag::Emphasis => self.italic += 1,
            Tag::Strong => self.bold += 1,
            Tag::Strikethrough => self.strike += 1,
            Tag::Link { dest_url, .. } => self.links.push(dest_url.to_string()),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.ensure_newline(),
            TagEnd::Heading(_) => {
                self.heading = None;
                self.ensure_newline();
            }
            TagEnd::BlockQuote(_) => {
                self.ensure_newline();
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.ensure_newline();
            }
            TagEnd::List(_) => {
                self.lists.pop();
                self.ensure_newline();
            }
            TagEnd::Item => {
                self.item_start = false;
                self.ensure_newline();
            }
            TagEnd::TableHead => {
                self.in_table_head = false;
                self.ensure_newline();
            }
            TagEnd::TableRow => self.ensure_newline(),
            TagEnd::Table => self.ensure_newline(),
            TagEnd::Emphasis => self.italic = self.italic.saturating_sub(1),
            TagEnd::Strong => self.bold = self.bold.saturating_sub(1),
            TagEnd::Strikethrough => self.strike = self.strike.saturating_sub(1),
            TagEnd::Link => {
                if let Some(url) = self.links.pop()
                    && !url.is_empty()
                {
                    let style = self.base().dim();
                    self.write(&format!(" ({url})"), &style);
                }
            }
            _ => {}
        }
    }

    fn base(&self) -> Style {
        Style::new().force_styling(self.styled)
    }

    fn inline_style(&self) -> Style {
        let mut style = self.base();
        if self.bold > 0 || self.heading.is_some() || self.in_table_head {
            style = style.bold();
        }
        if matches!(self.heading, Some(HeadingLevel::H1 | HeadingLevel::H2)) {
            style = style.underlined();
        }
        if self.italic > 0 {
            style = style.italic();
        }
        if self.strike > 0 {
            style = style.dim();
        }
        if !self.links.is_empty() {
            style = style.blue().underlined();
        }
        style
    }

    /// Append `text`, inserting quote bars and code indentation at line starts
    fn write(&mut self, text: &str, style: &Style) {
        for segment in text.split_inclusive('\n') {
            let (body, ends_line) = match segment.strip_suffix('\n') {
                Some(body) => (body, true),
                None => (segment, false),
            };

            if !body.is_empty() {
                if self.line_start {
                    self.push_prefix();
                }
                self.out.push_str(&style.apply_to(body).to_string());
                self.line_start = false;
                self.item_start = false;
            }

            if ends_line {
                self.newline();
            }
        }
    }

    fn push_prefix(&mut self) {
        if self.quote_depth > 0 {
            let bars = "│ ".repeat(self.quote_depth);
            self.out
                .push_str(&self.base().dim().apply_to(bars).to_string());
        }
        if self.in_code_block {
            self.out.push_str(CODE_INDENT);
        }
    }

    fn newline(&mut self) {
        self.out.push('\n');
        self.line_start = true;
    }

    fn ensure_newline(&mut self) {
        if !self.line_start {
            self.newline();
        }
    }

    /// Blank line between top-level blocks
    fn block_gap(&mut self) {
        if self.out.is_empty() {
            return;
        }
        self.ensure_newline();
        if !self.out.ends_with("\n\n") {
            self.newline();
        }
    }

    fn finish(self) -> String {
        let mut out = self.out.trim_end().to_string();
        out.push('\n');
        out
    }
}

fn heading_depth(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
