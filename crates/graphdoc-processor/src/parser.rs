//! AsciiDoc parser
//!
//! Parses AsciiDoc text into a header plus a sequence of blocks. The parser
//! is line-oriented and runs as a small state machine.
//!
//! # Supported syntax
//!
//! - Document title: `= Title` (subtitle split on the last `": "`)
//! - Implicit author line: `First Middle Last <email>` directly after the
//!   title, or an `:author:` attribute entry when no author line is present
//! - Revision line: `v1.2, 2020-04-13: remark` directly after the author line
//! - Attribute entries: `:key: value`, `:flag:`, `:!flag:`
//! - Headings: `== Level 1`, `=== Level 2`, ...
//! - Paragraphs separated by blank lines
//! - Inline formatting: `*bold*`, `_italic_`, `` `mono` ``
//! - Lists: `* unordered`, `. ordered`
//! - Literal blocks: `----` fences, with an optional `[source,lang]` style line
//! - Block macros: `name::target[attrs]` (`image::` is built in)

use regex::Regex;

use crate::ast::{
    AuthorInfo, Block, FormatType, Header, Heading, ImageBlock, Inline, List, ListItem, ListType,
    LiteralBlock, MacroCall, Paragraph, RevisionInfo, TitleParts,
};
use crate::attributes::AttributeValue;
use crate::error::{ProcessorError, Result};

/// Parser state for tracking what kind of block is currently being built
#[derive(Debug, Clone, PartialEq)]
enum ParserState {
    /// At the root level, not in any block
    Root,
    /// Building a paragraph with accumulated lines
    Paragraph(Vec<String>),
    /// Building a list with accumulated items
    List(ListType, Vec<ListItem>),
    /// Inside a `----` fence, accumulating verbatim lines
    Literal {
        language: Option<String>,
        lines: Vec<String>,
    },
}

/// Line-oriented AsciiDoc parser
pub(crate) struct Parser {
    /// Parsed document header
    header: Header,
    /// Accumulated blocks
    blocks: Vec<Block>,
    /// Current parser state
    state: ParserState,
    /// Whether the document header (title, author, revision, attributes) is done
    header_done: bool,
    /// Whether the implicit author line position has been consumed
    author_line_seen: bool,
    /// Pending `[source,lang]` style line awaiting its fence
    pending_language: Option<Option<String>>,
}

/// Parsed output: header plus content blocks
#[derive(Debug)]
pub(crate) struct ParseOutput {
    pub header: Header,
    pub blocks: Vec<Block>,
}

impl Parser {
    pub(crate) fn new() -> Self {
        Self {
            header: Header::default(),
            blocks: Vec::new(),
            state: ParserState::Root,
            header_done: false,
            author_line_seen: false,
            pending_language: None,
        }
    }

    /// Parse the entire document
    pub(crate) fn parse(mut self, text: &str) -> Result<ParseOutput> {
        // Normalize line endings
        let text = text.replace("\r\n", "\n");

        for line in text.lines() {
            self.process_line(line);
        }

        if matches!(self.state, ParserState::Literal { .. }) {
            return Err(ProcessorError::Parse(
                "unterminated literal block".to_string(),
            ));
        }

        // Flush any remaining state
        self.flush_state();

        // An :author: attribute entry stands in for the implicit author line
        if self.header.author.is_none() {
            let derived = self
                .header
                .attributes
                .get("author")
                .and_then(AttributeValue::as_str)
                .map(|value| parse_author_line(value.trim()));
            if derived.is_some() {
                self.header.author = derived;
            }
        }

        Ok(ParseOutput {
            header: self.header,
            blocks: self.blocks,
        })
    }

    /// Process a single line
    fn process_line(&mut self, line: &str) {
        // Inside a literal fence everything is verbatim until the closing fence
        if let ParserState::Literal { lines, .. } = &mut self.state {
            if is_fence(line) {
                self.flush_state();
            } else {
                lines.push(line.to_string());
            }
            return;
        }

        if !self.header_done && self.process_header_line(line) {
            return;
        }

        // Empty line ends the current block
        if line.trim().is_empty() {
            self.flush_state();
            self.header_done = true;
            return;
        }

        // Once we see a non-header element, the header is done
        self.header_done = true;

        // Style line for a following literal fence, e.g. [source,rust]
        if let Some(language) = try_parse_source_style(line) {
            self.flush_state();
            self.pending_language = Some(language);
            return;
        }

        // Opening literal fence
        if is_fence(line) {
            self.flush_state();
            let language = self.pending_language.take().flatten();
            self.state = ParserState::Literal {
                language,
                lines: Vec::new(),
            };
            return;
        }
        self.pending_language = None;

        // Block macro, e.g. image::logo.png[Logo]
        if let Some(block) = try_parse_block_macro(line) {
            self.flush_state();
            self.blocks.push(block);
            return;
        }

        // Headings (== Level 1, === Level 2, etc.)
        if let Some(heading) = try_parse_heading(line) {
            self.flush_state();
            self.blocks.push(Block::Heading(heading));
            return;
        }

        // Unordered list item (* item or ** item)
        if let Some((level, content)) = try_parse_list_item(line, '*') {
            self.handle_list_item(ListType::Unordered, level, content);
            return;
        }

        // Ordered list item (. item or .. item)
        if let Some((level, content)) = try_parse_list_item(line, '.') {
            self.handle_list_item(ListType::Ordered, level, content);
            return;
        }

        // Otherwise, it's paragraph content
        self.handle_paragraph_line(line);
    }

    /// Process a line while still inside the document header
    ///
    /// Returns true when the line was consumed as header content.
    fn process_header_line(&mut self, line: &str) -> bool {
        // Document title (level 0 heading)
        if self.header.title.is_none()
            && self.blocks.is_empty()
            && line.starts_with("= ")
            && !line.starts_with("== ")
        {
            self.header.title = Some(TitleParts::partition(line[2..].trim()));
            return true;
        }

        // Attribute entries (:key: value, :flag:, :!flag:)
        if let Some((key, value)) = try_parse_attribute_entry(line) {
            self.header.attributes.insert(key, value);
            return true;
        }

        if line.trim().is_empty() || self.header.title.is_none() {
            return false;
        }

        // Implicit author line: the first non-attribute line after the title,
        // before any attribute entries
        if !self.author_line_seen {
            self.author_line_seen = true;
            if self.header.attributes.is_empty() {
                self.header.author = Some(parse_author_line(line.trim()));
                return true;
            }
            return false;
        }

        // Revision line: only directly after the author line
        if self.header.revision.is_none() && looks_like_revision(line.trim()) {
            self.header.revision = Some(parse_revision_line(line.trim()));
            return true;
        }

        false
    }

    /// Handle a list item
    fn handle_list_item(&mut self, list_type: ListType, level: usize, content: String) {
        let item = ListItem {
            inlines: parse_inlines(&content),
            level: level as u8,
        };

        match &mut self.state {
            ParserState::List(current_type, items) if *current_type == list_type => {
                // Continue the current list
                items.push(item);
            }
            _ => {
                // Start a new list (flush any previous state)
                self.flush_state();
                self.state = ParserState::List(list_type, vec![item]);
            }
        }
    }

    /// Handle a paragraph line
    fn handle_paragraph_line(&mut self, line: &str) {
        match &mut self.state {
            ParserState::Paragraph(lines) => {
                // Continue the current paragraph
                lines.push(line.to_string());
            }
            _ => {
                // Start a new paragraph
                self.flush_state();
                self.state = ParserState::Paragraph(vec![line.to_string()]);
            }
        }
    }

    /// Flush the current state to blocks
    fn flush_state(&mut self) {
        let state = std::mem::replace(&mut self.state, ParserState::Root);

        match state {
            ParserState::Root => {}
            ParserState::Paragraph(lines) => {
                if !lines.is_empty() {
                    let text = lines.join(" ");
                    self.blocks.push(Block::Paragraph(Paragraph {
                        inlines: parse_inlines(&text),
                    }));
                }
            }
            ParserState::List(list_type, items) => {
                if !items.is_empty() {
                    self.blocks.push(Block::List(List { list_type, items }));
                }
            }
            ParserState::Literal { language, lines } => {
                self.blocks.push(Block::Literal(LiteralBlock {
                    content: lines.join("\n"),
                    language,
                }));
            }
        }
    }
}

/// Whether a line is a literal block fence (four or more dashes)
fn is_fence(line: &str) -> bool {
    let trimmed = line.trim_end();
    trimmed.len() >= 4 && trimmed.chars().all(|c| c == '-')
}

/// Parse an attribute entry like `:key: value`, `:flag:` or `:!flag:`
fn try_parse_attribute_entry(line: &str) -> Option<(String, AttributeValue)> {
    let rest = line.strip_prefix(':')?;
    let colon = rest.find(':')?;
    let key = rest[..colon].trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    let value = rest[colon + 1..].trim();

    // :!flag: unsets, :flag: sets
    if let Some(negated) = key.strip_prefix('!') {
        if value.is_empty() {
            return Some((negated.to_string(), AttributeValue::Bool(false)));
        }
        return None;
    }
    if value.is_empty() {
        return Some((key.to_string(), AttributeValue::Bool(true)));
    }
    Some((key.to_string(), AttributeValue::from(value)))
}

/// Try to parse a `[source,lang]` style line
///
/// Returns `Some(language)` when the line is a source style line.
fn try_parse_source_style(line: &str) -> Option<Option<String>> {
    let re = Regex::new(r"^\[source(?:\s*,\s*([^\]\s]+))?\]\s*$").unwrap();
    let caps = re.captures(line)?;
    Some(caps.get(1).map(|m| m.as_str().to_string()))
}

/// Try to parse a block macro line, e.g. `image::shapes/circle.png[Circle]`
fn try_parse_block_macro(line: &str) -> Option<Block> {
    let re = Regex::new(r"^([a-zA-Z][a-zA-Z0-9_-]*)::([^\s\[\]]*)\[([^\]]*)\]\s*$").unwrap();
    let caps = re.captures(line)?;
    let name = caps[1].to_string();
    let target = caps[2].to_string();
    let attrs: Vec<String> = caps[3]
        .split(',')
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .collect();

    if name == "image" {
        return Some(Block::Image(ImageBlock {
            alt: attrs.first().cloned(),
            target,
        }));
    }
    Some(Block::Macro(MacroCall {
        name,
        target,
        attrs,
    }))
}

/// Try to parse a heading line
fn try_parse_heading(line: &str) -> Option<Heading> {
    // Count leading '=' characters
    let level = line.chars().take_while(|c| *c == '=').count();

    // Must have at least 2 '=' for a heading (== is level 1)
    // and must be followed by a space
    if (2..=6).contains(&level) && line.chars().nth(level) == Some(' ') {
        let text = line[level + 1..].trim().to_string();
        return Some(Heading {
            level: (level - 1) as u8, // == is level 1, === is level 2, etc.
            text: parse_inlines(&text),
        });
    }

    None
}

/// Try to parse a list item marked with `marker` characters
fn try_parse_list_item(line: &str, marker: char) -> Option<(usize, String)> {
    let level = line.chars().take_while(|c| *c == marker).count();

    // At least one marker followed by a space
    if level >= 1 && line.chars().nth(level) == Some(' ') {
        let content = line[level + 1..].trim().to_string();
        return Some((level - 1, content)); // level 0 = *, level 1 = **, etc.
    }

    None
}

/// Parse the implicit author line: `First [Middle...] Last <email>`
fn parse_author_line(line: &str) -> AuthorInfo {
    let (name_part, email) = match (line.rfind('<'), line.ends_with('>')) {
        (Some(open), true) => (
            line[..open].trim(),
            line[open + 1..line.len() - 1].trim().to_string(),
        ),
        _ => (line, String::new()),
    };

    let words: Vec<&str> = name_part.split_whitespace().collect();
    let (first, middle, last) = match words.len() {
        0 => (String::new(), String::new(), String::new()),
        1 => (words[0].to_string(), String::new(), String::new()),
        2 => (words[0].to_string(), String::new(), words[1].to_string()),
        n => (
            words[0].to_string(),
            words[1..n - 1].join(" "),
            words[n - 1].to_string(),
        ),
    };

    let initials: String = [&first, &middle, &last]
        .iter()
        .filter_map(|part| part.chars().next())
        .collect();

    AuthorInfo {
        full_name: words.join(" "),
        first_name: first,
        middle_name: middle,
        last_name: last,
        initials,
        email,
    }
}

/// Whether a header line looks like a revision line (`v1.2, ...` or `1.2, ...`)
fn looks_like_revision(line: &str) -> bool {
    let rest = line.strip_prefix('v').unwrap_or(line);
    rest.starts_with(|c: char| c.is_ascii_digit())
}

/// Parse a revision line: `v1.2, 2020-04-13: remark`
fn parse_revision_line(line: &str) -> RevisionInfo {
    let (main, remark) = match line.find(':') {
        Some(idx) => (line[..idx].trim(), line[idx + 1..].trim().to_string()),
        None => (line, String::new()),
    };

    let (number, date) = match main.split_once(',') {
        Some((num, date)) => (
            num.trim().strip_prefix('v').unwrap_or(num.trim()).to_string(),
            date.trim().to_string(),
        ),
        None => {
            if let Some(num) = main.strip_prefix('v') {
                (num.to_string(), String::new())
            } else {
                (String::new(), main.to_string())
            }
        }
    };

    RevisionInfo {
        number,
        date,
        remark,
    }
}

/// Parse inline formatting in text
fn parse_inlines(text: &str) -> Vec<Inline> {
    // Regex patterns for inline formatting, processed left-to-right
    let bold_re = Regex::new(r"\*([^*]+)\*").unwrap();
    let italic_re = Regex::new(r"_([^_]+)_").unwrap();
    let mono_re = Regex::new(r"`([^`]+)`").unwrap();

    let mut result = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        // Find the earliest match of any formatting
        let earliest = [
            bold_re
                .captures(remaining)
                .map(|c| (c.get(0).unwrap(), c.get(1).unwrap(), FormatType::Bold)),
            italic_re
                .captures(remaining)
                .map(|c| (c.get(0).unwrap(), c.get(1).unwrap(), FormatType::Italic)),
            mono_re
                .captures(remaining)
                .map(|c| (c.get(0).unwrap(), c.get(1).unwrap(), FormatType::Monospace)),
        ]
        .into_iter()
        .flatten()
        .min_by_key(|(whole, _, _)| whole.start());

        match earliest {
            Some((whole, inner, format)) => {
                if whole.start() > 0 {
                    result.push(Inline::Text(remaining[..whole.start()].to_string()));
                }
                result.push(Inline::Format(
                    format,
                    Box::new(Inline::Text(inner.as_str().to_string())),
                ));
                remaining = &remaining[whole.end()..];
            }
            None => {
                result.push(Inline::Text(remaining.to_string()));
                break;
            }
        }
    }

    result
}
