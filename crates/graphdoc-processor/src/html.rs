//! HTML renderer
//!
//! Converts parsed blocks into embedded HTML (body content only, no document
//! title heading). Block macros are expanded here: `image` is built in, other
//! names are resolved against the registered handler set.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;
use std::sync::Arc;

use crate::ast::{Block, FormatType, ImageBlock, Inline, List, ListType, MacroCall};
use crate::attributes::AttributeValue;
use crate::error::{ProcessorError, Result};
use crate::processor::BlockMacro;

/// HTML renderer over a finalized attribute set and macro table
pub(crate) struct HtmlRenderer<'a> {
    attributes: &'a BTreeMap<String, AttributeValue>,
    macros: &'a HashMap<String, Arc<dyn BlockMacro>>,
    output: String,
}

impl<'a> HtmlRenderer<'a> {
    pub(crate) fn new(
        attributes: &'a BTreeMap<String, AttributeValue>,
        macros: &'a HashMap<String, Arc<dyn BlockMacro>>,
    ) -> Self {
        Self {
            attributes,
            macros,
            output: String::new(),
        }
    }

    /// Render blocks to HTML
    pub(crate) fn render(mut self, blocks: &[Block]) -> Result<String> {
        for block in blocks {
            self.render_block(block)?;
        }
        Ok(self.output)
    }

    fn render_block(&mut self, block: &Block) -> Result<()> {
        match block {
            Block::Paragraph(para) => {
                self.output.push_str("<p>");
                self.render_inlines(&para.inlines);
                self.output.push_str("</p>\n");
            }
            Block::Heading(heading) => {
                // == is level 1, rendered as <h2> (h1 is the document title)
                let tag_level = heading.level + 1;
                write!(self.output, "<h{}>", tag_level).unwrap();
                self.render_inlines(&heading.text);
                writeln!(self.output, "</h{}>", tag_level).unwrap();
            }
            Block::List(list) => self.render_list(list),
            Block::Literal(literal) => {
                self.output.push_str("<pre><code");
                if let Some(language) = &literal.language {
                    write!(self.output, " class=\"language-{}\"", escape(language))
                        .unwrap();
                }
                self.output.push('>');
                self.output.push_str(&escape(&literal.content));
                self.output.push_str("</code></pre>\n");
            }
            Block::Image(image) => self.render_image(image),
            Block::Macro(call) => self.expand_macro(call)?,
            Block::Raw(html) => {
                self.output.push_str(html);
                self.output.push('\n');
            }
        }
        Ok(())
    }

    fn render_list(&mut self, list: &List) {
        let tag = match list.list_type {
            ListType::Unordered => "ul",
            ListType::Ordered => "ol",
        };
        writeln!(self.output, "<{}>", tag).unwrap();
        for item in &list.items {
            self.output.push_str("<li>");
            self.render_inlines(&item.inlines);
            self.output.push_str("</li>\n");
        }
        writeln!(self.output, "</{}>", tag).unwrap();
    }

    fn render_image(&mut self, image: &ImageBlock) {
        let src = self.resolve_image_src(&image.target);
        self.output.push_str("<div class=\"imageblock\"><img src=\"");
        self.output.push_str(&escape(&src));
        self.output.push('"');
        if let Some(alt) = &image.alt {
            write!(self.output, " alt=\"{}\"", escape(alt)).unwrap();
        }
        self.output.push_str("></div>\n");
    }

    /// Resolve an image target against the `imagesdir` attribute
    ///
    /// Absolute targets and URLs are left alone; the soft-set `@` marker on
    /// the attribute value is stripped at use.
    fn resolve_image_src(&self, target: &str) -> String {
        if target.starts_with('/') || target.contains("://") {
            return target.to_string();
        }
        match self
            .attributes
            .get("imagesdir")
            .and_then(AttributeValue::resolved)
        {
            Some(dir) if !dir.is_empty() => {
                format!("{}/{}", dir.trim_end_matches('/'), target)
            }
            _ => target.to_string(),
        }
    }

    fn expand_macro(&mut self, call: &MacroCall) -> Result<()> {
        let handler = self
            .macros
            .get(&call.name)
            .ok_or_else(|| ProcessorError::UnknownMacro(call.name.clone()))?;
        let block = handler.expand(&call.target, &call.attrs)?;
        self.render_block(&block)
    }

    fn render_inlines(&mut self, inlines: &[Inline]) {
        for inline in inlines {
            self.render_inline(inline);
        }
    }

    fn render_inline(&mut self, inline: &Inline) {
        match inline {
            Inline::Text(text) => self.output.push_str(&escape(text)),
            Inline::Format(format, inner) => {
                let tag = match format {
                    FormatType::Bold => "strong",
                    FormatType::Italic => "em",
                    FormatType::Monospace => "code",
                };
                write!(self.output, "<{}>", tag).unwrap();
                self.render_inline(inner);
                write!(self.output, "</{}>", tag).unwrap();
            }
        }
    }
}

/// Escape text for HTML content and attribute values
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
