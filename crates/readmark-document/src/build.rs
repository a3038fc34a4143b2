//! Tree construction from markdown content.
//!
//! This module builds a [`Document`] from markdown by walking the `pulldown_cmark` event
//! stream. Block and inline constructs become elements; raw HTML is tokenized so that
//! embedded tags such as `<script>`, `<textarea>` or `<div contenteditable>` produce real
//! elements in the tree.

use std::mem;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};

use crate::{
    Document,
    html::{RAW_TEXT_TAGS, Token, VOID_TAGS, decode_entities, next_token},
    node::{Element, NodeId},
};

/// Where an open element came from, which decides how it may be closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    /// Opened by a markdown start event; closed by the matching end event.
    Markdown,
    /// Opened by a raw HTML tag; closed by a matching HTML end tag or by its markdown parent.
    Html,
}

/// An entry on the open-element stack.
#[derive(Debug, Clone, Copy)]
struct Frame {
    /// The element that receives children while this frame is on top.
    node: NodeId,
    /// How the frame was opened.
    origin: Origin,
}

/// Incremental document builder driven by parser events.
struct TreeBuilder {
    /// The document under construction.
    doc: Document,
    /// Open elements, innermost last. The bottom frame is the document root.
    stack: Vec<Frame>,
    /// Raw HTML not yet tokenized (an incomplete tag at the end of an event).
    html_buf: String,
    /// Tag whose raw-text content is being collected (`script`, `style`, ...).
    raw_text: Option<String>,
    /// Image element collecting its alt text.
    image: Option<PendingImage>,
}

/// An image whose alt text is still being read.
#[derive(Debug)]
struct PendingImage {
    /// The `img` element.
    node: NodeId,
    /// Alt text collected so far.
    alt: String,
    /// Stack depth of the image's own frame.
    depth: usize,
}

impl TreeBuilder {
    /// Creates a builder with an empty document.
    fn new() -> Self {
        let doc = Document::new();
        let root = doc.root();
        Self {
            doc,
            stack: vec![Frame {
                node: root,
                origin: Origin::Markdown,
            }],
            html_buf: String::new(),
            raw_text: None,
            image: None,
        }
    }

    /// Returns the element currently receiving children.
    fn current(&self) -> NodeId {
        self.stack.last().map_or(self.doc.root(), |f| f.node)
    }

    /// Appends a freshly created node to the current element.
    fn attach(&mut self, child: NodeId) {
        let parent = self.current();
        self.doc
            .append_child(parent, child)
            .expect("fresh nodes can always be appended to an open element");
    }

    /// Opens an element and makes it current.
    fn open(&mut self, element: Element, origin: Origin) {
        let node = self.doc.create_element(element);
        self.attach(node);
        self.stack.push(Frame { node, origin });
    }

    /// Pushes a frame that reuses the current element (for constructs without a tag).
    fn open_transparent(&mut self) {
        let node = self.current();
        self.stack.push(Frame {
            node,
            origin: Origin::Markdown,
        });
    }

    /// Appends a childless element.
    fn void(&mut self, element: Element) {
        let node = self.doc.create_element(element);
        self.attach(node);
    }

    /// Appends text, merging with a preceding text sibling.
    fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(image) = &mut self.image {
            image.alt.push_str(text);
            return;
        }
        let parent = self.current();
        if let Some(&last) = self.doc.children(parent).last()
            && let Some(existing) = self.doc.text(last)
        {
            let merged = format!("{existing}{text}");
            self.doc
                .set_text(last, merged)
                .expect("last child was checked to be text");
            return;
        }
        let node = self.doc.create_text(text);
        self.attach(node);
    }

    /// Closes the innermost markdown frame, along with any HTML frames left open inside it.
    fn close_markdown(&mut self) {
        self.flush_html();
        while self.stack.len() > 1 {
            if let Some(frame) = self.stack.pop()
                && frame.origin == Origin::Markdown
            {
                break;
            }
        }
    }

    /// Closes the nearest open HTML element named `name`, if it is above the innermost
    /// markdown frame. Stray end tags are ignored.
    fn close_html(&mut self, name: &str) {
        let found = self
            .stack
            .iter()
            .rposition(|f| {
                f.origin == Origin::Markdown
                    || self.doc.element(f.node).is_some_and(|el| el.tag == name)
            })
            .filter(|&i| self.stack[i].origin == Origin::Html);
        if let Some(idx) = found {
            self.stack.truncate(idx);
        }
    }

    /// Feeds a chunk of raw HTML.
    fn html(&mut self, raw: &str) {
        self.html_buf.push_str(raw);
        let buf = mem::take(&mut self.html_buf);
        let mut rest = buf.as_str();

        loop {
            if let Some(tag) = self.raw_text.clone() {
                let closing = format!("</{tag}");
                match find_ascii_case_insensitive(rest, &closing) {
                    Some(end) => {
                        self.text(&rest[..end]);
                        rest = &rest[end..];
                        self.raw_text = None;
                    }
                    None => {
                        self.text(rest);
                        rest = "";
                        break;
                    }
                }
            }

            let Some((token, consumed)) = next_token(rest) else {
                break;
            };
            rest = &rest[consumed..];
            match token {
                Token::Text(text) => self.text(&decode_entities(text)),
                Token::Start {
                    name,
                    attrs,
                    self_closing,
                } => {
                    let element = attrs
                        .into_iter()
                        .fold(Element::new(name.as_str()), |el, (k, v)| el.with_attr(k, v));
                    if self_closing || VOID_TAGS.contains(&name.as_str()) {
                        self.void(element);
                    } else {
                        self.open(element, Origin::Html);
                        if RAW_TEXT_TAGS.contains(&name.as_str()) {
                            self.raw_text = Some(name);
                        }
                    }
                }
                Token::End { name } => self.close_html(&name),
                Token::Ignored => {}
            }
        }

        self.html_buf = rest.to_string();
    }

    /// Emits any buffered partial HTML as text.
    fn flush_html(&mut self) {
        if !self.html_buf.is_empty() {
            let leftover = mem::take(&mut self.html_buf);
            self.text(&leftover);
        }
    }

    /// Handles a markdown start tag.
    fn start(&mut self, tag: Tag<'_>) {
        self.flush_html();
        if self.image.is_some() {
            // Markup inside alt text only contributes its text.
            self.open_transparent();
            return;
        }
        match tag {
            Tag::Paragraph => self.open(Element::new("p"), Origin::Markdown),
            Tag::Heading { level, .. } => {
                self.open(Element::new(heading_tag(level)), Origin::Markdown);
            }
            Tag::BlockQuote(_) => self.open(Element::new("blockquote"), Origin::Markdown),
            Tag::CodeBlock(kind) => {
                self.open(Element::new("pre"), Origin::Markdown);
                let code = match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => {
                        Element::new("code").with_attr("class", format!("language-{lang}"))
                    }
                    _ => Element::new("code"),
                };
                // The code element shares the pre's frame.
                let node = self.doc.create_element(code);
                self.attach(node);
                if let Some(top) = self.stack.last_mut() {
                    top.node = node;
                }
            }
            Tag::List(Some(start)) => {
                let mut ol = Element::new("ol");
                if start != 1 {
                    ol = ol.with_attr("start", start.to_string());
                }
                self.open(ol, Origin::Markdown);
            }
            Tag::List(None) => self.open(Element::new("ul"), Origin::Markdown),
            Tag::Item => self.open(Element::new("li"), Origin::Markdown),
            Tag::Table(_) => self.open(Element::new("table"), Origin::Markdown),
            Tag::TableHead => self.open(Element::new("thead"), Origin::Markdown),
            Tag::TableRow => self.open(Element::new("tr"), Origin::Markdown),
            Tag::TableCell => self.open(Element::new("td"), Origin::Markdown),
            Tag::Emphasis => self.open(Element::new("em"), Origin::Markdown),
            Tag::Strong => self.open(Element::new("strong"), Origin::Markdown),
            Tag::Strikethrough => self.open(Element::new("del"), Origin::Markdown),
            Tag::Link { dest_url, .. } => self.open(
                Element::new("a").with_attr("href", dest_url.to_string()),
                Origin::Markdown,
            ),
            Tag::Image { dest_url, .. } => {
                let node = self
                    .doc
                    .create_element(Element::new("img").with_attr("src", dest_url.to_string()));
                self.attach(node);
                self.open_transparent();
                self.image = Some(PendingImage {
                    node,
                    alt: String::new(),
                    depth: self.stack.len(),
                });
            }
            _ => self.open_transparent(),
        }
    }

    /// Handles a markdown end tag.
    fn end(&mut self) {
        if self
            .image
            .as_ref()
            .is_some_and(|image| image.depth == self.stack.len())
            && let Some(image) = self.image.take()
            && let Some(el) = self.doc.element(image.node)
        {
            let with_alt = el.clone().with_attr("alt", image.alt);
            let fresh = self.doc.create_element(with_alt);
            self.doc
                .replace_with(image.node, &[fresh])
                .expect("image element is attached to its paragraph");
        }
        self.close_markdown();
    }

    /// Consumes the builder, returning the document with no pending mutation records.
    fn finish(mut self) -> Document {
        self.flush_html();
        self.doc.take_mutations();
        self.doc
    }
}

/// Maps a heading level to its tag name.
fn heading_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
}

/// Finds `needle` in `haystack` ignoring ASCII case.
fn find_ascii_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .char_indices()
        .map(|(i, _)| i)
        .find(|&i| {
            haystack
                .get(i..i + needle.len())
                .is_some_and(|s| s.eq_ignore_ascii_case(needle))
        })
}

/// Builds a document tree from markdown content.
///
/// The resulting document has no pending mutation records.
pub fn build_document(content: &str) -> Document {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let mut builder = TreeBuilder::new();

    for event in Parser::new_ext(content, options) {
        match event {
            Event::Start(tag) => builder.start(tag),
            Event::End(_) => builder.end(),
            Event::Text(text) => {
                builder.flush_html();
                builder.text(&text);
            }
            Event::Code(text) => {
                builder.flush_html();
                builder.open(Element::new("code"), Origin::Markdown);
                builder.text(&text);
                builder.close_markdown();
            }
            Event::Html(html) | Event::InlineHtml(html) => builder.html(&html),
            Event::SoftBreak => builder.text("\n"),
            Event::HardBreak => builder.void(Element::new("br")),
            Event::Rule => builder.void(Element::new("hr")),
            Event::TaskListMarker(checked) => {
                let mut input = Element::new("input")
                    .with_attr("type", "checkbox")
                    .with_attr("disabled", "");
                if checked {
                    input = input.with_attr("checked", "");
                }
                builder.void(input);
            }
            Event::FootnoteReference(label) => builder.text(&format!("[{label}]")),
            _ => {}
        }
    }

    builder.finish()
}

/// Builds a document from plain text: one paragraph per non-blank line.
pub fn build_text_document(content: &str) -> Document {
    let mut builder = TreeBuilder::new();
    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        builder.open(Element::new("p"), Origin::Markdown);
        builder.text(line);
        builder.close_markdown();
    }
    builder.finish()
}
