//! Rich-text document model for note content.
//!
//! A document is an ordered list of blocks: paragraphs made of styled spans,
//! and embedded images carried inline as bytes. Notes store the HTML form
//! produced by [`Document::to_html`]; [`Document::from_html`] reads that form
//! back as well as the looser markup older editors produced. New content is
//! usually written as markdown and converted with [`Document::from_markdown`].

use crate::error::DocumentError;
use base64::Engine as _;
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use std::cell::RefCell;
use std::fmt::Write as _;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "start" | "justify" => Some(Self::Left),
            "center" | "centre" => Some(Self::Center),
            "right" | "end" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Accepts `#rgb`, `#rrggbb` and `rgb(r, g, b)`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return match hex.len() {
                3 => {
                    let mut parts = hex.chars().map(|c| c.to_digit(16));
                    let r = parts.next()??;
                    let g = parts.next()??;
                    let b = parts.next()??;
                    Some(Self { r: (r * 17) as u8, g: (g * 17) as u8, b: (b * 17) as u8 })
                }
                6 => Some(Self {
                    r: u8::from_str_radix(hex.get(0..2)?, 16).ok()?,
                    g: u8::from_str_radix(hex.get(2..4)?, 16).ok()?,
                    b: u8::from_str_radix(hex.get(4..6)?, 16).ok()?,
                }),
                _ => None,
            };
        }
        let inner = s.strip_prefix("rgb(")?.strip_suffix(')')?;
        let mut channels = inner.split(',').map(|c| c.trim().parse::<u8>().ok());
        let color = Self {
            r: channels.next()??,
            g: channels.next()??,
            b: channels.next()??,
        };
        if channels.next().is_some() {
            return None;
        }
        Some(color)
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpanStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), style: SpanStyle::default() }
    }

    pub fn styled(text: impl Into<String>, style: SpanStyle) -> Self {
        Self { text: text.into(), style }
    }
}

/// An embedded binary resource (images only, for now).
#[derive(Clone, PartialEq, Eq)]
pub struct Resource {
    pub mime: String,
    pub data: Vec<u8>,
}

impl std::fmt::Debug for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("mime", &self.mime)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl Resource {
    /// Read an image file and embed it. The mime type comes from the extension.
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let mime = mime_for_extension(&ext)
            .ok_or_else(|| DocumentError::UnsupportedImage(path.display().to_string()))?;
        let data = std::fs::read(path).map_err(|source| DocumentError::ImageRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { mime: mime.to_string(), data })
    }

    /// Decode a base64 `data:` URL. Anything else yields `None`.
    pub fn from_data_url(url: &str) -> Option<Self> {
        let rest = url.trim().strip_prefix("data:")?;
        let (meta, payload) = rest.split_once(',')?;
        let mime = meta.strip_suffix(";base64")?;
        if !mime.starts_with("image/") {
            return None;
        }
        let data = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .ok()?;
        Some(Self { mime: mime.to_string(), data })
    }

    pub fn to_data_url(&self) -> String {
        let b64 = base64::engine::general_purpose::STANDARD.encode(&self.data);
        format!("data:{};base64,{b64}", self.mime)
    }
}

fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph { align: Align, spans: Vec<Span> },
    Image(Resource),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn push_paragraph(&mut self, align: Align, spans: Vec<Span>) {
        self.blocks.push(Block::Paragraph { align, spans });
    }

    pub fn push_image(&mut self, resource: Resource) {
        self.blocks.push(Block::Image(resource));
    }

    /// Apply one alignment to every paragraph.
    pub fn align_paragraphs(&mut self, align: Align) {
        for block in &mut self.blocks {
            if let Block::Paragraph { align: a, .. } = block {
                *a = align;
            }
        }
    }

    pub fn images(&self) -> impl Iterator<Item = &Resource> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Image(r) => Some(r),
            Block::Paragraph { .. } => None,
        })
    }

    /// Text content with one line per paragraph; images are skipped.
    pub fn plain_text(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        for block in &self.blocks {
            if let Block::Paragraph { spans, .. } = block {
                lines.push(spans.iter().map(|s| s.text.as_str()).collect());
            }
        }
        lines.join("\n")
    }

    pub fn word_count(&self) -> usize {
        self.plain_text().split_whitespace().count()
    }

    /// Build a document from markdown. Image destinations go through
    /// `resolve`, which turns a path (or data URL) into embedded bytes.
    pub fn from_markdown<F>(input: &str, mut resolve: F) -> Result<Self, DocumentError>
    where
        F: FnMut(&str) -> Result<Resource, DocumentError>,
    {
        let mut builder = Builder::default();
        let mut list_depth: usize = 0;
        let mut in_image = false;

        for event in Parser::new(input) {
            match event {
                Event::End(TagEnd::Paragraph) => builder.end_block(),
                Event::Start(Tag::Heading { .. }) => {
                    builder.end_block();
                    builder.push_style("h", |s| s.bold = true);
                }
                Event::End(TagEnd::Heading(_)) => {
                    builder.pop_style("h");
                    builder.end_block();
                }
                Event::Start(Tag::Strong) => builder.push_style("strong", |s| s.bold = true),
                Event::End(TagEnd::Strong) => builder.pop_style("strong"),
                Event::Start(Tag::Emphasis) => builder.push_style("em", |s| s.italic = true),
                Event::End(TagEnd::Emphasis) => builder.pop_style("em"),
                Event::Start(Tag::List(_)) => {
                    builder.end_block();
                    list_depth += 1;
                }
                Event::End(TagEnd::List(_)) => list_depth = list_depth.saturating_sub(1),
                Event::Start(Tag::Item) => {
                    builder.end_block();
                    let indent = "  ".repeat(list_depth.saturating_sub(1));
                    builder.push_text(&format!("{indent}• "));
                }
                Event::End(TagEnd::Item) => builder.end_block(),
                Event::End(TagEnd::CodeBlock) | Event::End(TagEnd::BlockQuote) => {
                    builder.end_block()
                }
                Event::Start(Tag::Image { dest_url, .. }) => {
                    in_image = true;
                    let resource = match Resource::from_data_url(&dest_url) {
                        Some(resource) => resource,
                        None => resolve(&*dest_url)?,
                    };
                    builder.push_image(resource);
                }
                Event::End(TagEnd::Image) => in_image = false,
                Event::Text(text) | Event::Code(text) => {
                    if !in_image {
                        builder.push_text(&text);
                    }
                }
                Event::SoftBreak => builder.push_text(" "),
                Event::HardBreak => builder.line_break(),
                Event::Html(html) | Event::InlineHtml(html) => {
                    apply_html(&mut builder, &html);
                }
                _ => {}
            }
        }

        Ok(builder.finish())
    }

    /// Read HTML markup. Unknown tags are dropped but their text is kept.
    pub fn from_html(input: &str) -> Self {
        let mut builder = Builder::default();
        apply_html(&mut builder, input);
        builder.finish()
    }

    /// Serialize to the HTML subset stored in `Note::content`.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            match block {
                Block::Paragraph { align, spans } => {
                    if *align == Align::Left {
                        out.push_str("<p>");
                    } else {
                        let _ = write!(out, "<p style=\"text-align: {}\">", align.as_css());
                    }
                    for span in spans {
                        push_span_html(&mut out, span);
                    }
                    out.push_str("</p>");
                }
                Block::Image(resource) => {
                    let _ = write!(
                        out,
                        "<img src=\"{}\" class=\"editor-image\" />",
                        resource.to_data_url()
                    );
                }
            }
        }
        out
    }
}

fn push_span_html(out: &mut String, span: &Span) {
    let style = span.style;
    if style.bold {
        out.push_str("<b>");
    }
    if style.italic {
        out.push_str("<i>");
    }
    if style.underline {
        out.push_str("<u>");
    }
    if let Some(color) = style.color {
        let _ = write!(out, "<span style=\"color: {}\">", color.to_hex());
    }
    for (idx, line) in span.text.split('\n').enumerate() {
        if idx > 0 {
            out.push_str("<br>");
        }
        out.push_str(&escape_html(line));
    }
    if style.color.is_some() {
        out.push_str("</span>");
    }
    if style.underline {
        out.push_str("</u>");
    }
    if style.italic {
        out.push_str("</i>");
    }
    if style.bold {
        out.push_str("</b>");
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Accumulates spans into blocks while tracking nested inline styles.
#[derive(Default)]
struct Builder {
    blocks: Vec<Block>,
    spans: Vec<Span>,
    align: Align,
    styles: Vec<(String, SpanStyle)>,
}

impl Builder {
    fn current_style(&self) -> SpanStyle {
        self.styles.last().map(|(_, s)| *s).unwrap_or_default()
    }

    fn push_style(&mut self, tag: &str, modify: impl FnOnce(&mut SpanStyle)) {
        let mut style = self.current_style();
        modify(&mut style);
        self.styles.push((tag.to_string(), style));
    }

    fn pop_style(&mut self, tag: &str) {
        if let Some(idx) = self.styles.iter().rposition(|(t, _)| t == tag) {
            self.styles.truncate(idx);
        }
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let style = self.current_style();
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.spans.push(Span::styled(text, style)),
        }
    }

    fn line_break(&mut self) {
        self.push_text("\n");
    }

    fn end_block(&mut self) {
        if !self.spans.is_empty() {
            let spans = std::mem::take(&mut self.spans);
            self.blocks.push(Block::Paragraph { align: self.align, spans });
        }
        self.align = Align::Left;
    }

    fn push_image(&mut self, resource: Resource) {
        let align = self.align;
        self.end_block();
        self.blocks.push(Block::Image(resource));
        self.align = align;
    }

    fn finish(mut self) -> Document {
        self.end_block();
        Document { blocks: self.blocks }
    }
}

/// Markup events collected by [`MarkupSink`].
#[derive(Debug, PartialEq, Eq)]
enum Markup {
    Open { name: String, attrs: Vec<(String, String)> },
    Close(String),
    Text(String),
}

/// Collects tokens from the html5ever tokenizer. Entity decoding and tag
/// name case folding happen in the tokenizer.
#[derive(Default)]
struct MarkupSink {
    events: RefCell<Vec<Markup>>,
}

impl TokenSink for MarkupSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(tag) => {
                let name = tag.name.to_string();
                match tag.kind {
                    TagKind::StartTag => {
                        let attrs = tag
                            .attrs
                            .iter()
                            .map(|a| (a.name.local.to_string(), a.value.to_string()))
                            .collect();
                        let raw = match name.as_str() {
                            _ if tag.self_closing => None,
                            "script" => Some(RawKind::ScriptData),
                            "style" => Some(RawKind::Rawtext),
                            "title" | "textarea" => Some(RawKind::Rcdata),
                            _ => None,
                        };
                        self.events.borrow_mut().push(Markup::Open { name, attrs });
                        if let Some(kind) = raw {
                            return TokenSinkResult::RawData(kind);
                        }
                    }
                    TagKind::EndTag => self.events.borrow_mut().push(Markup::Close(name)),
                }
            }
            Token::CharacterTokens(text) => {
                self.events.borrow_mut().push(Markup::Text(text.to_string()));
            }
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

fn tokenize(input: &str) -> Vec<Markup> {
    let tokenizer = Tokenizer::new(MarkupSink::default(), TokenizerOpts::default());
    let queue = BufferQueue::default();
    queue.push_back(StrTendril::from(input));
    let _ = tokenizer.feed(&queue);
    tokenizer.end();
    tokenizer.sink.events.into_inner()
}

fn attr<'a>(attrs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    attrs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

/// Look up one property in an inline `style` attribute.
fn style_prop<'a>(attrs: &'a [(String, String)], prop: &str) -> Option<&'a str> {
    attr(attrs, "style")?.split(';').find_map(|decl| {
        let (k, v) = decl.split_once(':')?;
        k.trim().eq_ignore_ascii_case(prop).then(|| v.trim())
    })
}

/// Elements whose text is never part of the note.
const HIDDEN: &[&str] = &["script", "style", "title", "head", "textarea"];

fn apply_html(builder: &mut Builder, input: &str) {
    let mut hidden: Vec<String> = Vec::new();
    for event in tokenize(input) {
        match event {
            Markup::Open { name, .. } if HIDDEN.contains(&name.as_str()) => hidden.push(name),
            Markup::Close(name) if hidden.last() == Some(&name) => {
                hidden.pop();
            }
            _ if !hidden.is_empty() => {}
            Markup::Text(text) => {
                let text = text.replace(['\n', '\r', '\t', '\u{a0}'], " ");
                builder.push_text(&text);
            }
            Markup::Open { name, attrs } => match name.as_str() {
                "p" | "div" => {
                    builder.end_block();
                    let align = style_prop(&attrs, "text-align")
                        .or_else(|| attr(&attrs, "align"))
                        .and_then(Align::parse)
                        .unwrap_or_default();
                    builder.align = align;
                }
                "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                    builder.end_block();
                    builder.push_style(&name, |s| s.bold = true);
                }
                "li" => {
                    builder.end_block();
                    builder.push_text("• ");
                }
                "br" => builder.line_break(),
                "b" | "strong" => builder.push_style(&name, |s| s.bold = true),
                "i" | "em" => builder.push_style(&name, |s| s.italic = true),
                "u" => builder.push_style(&name, |s| s.underline = true),
                "font" => {
                    let color = attr(&attrs, "color").and_then(Color::parse);
                    builder.push_style(&name, |s| {
                        if color.is_some() {
                            s.color = color;
                        }
                    });
                }
                "span" => {
                    let color = style_prop(&attrs, "color").and_then(Color::parse);
                    let bold = style_prop(&attrs, "font-weight")
                        .is_some_and(|w| w == "bold" || w == "700");
                    builder.push_style(&name, |s| {
                        if color.is_some() {
                            s.color = color;
                        }
                        s.bold |= bold;
                    });
                }
                "img" => match attr(&attrs, "src").and_then(Resource::from_data_url) {
                    Some(resource) => builder.push_image(resource),
                    None => log::debug!("Skipping image without inline data"),
                },
                _ => {}
            },
            Markup::Close(name) => match name.as_str() {
                "p" | "div" | "li" => builder.end_block(),
                "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                    builder.pop_style(&name);
                    builder.end_block();
                }
                "b" | "strong" | "i" | "em" | "u" | "font" | "span" => builder.pop_style(&name),
                _ => {}
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_images(dest: &str) -> Result<Resource, DocumentError> {
        Err(DocumentError::UnsupportedImage(dest.to_string()))
    }

    fn bold() -> SpanStyle {
        SpanStyle { bold: true, ..Default::default() }
    }

    #[test]
    fn markdown_paragraphs_and_styles() {
        let doc = Document::from_markdown("Hello **bold** and *it*\n\nSecond", no_images).unwrap();
        assert_eq!(doc.blocks.len(), 2);
        let Block::Paragraph { spans, .. } = &doc.blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(spans[0], Span::plain("Hello "));
        assert_eq!(spans[1], Span::styled("bold", bold()));
        assert!(spans[3].style.italic);
        assert_eq!(doc.plain_text(), "Hello bold and it\nSecond");
    }

    #[test]
    fn markdown_inline_html_underline_and_color() {
        let doc = Document::from_markdown(
            "a <u>line</u> <span style=\"color:#ff0000\">red</span>",
            no_images,
        )
        .unwrap();
        let Block::Paragraph { spans, .. } = &doc.blocks[0] else {
            panic!("expected paragraph");
        };
        assert!(spans.iter().any(|s| s.text == "line" && s.style.underline));
        assert!(spans
            .iter()
            .any(|s| s.text == "red" && s.style.color == Some(Color { r: 255, g: 0, b: 0 })));
    }

    #[test]
    fn markdown_images_use_resolver() {
        let doc = Document::from_markdown("before\n\n![cat](cat.png)\n\nafter", |dest| {
            assert_eq!(dest, "cat.png");
            Ok(Resource { mime: "image/png".into(), data: vec![1, 2, 3] })
        })
        .unwrap();
        assert_eq!(doc.images().count(), 1);
        assert_eq!(doc.plain_text(), "before\nafter");
    }

    #[test]
    fn markdown_unresolvable_image_is_an_error() {
        let err = Document::from_markdown("![x](notes.txt)", no_images).unwrap_err();
        assert!(matches!(err, DocumentError::UnsupportedImage(_)));
    }

    #[test]
    fn markdown_lists_become_bullets() {
        let doc = Document::from_markdown("- one\n- two", no_images).unwrap();
        assert_eq!(doc.plain_text(), "• one\n• two");
    }

    #[test]
    fn html_roundtrip_preserves_model() {
        let mut doc = Document::default();
        doc.push_paragraph(
            Align::Center,
            vec![
                Span::plain("Title & <stuff>\nline two"),
                Span::styled("bold", bold()),
                Span::styled(
                    "colored",
                    SpanStyle {
                        italic: true,
                        underline: true,
                        color: Some(Color { r: 1, g: 2, b: 3 }),
                        ..Default::default()
                    },
                ),
            ],
        );
        doc.push_image(Resource { mime: "image/png".into(), data: vec![137, 80, 78, 71] });
        doc.push_paragraph(Align::Right, vec![Span::plain("end")]);

        let html = doc.to_html();
        assert!(html.contains("text-align: center"));
        assert!(html.contains("data:image/png;base64,"));
        assert_eq!(Document::from_html(&html), doc);
    }

    #[test]
    fn html_reads_legacy_editor_markup() {
        let html = "<div style=\"text-align: right\">Hi <font color=\"#00ff00\">green</font></div>\
                    <h2>Head</h2>text&nbsp;tail &amp; more<br>next<!-- note -->";
        let doc = Document::from_html(html);
        assert_eq!(doc.plain_text(), "Hi green\nHead\ntext tail & more\nnext");
        let Block::Paragraph { align, spans } = &doc.blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(*align, Align::Right);
        assert_eq!(spans[1].style.color, Some(Color { r: 0, g: 255, b: 0 }));
        let Block::Paragraph { spans, .. } = &doc.blocks[1] else {
            panic!("expected heading paragraph");
        };
        assert!(spans[0].style.bold);
    }

    #[test]
    fn html_handles_stray_angle_brackets() {
        let doc = Document::from_html("1 < 2 and 3 > 2");
        assert_eq!(doc.plain_text(), "1 < 2 and 3 > 2");
    }

    #[test]
    fn html_decodes_named_entities_and_skips_styles() {
        let doc = Document::from_html(
            "<p>caf&eacute; &mdash; ok</p><style>.x{color:red}</style><script>alert('<p>')</script>",
        );
        assert_eq!(doc.plain_text(), "café — ok");
    }

    #[test]
    fn plain_string_content_is_one_paragraph() {
        let doc = Document::from_html("just words");
        assert_eq!(doc.blocks.len(), 1);
        assert_eq!(doc.word_count(), 2);
    }

    #[test]
    fn color_parse_variants() {
        assert_eq!(Color::parse("#fff"), Some(Color { r: 255, g: 255, b: 255 }));
        assert_eq!(Color::parse("#102030"), Some(Color { r: 16, g: 32, b: 48 }));
        assert_eq!(Color::parse("rgb(1, 2, 3)"), Some(Color { r: 1, g: 2, b: 3 }));
        assert_eq!(Color::parse("red"), None);
        assert_eq!(Color { r: 16, g: 32, b: 48 }.to_hex(), "#102030");
    }

    #[test]
    fn data_url_requires_image_mime() {
        assert!(Resource::from_data_url("data:text/plain;base64,aGk=").is_none());
        let r = Resource::from_data_url("data:image/gif;base64,R0lG").unwrap();
        assert_eq!(r.mime, "image/gif");
        assert_eq!(r.data, b"GIF");
    }

    #[test]
    fn resource_from_path_checks_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let png = tmp.path().join("pic.PNG");
        std::fs::write(&png, [1u8, 2, 3]).unwrap();
        let r = Resource::from_path(&png).unwrap();
        assert_eq!(r.mime, "image/png");

        let txt = tmp.path().join("notes.txt");
        std::fs::write(&txt, "x").unwrap();
        assert!(matches!(
            Resource::from_path(&txt),
            Err(DocumentError::UnsupportedImage(_))
        ));
    }

    #[test]
    fn align_paragraphs_updates_every_paragraph() {
        let mut doc = Document::from_html("<p>a</p><p>b</p>");
        doc.align_paragraphs(Align::Center);
        assert!(doc
            .blocks
            .iter()
            .all(|b| matches!(b, Block::Paragraph { align: Align::Center, .. })));
    }
}
