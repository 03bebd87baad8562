//! Terminal rendering for documents, item rows and toasts.

use crate::document::{Align, Block, Document, Resource, Span, SpanStyle};
use crate::formatting::{FormatContext, TimeFormatter};
use crate::item::{Bookmark, Item, Note};
use crate::shared::table::truncate_with_ellipsis;
use crate::toast::{Toast, ToastKind};
use yansi::{Paint, Style};

const PREVIEW_LEN: usize = 72;

/// Render a document for the terminal. Alignment is applied against
/// `width` columns; color is dropped when the context disables it.
pub fn render_document(doc: &Document, ctx: &FormatContext, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    for block in &doc.blocks {
        match block {
            Block::Paragraph { align, spans } => {
                let text: String = spans.iter().map(|s| s.text.as_str()).collect();
                let painted: String = spans.iter().map(|s| paint_span(s, ctx.use_color)).collect();
                let painted_lines: Vec<&str> = painted.split('\n').collect();
                for (plain, styled) in text.split('\n').zip(painted_lines) {
                    lines.push(align_line(styled, plain.chars().count(), *align, width));
                }
            }
            Block::Image(resource) => {
                let label = image_label(resource);
                lines.push(if ctx.use_color { ctx.format_muted(&label) } else { label });
            }
        }
    }
    lines.join("\n")
}

fn paint_span(span: &Span, use_color: bool) -> String {
    if !use_color || span.style == SpanStyle::default() {
        return span.text.clone();
    }
    // Styles are applied per line so a reset lands before every newline.
    span.text
        .split('\n')
        .map(|part| part.paint(span_style(&span.style)).to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn span_style(style: &SpanStyle) -> Style {
    let mut out = Style::new();
    if style.bold {
        out = out.bold();
    }
    if style.italic {
        out = out.italic();
    }
    if style.underline {
        out = out.underline();
    }
    if let Some(c) = style.color {
        out = out.fg(yansi::Color::Rgb(c.r, c.g, c.b));
    }
    out
}

fn align_line(styled: &str, plain_len: usize, align: Align, width: usize) -> String {
    let pad = width.saturating_sub(plain_len);
    match align {
        Align::Left => styled.to_string(),
        Align::Center => format!("{}{}", " ".repeat(pad / 2), styled),
        Align::Right => format!("{}{}", " ".repeat(pad), styled),
    }
}

pub fn image_label(resource: &Resource) -> String {
    format!("[image: {}, {}]", resource.mime, human_size(resource.data.len()))
}

fn human_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// One list line: id, flags, age, title, preview, tags.
pub fn item_row<T: Item>(
    item: &T,
    ctx: &FormatContext,
    times: &TimeFormatter,
    query: Option<&str>,
) -> String {
    let title = ctx.highlight_match(item.display_title(), query);
    let preview = truncate_with_ellipsis(&item.preview(), PREVIEW_LEN);
    let mut line = format!(
        "{} {} {} {}",
        ctx.format_id(item.id()),
        ctx.format_flags(item.is_pinned(), item.is_favorite()),
        ctx.format_timestamp(&times.format(item.updated_at())),
        ctx.format_header(&title),
    );
    if !preview.is_empty() {
        line.push_str("  ");
        line.push_str(&ctx.format_muted(&ctx.highlight_match(&preview, query)));
    }
    if !item.tags().is_empty() {
        line.push_str("  ");
        line.push_str(&ctx.format_tags(item.tags()));
    }
    line
}

/// A list with pinned items grouped on top.
pub fn render_list<T: Item>(
    pinned: &[&T],
    rest: &[&T],
    ctx: &FormatContext,
    times: &TimeFormatter,
    query: Option<&str>,
) -> Vec<String> {
    let mut out = Vec::new();
    if !pinned.is_empty() {
        out.push(ctx.format_header("Pinned"));
        out.extend(pinned.iter().map(|i| item_row(*i, ctx, times, query)));
        if !rest.is_empty() {
            out.push(String::new());
            out.push(ctx.format_header(&format!("All {}", T::KIND.view_name())));
        }
    }
    out.extend(rest.iter().map(|i| item_row(*i, ctx, times, query)));
    out
}

fn header_lines<T: Item>(item: &T, ctx: &FormatContext, times: &TimeFormatter) -> Vec<String> {
    let mut out = vec![format!("# {} ({})", ctx.format_header(item.display_title()), ctx.format_id(item.id()))];
    out.push(format!(
        "Created: {}",
        ctx.format_timestamp(&times.format_absolute(item.created_at()))
    ));
    out.push(format!(
        "Updated: {}",
        ctx.format_timestamp(&times.format_absolute(item.updated_at()))
    ));
    let mut flags = Vec::new();
    if item.is_pinned() {
        flags.push("pinned");
    }
    if item.is_favorite() {
        flags.push("favorite");
    }
    if !flags.is_empty() {
        out.push(format!("Flags: {}", flags.join(", ")));
    }
    if !item.tags().is_empty() {
        out.push(format!("Tags: {}", ctx.format_tags(item.tags())));
    }
    out
}

/// Word count with reading time at 200 words per minute, rounded up.
fn word_stats(words: usize) -> String {
    format!("{words} words, {} min read", words.div_ceil(200))
}

pub fn render_note(note: &Note, ctx: &FormatContext, times: &TimeFormatter, width: usize) -> String {
    let doc = note.document();
    let mut out = header_lines(note, ctx, times);
    out.push(ctx.format_muted(&word_stats(doc.word_count())));
    out.push(String::new());
    out.push(render_document(&doc, ctx, width));
    out.join("\n")
}

pub fn render_bookmark(bookmark: &Bookmark, ctx: &FormatContext, times: &TimeFormatter) -> String {
    let mut out = header_lines(bookmark, ctx, times);
    out.push(format!("URL: {}", ctx.format_link(&bookmark.url)));
    out.push(String::new());
    if !bookmark.description.trim().is_empty() {
        out.push(bookmark.description.clone());
    }
    out.join("\n")
}

pub fn render_toast(toast: &Toast, ctx: &FormatContext) -> String {
    let icon = match toast.kind {
        ToastKind::Success => "ok",
        ToastKind::Info => "i",
        ToastKind::Delete => "x",
    };
    let secs = toast.remaining.div_ceil(1000);
    let mut line = format!("[{}] {} {}", toast.id, icon, toast.message);
    if toast.has_undo() {
        line.push_str(&format!(" (undo {} within {secs}s)", toast.id));
    }
    match toast.kind {
        ToastKind::Delete => ctx.format_danger(&line),
        _ => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Color;
    use crate::item::{Item, NoteDraft};
    use crate::repository::Removal;
    use crate::toast::{ToastQueue, UndoAction};

    fn plain() -> FormatContext {
        FormatContext::new(false)
    }

    fn doc_with(align: Align, text: &str) -> Document {
        let mut doc = Document::default();
        doc.push_paragraph(align, vec![Span::plain(text)]);
        doc
    }

    #[test]
    fn alignment_pads_against_width() {
        assert_eq!(render_document(&doc_with(Align::Center, "abcd"), &plain(), 10), "   abcd");
        assert_eq!(render_document(&doc_with(Align::Right, "abcd"), &plain(), 10), "      abcd");
        assert_eq!(render_document(&doc_with(Align::Left, "abcd"), &plain(), 10), "abcd");
    }

    #[test]
    fn styled_spans_only_colored_when_enabled() {
        let style = SpanStyle {
            bold: true,
            color: Some(Color { r: 1, g: 2, b: 3 }),
            ..Default::default()
        };
        let mut doc = Document::default();
        doc.push_paragraph(Align::Left, vec![Span::plain("a "), Span::styled("b", style)]);
        assert_eq!(render_document(&doc, &plain(), 80), "a b");
        let colored = render_document(&doc, &FormatContext::new(true), 80);
        assert!(colored.contains('\u{1b}'));
        assert!(colored.contains("a "));
    }

    #[test]
    fn images_render_as_placeholders() {
        let mut doc = Document::default();
        doc.push_image(Resource { mime: "image/png".into(), data: vec![0; 2048] });
        assert_eq!(render_document(&doc, &plain(), 80), "[image: image/png, 2.0 KB]");
    }

    #[test]
    fn row_starts_with_id() {
        let mut note = Note::create(
            "abc".into(),
            NoteDraft {
                title: "Title".into(),
                content: "<p>first line</p>".into(),
                tags: vec!["x".into()],
            },
            0,
        );
        note.is_pinned = true;
        let times = TimeFormatter::new(true, 0);
        let row = item_row(&note, &plain(), &times, None);
        assert_eq!(row, "abc ^  just now Title  first line  #x");
    }

    #[test]
    fn list_groups_pinned_first() {
        let a = Note::create("a".into(), NoteDraft::default(), 0);
        let mut b = Note::create("b".into(), NoteDraft::default(), 0);
        b.is_pinned = true;
        let times = TimeFormatter::new(true, 0);
        let lines = render_list(&[&b], &[&a], &plain(), &times, None);
        assert_eq!(lines[0], "Pinned");
        assert!(lines[1].starts_with("b "));
        assert_eq!(lines[3], "All notes");
        assert!(lines[4].starts_with("a "));
    }

    #[test]
    fn note_view_shows_reading_time() {
        assert_eq!(word_stats(0), "0 words, 0 min read");
        assert_eq!(word_stats(200), "200 words, 1 min read");
        assert_eq!(word_stats(201), "201 words, 2 min read");

        let note = Note::create(
            "r".into(),
            NoteDraft { title: "Read".into(), content: "<p>two words</p>".into(), tags: vec![] },
            0,
        );
        let times = TimeFormatter::new(true, 0);
        let view = render_note(&note, &plain(), &times, 80);
        assert!(view.lines().any(|l| l == "2 words, 1 min read"));
    }

    #[test]
    fn toast_line_mentions_undo() {
        let note = Note::create("n".into(), NoteDraft::default(), 0);
        let mut q = ToastQueue::new(5_000);
        let undo = UndoAction::Note(Removal { item: note.clone(), index: 0, snapshot: vec![note] });
        let toast = q.push("Note \"Untitled\" deleted", ToastKind::Delete, Some(undo)).clone();
        assert_eq!(
            render_toast(&toast, &plain()),
            "[1] x Note \"Untitled\" deleted (undo 1 within 5s)"
        );
    }
}
