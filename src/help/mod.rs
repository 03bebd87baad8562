//! `help` and `guide` output. Topic text lives in `content`; this module
//! only lays it out for the terminal.

use crate::formatting::FormatContext;
use crate::shared::table::{Justify, pad_field};
use crate::{paginate_and_print, terminal_columns};
use std::error::Error;

mod content;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Section {
    Command,
    Environment,
    Guide,
}

impl Section {
    fn label(self) -> &'static str {
        match self {
            Section::Command => "Commands",
            Section::Environment => "Environment",
            Section::Guide => "Guides",
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct HelpFlag<'a> {
    pub name: &'a str,
    pub desc: &'a str,
}

#[derive(Clone, Copy)]
pub(crate) struct HelpTopic<'a> {
    pub name: &'a str,
    pub summary: &'a str,
    pub usage: &'a str,
    pub details: &'a [&'a str],
    pub flags: &'a [HelpFlag<'a>],
    pub aliases: &'a [&'a str],
    pub section: Section,
    pub examples: &'a [&'a str],
}

#[derive(Clone, Copy)]
pub(crate) struct HelpBook<'a> {
    pub title: &'a str,
    pub program: &'a str,
    pub usage: &'a str,
    pub topics: &'a [HelpTopic<'a>],
    pub footer: &'a [&'a str],
}

impl<'a> HelpBook<'a> {
    fn find(&self, name: &str) -> Option<&HelpTopic<'a>> {
        self.topics.iter().find(|topic| {
            topic.name.eq_ignore_ascii_case(name)
                || topic.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
        })
    }

    /// `(label, summary)` rows for one section. Guides are listed by name,
    /// everything else by its usage line.
    fn rows(&self, section: Section) -> Vec<(String, String)> {
        self.topics
            .iter()
            .filter(|t| t.section == section)
            .map(|t| {
                let label = if section == Section::Guide { t.name } else { t.usage };
                (label.to_string(), t.summary.to_string())
            })
            .collect()
    }
}

pub(crate) fn run(args: Vec<String>, use_color: bool) -> Result<(), Box<dyn Error>> {
    show(args, false, use_color)
}

pub(crate) fn run_guides(args: Vec<String>, use_color: bool) -> Result<(), Box<dyn Error>> {
    show(args, true, use_color)
}

fn show(args: Vec<String>, guides_only: bool, use_color: bool) -> Result<(), Box<dyn Error>> {
    let width = terminal_columns().unwrap_or(96).clamp(64, 120);
    let printer = HelpPrinter { width, ctx: FormatContext::new(use_color) };
    let (lines, warning) = printer.render(&content::book(), args.first().map(String::as_str), guides_only);
    if let Some(warning) = warning {
        eprintln!("{warning}");
    }
    paginate_and_print(&lines)?;
    Ok(())
}

struct HelpPrinter {
    width: usize,
    ctx: FormatContext,
}

impl HelpPrinter {
    /// Lines for `topic` (or the index when `None`), plus a warning when the
    /// topic was not found and the index is shown instead.
    fn render(
        &self,
        book: &HelpBook<'_>,
        topic: Option<&str>,
        guides_only: bool,
    ) -> (Vec<String>, Option<String>) {
        let index = || if guides_only { self.guides(book) } else { self.overview(book) };
        let Some(name) = topic else {
            return (index(), None);
        };
        match book.find(name) {
            Some(entry) if guides_only && entry.section != Section::Guide => {
                (index(), Some(format!("Unknown guide: {name}")))
            }
            Some(entry) => (self.topic(book, entry), None),
            None => (index(), Some(format!("Unknown help topic: {name}"))),
        }
    }

    fn overview(&self, book: &HelpBook<'_>) -> Vec<String> {
        let mut out = vec![self.ctx.format_header(book.title), format!("usage: {}", book.usage), String::new()];
        for section in [Section::Command, Section::Environment, Section::Guide] {
            out.extend(self.block(section.label(), &book.rows(section)));
        }
        out.extend(self.paragraphs(book.footer));
        out
    }

    fn guides(&self, book: &HelpBook<'_>) -> Vec<String> {
        let mut out = vec![
            self.ctx.format_header(&format!("{} guides", book.title)),
            format!("usage: {} guide [topic]", book.program),
            String::new(),
        ];
        out.extend(self.block(Section::Guide.label(), &book.rows(Section::Guide)));
        out.extend(self.paragraphs(book.footer));
        out
    }

    fn topic(&self, book: &HelpBook<'_>, topic: &HelpTopic<'_>) -> Vec<String> {
        let mut out = vec![format!("{}: {}", self.ctx.format_header(topic.name), topic.summary)];
        out.push(format!("usage: {}", topic.usage));
        if !topic.aliases.is_empty() {
            out.push(format!("aliases: {}", topic.aliases.join(", ")));
        }
        out.push(String::new());

        if !topic.details.is_empty() {
            out.extend(self.paragraphs(topic.details));
            out.push(String::new());
        }

        let flags: Vec<(String, String)> =
            topic.flags.iter().map(|f| (f.name.to_string(), f.desc.to_string())).collect();
        out.extend(self.block("Options", &flags));

        if !topic.examples.is_empty() {
            out.push("Examples:".to_string());
            for example in topic.examples {
                out.extend(wrap(example, self.width - 2).into_iter().map(|l| format!("  {l}")));
            }
            out.push(String::new());
        }

        out.extend(self.paragraphs(book.footer));
        out
    }

    fn paragraphs(&self, texts: &[&str]) -> Vec<String> {
        texts.iter().flat_map(|t| wrap(t, self.width)).collect()
    }

    /// Two-column block: labels on the left, wrapped descriptions on the right.
    fn block(&self, title: &str, rows: &[(String, String)]) -> Vec<String> {
        if rows.is_empty() {
            return Vec::new();
        }
        let desc_min = self.width / 2;
        let longest = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
        let label_width = longest.min(38).min(self.width.saturating_sub(desc_min + 4));
        let desc_width = self.width.saturating_sub(label_width + 4).max(desc_min);

        let mut out = vec![format!("{}:", self.ctx.format_header(title))];
        for (label, desc) in rows {
            let labels = wrap(label, label_width);
            let descs = wrap(desc, desc_width);
            for i in 0..labels.len().max(descs.len()) {
                let l = labels.get(i).map(String::as_str).unwrap_or("");
                let d = descs.get(i).map(String::as_str).unwrap_or("");
                let line = format!("  {}  {d}", pad_field(l, label_width, Justify::Left));
                out.push(line.trim_end().to_string());
            }
        }
        out.push(String::new());
        out
    }
}

/// Greedy word wrap by character count. Words longer than `width` get a
/// line of their own. Always returns at least one line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len > 0 && line_len + 1 + word_len > width {
            out.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.push_str(word);
        line_len += word_len;
    }
    if !line.is_empty() || out.is_empty() {
        out.push(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printer(width: usize) -> HelpPrinter {
        HelpPrinter { width, ctx: FormatContext::new(false) }
    }

    #[test]
    fn topics_resolve_by_name_and_alias() {
        let book = content::book();
        assert_eq!(book.find("LIST").map(|t| t.name), Some("list"));
        assert_eq!(book.find("rm").map(|t| t.name), Some("delete"));
        assert_eq!(book.find("GEMINI_API_KEY").map(|t| t.name), Some("MINDVAULT_API_KEY"));
        assert!(book.find("archive").is_none());
    }

    #[test]
    fn guide_mode_rejects_command_topics() {
        let book = content::book();
        let (lines, warning) = printer(80).render(&book, Some("tags"), true);
        assert_eq!(warning.as_deref(), Some("Unknown guide: tags"));
        assert_eq!(lines[1], "usage: mindvault guide [topic]");
        assert!(lines.iter().any(|l| l.trim_start().starts_with("undo")));
        assert!(!lines.iter().any(|l| l.trim_start().starts_with("mindvault tags")));
    }

    #[test]
    fn topic_page_lists_options() {
        let book = content::book();
        let (lines, warning) = printer(80).render(&book, Some("ls"), false);
        assert!(warning.is_none());
        assert!(lines[0].starts_with("list: "));
        assert_eq!(lines[2], "aliases: ls");
        assert!(lines.iter().any(|l| l == "Options:"));
        assert!(lines.iter().any(|l| l.starts_with("  -s, --search <text>")));
    }

    #[test]
    fn unknown_topic_falls_back_to_overview() {
        let book = content::book();
        let (lines, warning) = printer(80).render(&book, Some("nope"), false);
        assert_eq!(warning.as_deref(), Some("Unknown help topic: nope"));
        assert_eq!(lines[0], "MindVault");
        assert!(lines.iter().any(|l| l == "Environment:"));
    }

    #[test]
    fn wrap_respects_width() {
        assert_eq!(wrap("alpha beta gamma delta", 11), vec!["alpha beta", "gamma delta"]);
        assert_eq!(wrap("", 10), vec![String::new()]);
        assert_eq!(wrap("unbreakable", 4), vec!["unbreakable"]);
    }
}
