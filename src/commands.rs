//! Command handlers shared by the one-shot CLI and the interactive shell.

use crate::args::{ArgParser, ListFlags};
use crate::clock::Clock;
use crate::config::Config;
use crate::document::{Align, Document, Resource};
use crate::error::DocumentError;
use crate::formatting::{FormatContext, TimeFormatter};
use crate::item::{Bookmark, BookmarkDraft, BookmarkPatch, Item, ItemKind, Note, NoteDraft, NotePatch};
use crate::metadata::{MetadataFetcher, MetadataSource, fetch_metadata};
use crate::render::{render_bookmark, render_list, render_note, render_toast};
use crate::search::{filter_items, partition_pinned};
use crate::shared::table::{Justify, render_table};
use crate::store::{Storage, Theme};
use crate::tags::{normalize_tag, tag_stats};
use crate::vault::{Undoable, Vault};
use crate::{help, paginate_and_print, terminal_columns};
use std::error::Error;
use std::path::{Path, PathBuf};

const NOTE_ADD_USAGE: &str =
    "Usage: mindvault note add <title> [body...] [-t tag] [--image path] [--align left|center|right]";
const BOOKMARK_ADD_USAGE: &str =
    "Usage: mindvault bookmark add <url> [--title T] [--desc D] [-t tag] [--no-fetch]";

pub struct Session<S: Storage, C: Clock> {
    pub vault: Vault<S, C>,
    pub config: Config,
    /// Collection that kind-less commands (`list`, `add`, ...) act on.
    pub view: ItemKind,
    /// Set by the shell: delete toasts then advertise their undo.
    pub interactive: bool,
    fetcher: Box<dyn MetadataFetcher>,
}

impl<S: Storage, C: Clock> Session<S, C> {
    pub fn new(vault: Vault<S, C>, config: Config, fetcher: Box<dyn MetadataFetcher>) -> Self {
        Self { vault, config, view: ItemKind::Note, interactive: false, fetcher }
    }

    fn ctx(&self, plain: bool) -> FormatContext {
        FormatContext::for_theme(self.config.use_color && !plain, self.vault.state().theme)
    }

    pub fn dispatch(&mut self, mut args: Vec<String>) -> Result<(), Box<dyn Error>> {
        if args.is_empty() {
            return self.item_command(self.view, "list", Vec::new());
        }
        let cmd = args.remove(0);
        if let Some(kind) = ItemKind::parse(&cmd) {
            let sub = if args.is_empty() { "list".to_string() } else { args.remove(0) };
            return self.item_command(kind, &sub, args);
        }
        match cmd.as_str() {
            "list" | "ls" | "add" | "new" | "view" | "show" | "edit" | "pin" | "fav"
            | "favorite" | "delete" | "rm" => self.item_command(self.view, &cmd, args),
            "tags" => self.tags(args),
            "theme" => self.theme(args),
            "fetch" => self.fetch(args),
            "path" => {
                println!("{}", self.config.vault_dir.display());
                Ok(())
            }
            "help" | "--help" | "-h" => help::run(args, self.config.use_color),
            "guide" | "guides" => help::run_guides(args, self.config.use_color),
            other => {
                eprintln!("Unknown command: {other}");
                eprintln!("Run `mindvault help` for the command list.");
                Ok(())
            }
        }
    }

    fn item_command(
        &mut self,
        kind: ItemKind,
        sub: &str,
        args: Vec<String>,
    ) -> Result<(), Box<dyn Error>> {
        match (kind, sub) {
            (ItemKind::Note, "list" | "ls") => self.list::<Note>(args),
            (ItemKind::Bookmark, "list" | "ls") => self.list::<Bookmark>(args),
            (ItemKind::Note, "add" | "new") => self.add_note(args),
            (ItemKind::Bookmark, "add" | "new") => self.add_bookmark(args),
            (ItemKind::Note, "view" | "show") => self.view_note(args),
            (ItemKind::Bookmark, "view" | "show") => self.view_bookmark(args),
            (ItemKind::Note, "edit") => self.edit_note(args),
            (ItemKind::Bookmark, "edit") => self.edit_bookmark(args),
            (ItemKind::Note, "pin") => self.pin::<Note>(args),
            (ItemKind::Bookmark, "pin") => self.pin::<Bookmark>(args),
            (ItemKind::Note, "fav" | "favorite") => self.favorite::<Note>(args),
            (ItemKind::Bookmark, "fav" | "favorite") => self.favorite::<Bookmark>(args),
            (ItemKind::Note, "delete" | "rm") => self.delete::<Note>(args),
            (ItemKind::Bookmark, "delete" | "rm") => self.delete::<Bookmark>(args),
            (_, other) => Err(format!("Unknown {} command: {other}", kind.label().to_lowercase()).into()),
        }
    }

    fn list<T: Item>(&self, args: Vec<String>) -> Result<(), Box<dyn Error>> {
        let flags = ListFlags::parse(args, "list")?;
        let matched = filter_items(self.vault.items::<T>(), &flags.filter);
        if matched.is_empty() {
            if flags.filter.is_active() {
                println!("No matching {}.", T::KIND.view_name());
            } else {
                match T::KIND {
                    ItemKind::Note => println!("No notes yet. Try `mindvault note add \"Title\" body`."),
                    ItemKind::Bookmark => println!("No bookmarks yet. Try `mindvault bookmark add <url>`."),
                }
            }
            return Ok(());
        }

        let (pinned, rest) = partition_pinned(matched);
        let ctx = self.ctx(false);
        let times = TimeFormatter::new(!flags.absolute_time, self.vault.now());
        let lines = render_list(&pinned, &rest, &ctx, &times, flags.filter.query.as_deref());
        if flags.show_all || self.interactive {
            for line in lines {
                println!("{line}");
            }
        } else {
            paginate_and_print(&lines)?;
        }
        Ok(())
    }

    fn add_note(&mut self, args: Vec<String>) -> Result<(), Box<dyn Error>> {
        let mut parser = ArgParser::new(args, "note add");
        let mut title: Option<String> = None;
        let mut body_parts: Vec<String> = Vec::new();
        let mut tags = Vec::new();
        let mut images: Vec<PathBuf> = Vec::new();
        let mut align: Option<Align> = None;
        while let Some(arg) = parser.next() {
            match arg.as_str() {
                "-t" | "--tag" => tags.extend(parser.extract_tags()?),
                "-i" | "--image" => images.push(PathBuf::from(parser.extract_value(&arg)?)),
                "--align" => align = Some(parse_align(&parser.extract_value(&arg)?)?),
                other if other.starts_with("--") => return Err(parser.unknown_flag(other)),
                other => {
                    if title.is_none() {
                        title = Some(other.to_string());
                    } else {
                        body_parts.push(other.to_string());
                    }
                }
            }
        }
        let title = title.ok_or(NOTE_ADD_USAGE)?;
        let content = compose_content(&body_parts.join(" "), &images, align)?;
        let note = self.vault.add::<Note>(NoteDraft { title, content, tags })?;
        println!("Added note {} ({})", note.id, note.display_title());
        Ok(())
    }

    fn add_bookmark(&mut self, args: Vec<String>) -> Result<(), Box<dyn Error>> {
        let mut parser = ArgParser::new(args, "bookmark add");
        let mut draft = BookmarkDraft::default();
        let mut no_fetch = false;
        while let Some(arg) = parser.next() {
            match arg.as_str() {
                "-t" | "--tag" => draft.tags.extend(parser.extract_tags()?),
                "--title" => draft.title = parser.extract_value(&arg)?,
                "--desc" | "--description" => draft.description = parser.extract_value(&arg)?,
                "--no-fetch" => no_fetch = true,
                other if other.starts_with('-') => return Err(parser.unknown_flag(other)),
                other => {
                    if !draft.url.is_empty() {
                        return Err(BOOKMARK_ADD_USAGE.into());
                    }
                    draft.url = other.trim().to_string();
                }
            }
        }
        if draft.url.is_empty() {
            return Err(BOOKMARK_ADD_USAGE.into());
        }

        let wants_fetch = draft.title.trim().is_empty() && self.config.fetch_enabled && !no_fetch;
        let bookmark = if wants_fetch {
            eprintln!("Fetching details for {}...", draft.url);
            let (bookmark, outcome) =
                self.vault.add_bookmark_with_metadata(draft, self.fetcher.as_ref())?;
            if outcome.is_some_and(|o| o.source == MetadataSource::Fallback) {
                eprintln!("Could not fetch details; using a placeholder title.");
            }
            bookmark
        } else {
            self.vault.add::<Bookmark>(draft)?
        };
        println!("Added bookmark {} ({})", bookmark.id, bookmark.display_title());
        Ok(())
    }

    fn view_note(&self, args: Vec<String>) -> Result<(), Box<dyn Error>> {
        let mut parser = ArgParser::new(args, "note view");
        let mut id: Option<String> = None;
        let mut plain = false;
        let mut html = false;
        while let Some(arg) = parser.next() {
            match arg.as_str() {
                "--plain" => plain = true,
                "--html" => html = true,
                other if other.starts_with('-') => return Err(parser.unknown_flag(other)),
                other => {
                    if id.is_none() {
                        id = Some(other.to_string());
                    }
                }
            }
        }
        let id = id.ok_or("Usage: mindvault note view <id> [--plain] [--html]")?;
        let Some(note) = self.vault.get::<Note>(&id) else {
            println!("Note {id} not found");
            return Ok(());
        };
        if html {
            println!("{}", note.content);
            return Ok(());
        }
        let times = TimeFormatter::new(false, self.vault.now());
        let width = terminal_columns().unwrap_or(80);
        println!("{}", render_note(note, &self.ctx(plain), &times, width));
        Ok(())
    }

    fn view_bookmark(&self, args: Vec<String>) -> Result<(), Box<dyn Error>> {
        let mut parser = ArgParser::new(args, "bookmark view");
        let mut id: Option<String> = None;
        let mut plain = false;
        while let Some(arg) = parser.next() {
            match arg.as_str() {
                "--plain" => plain = true,
                other if other.starts_with('-') => return Err(parser.unknown_flag(other)),
                other => {
                    if id.is_none() {
                        id = Some(other.to_string());
                    }
                }
            }
        }
        let id = id.ok_or("Usage: mindvault bookmark view <id> [--plain]")?;
        let Some(bookmark) = self.vault.get::<Bookmark>(&id) else {
            println!("Bookmark {id} not found");
            return Ok(());
        };
        let times = TimeFormatter::new(false, self.vault.now());
        println!("{}", render_bookmark(bookmark, &self.ctx(plain), &times));
        Ok(())
    }

    fn edit_note(&mut self, args: Vec<String>) -> Result<(), Box<dyn Error>> {
        let mut parser = ArgParser::new(args, "note edit");
        let mut id: Option<String> = None;
        let mut patch = NotePatch::default();
        let mut edits = TagEdits::default();
        while let Some(arg) = parser.next() {
            match arg.as_str() {
                "--title" => patch.title = Some(parser.extract_value(&arg)?),
                "--body" => {
                    let body = parser.extract_value(&arg)?;
                    patch.content = Some(compose_content(&body, &[], None)?);
                }
                "-t" | "--tag" => edits.add.extend(parser.extract_tags()?),
                "--untag" => edits.remove.extend(parser.extract_tags()?),
                other if other.starts_with('-') => return Err(parser.unknown_flag(other)),
                other => {
                    if id.is_none() {
                        id = Some(other.to_string());
                    }
                }
            }
        }
        let id = id.ok_or("Usage: mindvault note edit <id> [--title T] [--body B] [-t tag] [--untag tag]")?;
        let Some(note) = self.vault.get::<Note>(&id) else {
            println!("Note {id} not found");
            return Ok(());
        };
        patch.tags = edits.apply(note.tags());
        if patch == NotePatch::default() {
            return Err("Nothing to change; pass --title, --body, -t or --untag".into());
        }
        self.vault.update::<Note>(&id, patch)?;
        println!("Updated {id}");
        Ok(())
    }

    fn edit_bookmark(&mut self, args: Vec<String>) -> Result<(), Box<dyn Error>> {
        let mut parser = ArgParser::new(args, "bookmark edit");
        let mut id: Option<String> = None;
        let mut patch = BookmarkPatch::default();
        let mut edits = TagEdits::default();
        while let Some(arg) = parser.next() {
            match arg.as_str() {
                "--url" => patch.url = Some(parser.extract_value(&arg)?.trim().to_string()),
                "--title" => patch.title = Some(parser.extract_value(&arg)?),
                "--desc" | "--description" => patch.description = Some(parser.extract_value(&arg)?),
                "-t" | "--tag" => edits.add.extend(parser.extract_tags()?),
                "--untag" => edits.remove.extend(parser.extract_tags()?),
                other if other.starts_with('-') => return Err(parser.unknown_flag(other)),
                other => {
                    if id.is_none() {
                        id = Some(other.to_string());
                    }
                }
            }
        }
        let id = id.ok_or(
            "Usage: mindvault bookmark edit <id> [--url U] [--title T] [--desc D] [-t tag] [--untag tag]",
        )?;
        let Some(bookmark) = self.vault.get::<Bookmark>(&id) else {
            println!("Bookmark {id} not found");
            return Ok(());
        };
        patch.tags = edits.apply(bookmark.tags());
        if patch == BookmarkPatch::default() {
            return Err("Nothing to change; pass --url, --title, --desc, -t or --untag".into());
        }
        self.vault.update::<Bookmark>(&id, patch)?;
        println!("Updated {id}");
        Ok(())
    }

    fn pin<T: Item>(&mut self, args: Vec<String>) -> Result<(), Box<dyn Error>> {
        let ids = require_ids::<T>(args, "pin")?;
        for id in ids {
            match self.vault.toggle_pin::<T>(&id)? {
                Some(true) => println!("Pinned {id}"),
                Some(false) => println!("Unpinned {id}"),
                None => println!("{} {id} not found", T::KIND.label()),
            }
        }
        Ok(())
    }

    fn favorite<T: Item>(&mut self, args: Vec<String>) -> Result<(), Box<dyn Error>> {
        let ids = require_ids::<T>(args, "fav")?;
        for id in ids {
            match self.vault.toggle_favorite::<T>(&id)? {
                Some(true) => println!("Added {id} to favorites"),
                Some(false) => println!("Removed {id} from favorites"),
                None => println!("{} {id} not found", T::KIND.label()),
            }
        }
        Ok(())
    }

    fn delete<T: Undoable>(&mut self, args: Vec<String>) -> Result<(), Box<dyn Error>> {
        let ids = require_ids::<T>(args, "delete")?;
        for id in ids {
            let Some(toast_id) = self.vault.delete::<T>(&id)? else {
                println!("{} {id} not found", T::KIND.label());
                continue;
            };
            let ctx = self.ctx(false);
            if let Some(toast) = self.vault.toasts().iter().find(|t| t.id == toast_id) {
                if self.interactive {
                    println!("{}", render_toast(toast, &ctx));
                } else {
                    println!("{}", toast.message);
                }
            }
        }
        Ok(())
    }

    fn tags(&self, args: Vec<String>) -> Result<(), Box<dyn Error>> {
        let names_only = match args.first().map(String::as_str) {
            None => false,
            Some("--names") => true,
            Some(other) => return Err(format!("Unknown flag for tags: {other}").into()),
        };
        if names_only {
            for tag in self.vault.tag_index() {
                println!("{tag}");
            }
            return Ok(());
        }

        let stats = tag_stats(self.vault.state());
        if stats.is_empty() {
            println!("No tags found.");
            return Ok(());
        }
        let ctx = self.ctx(false);
        let times = TimeFormatter::new(true, self.vault.now());
        let columns = [
            ("Tag", Justify::Left),
            ("Notes", Justify::Right),
            ("Bookmarks", Justify::Right),
            ("Last used", Justify::Left),
        ];
        let rows: Vec<Vec<String>> = stats
            .iter()
            .map(|(tag, stat)| {
                vec![
                    ctx.format_tag(tag),
                    stat.notes.to_string(),
                    stat.bookmarks.to_string(),
                    stat.last_used.map(|t| times.format(t)).unwrap_or_else(|| "n/a".to_string()),
                ]
            })
            .collect();
        println!("{}", render_table(&columns, &rows));
        Ok(())
    }

    fn theme(&mut self, args: Vec<String>) -> Result<(), Box<dyn Error>> {
        let theme = match args.first().map(String::as_str) {
            None => {
                println!("Theme: {}", self.vault.state().theme.as_str());
                return Ok(());
            }
            Some("toggle") => self.vault.toggle_theme()?,
            Some(raw) => {
                let theme = Theme::parse(raw)
                    .ok_or_else(|| format!("Unknown theme: {raw} (light|dark|toggle)"))?;
                self.vault.set_theme(theme)?
            }
        };
        println!("Theme set to {}", theme.as_str());
        Ok(())
    }

    fn fetch(&self, args: Vec<String>) -> Result<(), Box<dyn Error>> {
        let url = args.first().ok_or("Usage: mindvault fetch <url>")?;
        eprintln!("Fetching details for {url}...");
        let outcome = fetch_metadata(self.fetcher.as_ref(), url);
        let source = match outcome.source {
            MetadataSource::Fetched => "fetched",
            MetadataSource::Fallback => "fallback",
        };
        println!("Title: {}", outcome.metadata.title);
        println!("Description: {}", outcome.metadata.description);
        println!("Source: {source}");
        Ok(())
    }

    /// Print every open toast with its remaining time.
    pub fn print_toasts(&self) {
        if self.vault.toasts().is_empty() {
            println!("No notifications.");
            return;
        }
        let ctx = self.ctx(false);
        for toast in self.vault.toasts().iter() {
            println!("{}", render_toast(toast, &ctx));
        }
    }
}

/// Tags to add and remove in one edit.
#[derive(Default)]
struct TagEdits {
    add: Vec<String>,
    remove: Vec<String>,
}

impl TagEdits {
    fn apply(&self, current: &[String]) -> Option<Vec<String>> {
        if self.add.is_empty() && self.remove.is_empty() {
            return None;
        }
        Some(
            current
                .iter()
                .chain(self.add.iter())
                .filter(|t| !self.remove.contains(&normalize_tag(t)))
                .cloned()
                .collect(),
        )
    }
}

fn require_ids<T: Item>(args: Vec<String>, command: &str) -> Result<Vec<String>, Box<dyn Error>> {
    if args.is_empty() {
        let kind = T::KIND.label().to_lowercase();
        return Err(format!("Usage: mindvault {kind} {command} <id>...").into());
    }
    if let Some(flag) = args.iter().find(|a| a.starts_with('-')) {
        return Err(format!("Unknown flag for {command}: {flag}").into());
    }
    Ok(args)
}

fn parse_align(raw: &str) -> Result<Align, Box<dyn Error>> {
    Align::parse(raw).ok_or_else(|| format!("Unknown alignment: {raw} (left|center|right)").into())
}

/// Turn markdown body text plus attached image files into stored markup.
pub fn compose_content(
    body: &str,
    images: &[PathBuf],
    align: Option<Align>,
) -> Result<String, DocumentError> {
    let mut doc = Document::from_markdown(body, |dest| Resource::from_path(Path::new(dest)))?;
    for path in images {
        doc.push_image(Resource::from_path(path)?);
    }
    if let Some(align) = align {
        doc.align_paragraphs(align);
    }
    Ok(doc.to_html())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn tag_edits_add_and_remove() {
        let edits = TagEdits { add: vec!["new".into()], remove: vec!["old".into()] };
        let current = vec!["old".to_string(), "keep".to_string()];
        assert_eq!(edits.apply(&current), Some(vec!["keep".to_string(), "new".to_string()]));
        assert_eq!(TagEdits::default().apply(&current), None);
    }

    #[test]
    fn compose_content_embeds_images_and_alignment() {
        let tmp = tempdir().unwrap();
        let img = tmp.path().join("dot.png");
        std::fs::write(&img, [137u8, 80, 78, 71]).unwrap();

        let html = compose_content("**Hi** there", &[img], Some(Align::Center)).unwrap();
        assert!(html.contains("text-align: center"));
        assert!(html.contains("<b>Hi</b>"));
        assert!(html.contains("data:image/png;base64,"));
    }

    #[test]
    fn compose_content_rejects_unknown_image_type() {
        let err = compose_content("x", &[PathBuf::from("notes.txt")], None).unwrap_err();
        assert!(matches!(err, DocumentError::UnsupportedImage(_)));
    }

    #[test]
    fn require_ids_rejects_flags() {
        assert!(require_ids::<Note>(vec![], "pin").is_err());
        assert!(require_ids::<Note>(vec!["--x".into()], "pin").is_err());
        assert_eq!(require_ids::<Note>(vec!["a".into()], "pin").unwrap(), vec!["a"]);
    }
}
