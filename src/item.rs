//! The two entity kinds kept in the vault and the contract the repository
//! uses to treat them uniformly.

use crate::document::Document;
use crate::store::AppState;
use crate::tags::normalize_tags;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};

pub const ID_TS_WIDTH: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Note,
    Bookmark,
}

impl ItemKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "note" | "notes" | "n" => Some(Self::Note),
            "bookmark" | "bookmarks" | "bm" | "b" => Some(Self::Bookmark),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Note => "Note",
            Self::Bookmark => "Bookmark",
        }
    }

    pub fn view_name(self) -> &'static str {
        match self {
            Self::Note => "notes",
            Self::Bookmark => "bookmarks",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// HTML markup produced by `Document::to_html`.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_pinned: Option<bool>,
    pub is_favorite: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkDraft {
    pub url: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkPatch {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_pinned: Option<bool>,
    pub is_favorite: Option<bool>,
}

/// Shared shape of notes and bookmarks.
pub trait Item: Clone {
    type Draft;
    type Patch: Default;

    const KIND: ItemKind;

    fn create(id: String, draft: Self::Draft, now: i64) -> Self;
    /// Merge the provided fields. Timestamps are the repository's job.
    fn apply(&mut self, patch: Self::Patch);

    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn tags(&self) -> &[String];
    fn tags_mut(&mut self) -> &mut Vec<String>;
    fn is_pinned(&self) -> bool;
    fn is_favorite(&self) -> bool;
    fn created_at(&self) -> i64;
    fn updated_at(&self) -> i64;
    fn set_updated_at(&mut self, ts: i64);

    fn pin_patch(pinned: bool) -> Self::Patch;
    fn favorite_patch(favorite: bool) -> Self::Patch;

    /// Case-insensitive substring match; `query_lower` is already lowercase.
    fn matches_query(&self, query_lower: &str) -> bool;
    /// One-line summary shown in lists.
    fn preview(&self) -> String;

    fn collection(state: &AppState) -> &Vec<Self>;
    fn collection_mut(state: &mut AppState) -> &mut Vec<Self>;

    fn display_title(&self) -> &str {
        let title = self.title().trim();
        if title.is_empty() { "Untitled" } else { title }
    }
}

impl Item for Note {
    type Draft = NoteDraft;
    type Patch = NotePatch;

    const KIND: ItemKind = ItemKind::Note;

    fn create(id: String, draft: NoteDraft, now: i64) -> Self {
        Self {
            id,
            title: draft.title,
            content: draft.content,
            tags: normalize_tags(draft.tags),
            is_pinned: false,
            is_favorite: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: NotePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(tags) = patch.tags {
            self.tags = normalize_tags(tags);
        }
        if let Some(pinned) = patch.is_pinned {
            self.is_pinned = pinned;
        }
        if let Some(favorite) = patch.is_favorite {
            self.is_favorite = favorite;
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn tags_mut(&mut self) -> &mut Vec<String> {
        &mut self.tags
    }

    fn is_pinned(&self) -> bool {
        self.is_pinned
    }

    fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn updated_at(&self) -> i64 {
        self.updated_at
    }

    fn set_updated_at(&mut self, ts: i64) {
        self.updated_at = ts;
    }

    fn pin_patch(pinned: bool) -> NotePatch {
        NotePatch { is_pinned: Some(pinned), ..Default::default() }
    }

    fn favorite_patch(favorite: bool) -> NotePatch {
        NotePatch { is_favorite: Some(favorite), ..Default::default() }
    }

    fn matches_query(&self, query_lower: &str) -> bool {
        if query_lower.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(query_lower)
            || self.document().plain_text().to_lowercase().contains(query_lower)
    }

    fn preview(&self) -> String {
        let text = self.document().plain_text();
        text.lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("")
            .to_string()
    }

    fn collection(state: &AppState) -> &Vec<Self> {
        &state.notes
    }

    fn collection_mut(state: &mut AppState) -> &mut Vec<Self> {
        &mut state.notes
    }
}

impl Note {
    /// Parse the stored markup into the document model.
    pub fn document(&self) -> Document {
        Document::from_html(&self.content)
    }
}

impl Item for Bookmark {
    type Draft = BookmarkDraft;
    type Patch = BookmarkPatch;

    const KIND: ItemKind = ItemKind::Bookmark;

    fn create(id: String, draft: BookmarkDraft, now: i64) -> Self {
        Self {
            id,
            url: draft.url,
            title: draft.title,
            description: draft.description,
            tags: normalize_tags(draft.tags),
            is_pinned: false,
            is_favorite: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: BookmarkPatch) {
        if let Some(url) = patch.url {
            self.url = url;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(tags) = patch.tags {
            self.tags = normalize_tags(tags);
        }
        if let Some(pinned) = patch.is_pinned {
            self.is_pinned = pinned;
        }
        if let Some(favorite) = patch.is_favorite {
            self.is_favorite = favorite;
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn tags_mut(&mut self) -> &mut Vec<String> {
        &mut self.tags
    }

    fn is_pinned(&self) -> bool {
        self.is_pinned
    }

    fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn updated_at(&self) -> i64 {
        self.updated_at
    }

    fn set_updated_at(&mut self, ts: i64) {
        self.updated_at = ts;
    }

    fn pin_patch(pinned: bool) -> BookmarkPatch {
        BookmarkPatch { is_pinned: Some(pinned), ..Default::default() }
    }

    fn favorite_patch(favorite: bool) -> BookmarkPatch {
        BookmarkPatch { is_favorite: Some(favorite), ..Default::default() }
    }

    fn matches_query(&self, query_lower: &str) -> bool {
        if query_lower.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(query_lower)
            || self.description.to_lowercase().contains(query_lower)
            || self.url.to_lowercase().contains(query_lower)
    }

    fn preview(&self) -> String {
        if self.description.trim().is_empty() {
            self.url.clone()
        } else {
            format!("{} ({})", self.description.trim(), self.url)
        }
    }

    fn collection(state: &AppState) -> &Vec<Self> {
        &state.bookmarks
    }

    fn collection_mut(state: &mut AppState) -> &mut Vec<Self> {
        &mut state.bookmarks
    }
}

#[derive(Default)]
struct IdState {
    last_ts: i64,
    counter: u32,
}

/// Generate an id that is not in `taken`. Ids are base62 microsecond
/// timestamps; the process-wide state keeps them strictly increasing so a
/// deleted item's id is never handed out again.
pub fn generate_id(taken: &HashSet<&str>) -> String {
    static ID_STATE: OnceLock<Mutex<IdState>> = OnceLock::new();
    let state = ID_STATE.get_or_init(|| Mutex::new(IdState::default()));

    let mut guard = state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    loop {
        let now = Utc::now().timestamp_micros();
        let ts = if now <= guard.last_ts { guard.last_ts } else { now };

        if ts == guard.last_ts {
            guard.counter = guard.counter.saturating_add(1);
        } else {
            guard.last_ts = ts;
            guard.counter = 0;
        }

        let ts_enc = encode_base62_width(ts.max(0) as u64, ID_TS_WIDTH);
        let id = if guard.counter == 0 {
            ts_enc
        } else {
            format!("{ts_enc}{}", encode_base62(guard.counter as u64))
        };

        if !taken.contains(id.as_str()) {
            return id;
        }
    }
}

fn encode_base62(num: u64) -> String {
    const ALPHABET: &[u8] =
        b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
    if num == 0 {
        return "0".to_string();
    }
    let mut n = num;
    let base = ALPHABET.len() as u64;
    let mut out = Vec::new();
    while n > 0 {
        let idx = (n % base) as usize;
        out.push(ALPHABET[idx] as char);
        n /= base;
    }
    out.iter().rev().collect()
}

fn encode_base62_width(num: u64, width: usize) -> String {
    let base = encode_base62(num);
    if base.len() >= width {
        base
    } else {
        format!("{}{}", "0".repeat(width - base.len()), base)
    }
}
