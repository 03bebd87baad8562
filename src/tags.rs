use crate::item::Item;
use crate::store::AppState;
use std::collections::{BTreeMap, BTreeSet};

/// Normalize a tag: trimmed, lowercase, without a leading `#`.
pub fn normalize_tag(t: &str) -> String {
    t.trim().trim_start_matches('#').trim().to_lowercase()
}

/// Normalize and deduplicate a list of tags, keeping first-occurrence order.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = normalize_tag(tag.as_ref());
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// Split free-form tag input on commas, the way the tag field accepts it.
pub fn split_tag_input(input: &str) -> Vec<String> {
    normalize_tags(input.split(','))
}

/// Check if an item carries a tag (compared after normalization)
pub fn has_tag(tags: &[String], tag: &str) -> bool {
    let needle = normalize_tag(tag);
    tags.iter().any(|t| normalize_tag(t) == needle)
}

/// Tags as shown to the user.
pub fn display_tag(tag: &str) -> String {
    format!("#{tag}")
}

/// Sorted union of every tag across notes and bookmarks. Always derived from
/// the collections; there is no stored copy to drift.
pub fn tag_index(state: &AppState) -> Vec<String> {
    let mut all: BTreeSet<String> = BTreeSet::new();
    for tag in state
        .notes
        .iter()
        .flat_map(|n| n.tags())
        .chain(state.bookmarks.iter().flat_map(|b| b.tags()))
    {
        let tag = normalize_tag(tag);
        if !tag.is_empty() {
            all.insert(tag);
        }
    }
    all.into_iter().collect()
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TagStat {
    pub notes: usize,
    pub bookmarks: usize,
    pub last_used: Option<i64>,
}

impl TagStat {
    pub fn total(&self) -> usize {
        self.notes + self.bookmarks
    }

    fn touch(&mut self, updated_at: i64) {
        self.last_used = Some(self.last_used.map_or(updated_at, |l| l.max(updated_at)));
    }
}

/// Per-tag usage counts, keyed in the same order as `tag_index`.
pub fn tag_stats(state: &AppState) -> BTreeMap<String, TagStat> {
    let mut stats: BTreeMap<String, TagStat> = BTreeMap::new();
    for note in &state.notes {
        for tag in normalize_tags(note.tags()) {
            let entry = stats.entry(tag).or_default();
            entry.notes += 1;
            entry.touch(note.updated_at());
        }
    }
    for bookmark in &state.bookmarks {
        for tag in normalize_tags(bookmark.tags()) {
            let entry = stats.entry(tag).or_default();
            entry.bookmarks += 1;
            entry.touch(bookmark.updated_at());
        }
    }
    stats
}

/// Hash a tag for deterministic color selection
pub fn hash_tag(tag: &str) -> u64 {
    let mut h: u64 = 5381;
    for b in tag.bytes() {
        h = (h.wrapping_shl(5)).wrapping_add(h) ^ u64::from(b);
    }
    h
}

/// Get color for a tag based on hash
pub fn color_for_tag(tag: &str) -> (u8, u8, u8) {
    const PALETTE: &[(u8, u8, u8)] = &[
        (249, 115, 22),
        (234, 88, 12),
        (244, 63, 94),
        (217, 70, 239),
        (139, 92, 246),
        (59, 130, 246),
        (14, 165, 233),
        (20, 184, 166),
        (34, 197, 94),
        (132, 204, 22),
        (234, 179, 8),
        (245, 158, 11),
        (236, 72, 153),
        (99, 102, 241),
        (6, 182, 212),
        (16, 185, 129),
    ];
    let h = hash_tag(tag);
    PALETTE[(h as usize) % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Bookmark, Note};

    fn note(id: &str, tags: &[&str], updated_at: i64) -> Note {
        Note {
            id: id.to_string(),
            title: id.to_string(),
            content: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            is_pinned: false,
            is_favorite: false,
            created_at: 0,
            updated_at,
        }
    }

    fn bookmark(id: &str, tags: &[&str]) -> Bookmark {
        Bookmark {
            id: id.to_string(),
            url: "https://example.com".to_string(),
            title: String::new(),
            description: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            is_pinned: false,
            is_favorite: false,
            created_at: 0,
            updated_at: 5,
        }
    }

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("Work"), "work");
        assert_eq!(normalize_tag("#todo"), "todo");
        assert_eq!(normalize_tag("  Ideas  "), "ideas");
        assert_eq!(normalize_tag(""), "");
        assert_eq!(normalize_tag(" # "), "");
    }

    #[test]
    fn test_normalize_tags_dedupes_case_insensitively() {
        let result = normalize_tags(["Work", "work", "#WORK", "home"]);
        assert_eq!(result, vec!["work", "home"]);
    }

    #[test]
    fn test_split_tag_input() {
        assert_eq!(split_tag_input("rust, Tools,,rust"), vec!["rust", "tools"]);
    }

    #[test]
    fn test_has_tag() {
        let tags = vec!["todo".to_string(), "work".to_string()];
        assert!(has_tag(&tags, "#Todo"));
        assert!(!has_tag(&tags, "missing"));
    }

    #[test]
    fn tag_index_is_sorted_union() {
        let mut state = AppState::default();
        state.notes.push(note("a", &["zeta", "alpha"], 1));
        state.bookmarks.push(bookmark("b", &["Alpha", "mid"]));
        assert_eq!(tag_index(&state), vec!["alpha", "mid", "zeta"]);

        state.notes.clear();
        assert_eq!(tag_index(&state), vec!["alpha", "mid"]);
    }

    #[test]
    fn tag_stats_counts_both_collections() {
        let mut state = AppState::default();
        state.notes.push(note("a", &["work"], 10));
        state.notes.push(note("b", &["work"], 30));
        state.bookmarks.push(bookmark("c", &["work", "read"]));
        let stats = tag_stats(&state);
        let work = &stats["work"];
        assert_eq!(work.notes, 2);
        assert_eq!(work.bookmarks, 1);
        assert_eq!(work.total(), 3);
        assert_eq!(work.last_used, Some(30));
        assert_eq!(stats["read"].last_used, Some(5));
    }

    #[test]
    fn test_color_for_tag_consistent() {
        assert_eq!(color_for_tag("todo"), color_for_tag("todo"));
        assert_ne!(hash_tag("todo"), hash_tag("work"));
    }
}
