use crate::item::Item;
use crate::tags::{has_tag, normalize_tag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    All,
    Pinned,
    Unpinned,
    Favorites,
}

impl Scope {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "pinned" => Some(Self::Pinned),
            "unpinned" => Some(Self::Unpinned),
            "favorites" | "favourites" | "fav" => Some(Self::Favorites),
            _ => None,
        }
    }

    fn admits<T: Item>(self, item: &T) -> bool {
        match self {
            Self::All => true,
            Self::Pinned => item.is_pinned(),
            Self::Unpinned => !item.is_pinned(),
            Self::Favorites => item.is_favorite(),
        }
    }
}

/// What a list view shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub query: Option<String>,
    pub tag: Option<String>,
    pub scope: Scope,
}

impl ItemFilter {
    pub fn matches<T: Item>(&self, item: &T) -> bool {
        if !self.scope.admits(item) {
            return false;
        }
        if let Some(tag) = self.tag.as_deref().map(normalize_tag).filter(|t| !t.is_empty()) {
            if !has_tag(item.tags(), &tag) {
                return false;
            }
        }
        match self.query.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => item.matches_query(&q.to_lowercase()),
            _ => true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.query.as_deref().is_some_and(|q| !q.trim().is_empty())
            || self.tag.is_some()
            || self.scope != Scope::All
    }
}

/// Items passing `filter`, in stored order.
pub fn filter_items<'a, T: Item>(items: &'a [T], filter: &ItemFilter) -> Vec<&'a T> {
    items.iter().filter(|i| filter.matches(*i)).collect()
}

/// Split into (pinned, rest), each keeping its input order.
pub fn partition_pinned<'a, T: Item>(items: Vec<&'a T>) -> (Vec<&'a T>, Vec<&'a T>) {
    items.into_iter().partition(|i| i.is_pinned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Bookmark, Note};

    fn note(id: &str, title: &str, content: &str, tags: &[&str], pinned: bool, fav: bool) -> Note {
        Note {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            is_pinned: pinned,
            is_favorite: fav,
            created_at: 1,
            updated_at: 1,
        }
    }

    fn notes() -> Vec<Note> {
        vec![
            note("1", "Rust tips", "<p>borrowing</p>", &["dev"], false, true),
            note("2", "Groceries", "<p>milk</p>", &["home"], true, false),
            note("3", "Ideas", "<p>Rust game</p>", &["dev", "fun"], true, true),
        ]
    }

    fn ids(items: &[&Note]) -> Vec<String> {
        items.iter().map(|n| n.id.clone()).collect()
    }

    #[test]
    fn empty_filter_keeps_order() {
        let all = notes();
        assert_eq!(ids(&filter_items(&all, &ItemFilter::default())), vec!["1", "2", "3"]);
    }

    #[test]
    fn query_matches_title_or_body_case_insensitive() {
        let all = notes();
        let filter = ItemFilter { query: Some("RUST".into()), ..Default::default() };
        assert_eq!(ids(&filter_items(&all, &filter)), vec!["1", "3"]);
    }

    #[test]
    fn tag_and_scope_combine() {
        let all = notes();
        let filter =
            ItemFilter { tag: Some("#Dev".into()), scope: Scope::Pinned, ..Default::default() };
        assert_eq!(ids(&filter_items(&all, &filter)), vec!["3"]);

        let favs = ItemFilter { scope: Scope::Favorites, ..Default::default() };
        assert_eq!(ids(&filter_items(&all, &favs)), vec!["1", "3"]);
        let unpinned = ItemFilter { scope: Scope::Unpinned, ..Default::default() };
        assert_eq!(ids(&filter_items(&all, &unpinned)), vec!["1"]);
    }

    #[test]
    fn partition_keeps_stored_order() {
        let all = notes();
        let (pinned, rest) = partition_pinned(filter_items(&all, &ItemFilter::default()));
        assert_eq!(ids(&pinned), vec!["2", "3"]);
        assert_eq!(ids(&rest), vec!["1"]);
    }

    #[test]
    fn bookmarks_match_url() {
        let bookmarks = vec![Bookmark {
            id: "b".into(),
            url: "https://docs.rs/serde".into(),
            title: "Serde".into(),
            description: String::new(),
            tags: vec![],
            is_pinned: false,
            is_favorite: false,
            created_at: 0,
            updated_at: 0,
        }];
        let filter = ItemFilter { query: Some("docs.rs".into()), ..Default::default() };
        assert_eq!(filter_items(&bookmarks, &filter).len(), 1);
    }

    #[test]
    fn scope_parse() {
        assert_eq!(Scope::parse("Favorites"), Some(Scope::Favorites));
        assert_eq!(Scope::parse("nope"), None);
    }
}
