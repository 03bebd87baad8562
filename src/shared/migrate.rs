use crate::error::StoreError;
use crate::item::Item;
use crate::store::{AppState, SCHEMA_VERSION};
use crate::tags::normalize_tags;
use serde_json::Value;

/// Decode a stored blob into the current state shape.
///
/// Blobs without a `version` field come from the first storage layout, which
/// also kept a top-level `tags` list. That list is derived data now and is
/// dropped. Every item is re-normalized on the way in.
pub fn decode_state(raw: &str) -> Result<AppState, StoreError> {
    let mut value: Value = serde_json::from_str(raw)?;
    let Some(obj) = value.as_object_mut() else {
        return Err(StoreError::Malformed("top level is not an object".into()));
    };

    match obj.get("version") {
        None => {
            log::info!("Upgrading legacy vault layout to version {SCHEMA_VERSION}");
            obj.remove("tags");
            obj.insert("version".into(), Value::from(SCHEMA_VERSION));
        }
        Some(v) => match v.as_u64() {
            Some(SCHEMA_VERSION) => {}
            Some(other) => return Err(StoreError::UnsupportedVersion(other)),
            None => return Err(StoreError::Malformed(format!("bad version field: {v}"))),
        },
    }

    let mut state: AppState = serde_json::from_value(value)?;
    normalize_items(&mut state.notes);
    normalize_items(&mut state.bookmarks);
    Ok(state)
}

fn normalize_items<T: Item>(items: &mut [T]) {
    for item in items.iter_mut() {
        let tags = normalize_tags(item.tags().iter());
        *item.tags_mut() = tags;
        if item.updated_at() < item.created_at() {
            let created = item.created_at();
            item.set_updated_at(created);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Theme;

    const LEGACY: &str = r##"{
        "notes": [
            {"id": "n1", "title": "Old", "content": "<b>hi</b>", "tags": ["Work", "#work", "ideas"],
             "isPinned": true, "isFavorite": false, "createdAt": 10, "updatedAt": 20}
        ],
        "bookmarks": [
            {"id": "b1", "url": "https://example.com", "title": "Ex", "description": "",
             "tags": [], "createdAt": 5, "updatedAt": 1}
        ],
        "tags": ["work", "ideas", "stale"],
        "theme": "dark"
    }"##;

    #[test]
    fn legacy_blob_is_upgraded() {
        let state = decode_state(LEGACY).unwrap();
        assert_eq!(state.version, SCHEMA_VERSION);
        assert_eq!(state.theme, Theme::Dark);
        assert_eq!(state.notes.len(), 1);
        assert_eq!(state.notes[0].tags, vec!["work", "ideas"]);
        assert!(state.notes[0].is_pinned);
        assert_eq!(state.bookmarks[0].updated_at, 5);
        assert!(!state.bookmarks[0].is_favorite);
    }

    #[test]
    fn current_version_passes_through() {
        let raw = r#"{"version":1,"notes":[],"bookmarks":[],"theme":"light"}"#;
        assert_eq!(decode_state(raw).unwrap(), AppState::default());
    }

    #[test]
    fn unknown_version_is_rejected() {
        let err = decode_state(r#"{"version":2}"#).unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedVersion(2)));
    }

    #[test]
    fn non_object_is_malformed() {
        assert!(matches!(decode_state("[1,2]"), Err(StoreError::Malformed(_))));
        assert!(matches!(decode_state("nope"), Err(StoreError::Json(_))));
    }
}
