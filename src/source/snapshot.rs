use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use compact_str::CompactString;
use serde::Deserialize;

use super::types::{Item, ItemId};
use super::ItemSource;
use crate::cluster::filter::{GlobMatcher, TagMatcher};

/// Query terms with this prefix are search predicates of the host library
/// (inbox, archive, tag counts...) and cannot be evaluated against a snapshot.
const SYSTEM_PREFIX: &str = "system:";

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    items: Vec<SnapshotEntry>,
}

#[derive(Debug, Deserialize)]
struct SnapshotEntry {
    id: ItemId,
    #[serde(default)]
    tags: Vec<CompactString>,
    #[serde(default)]
    thumbnail: Option<PathBuf>,
}

/// Item source backed by a JSON export of the library:
///
/// ```json
/// {"items": [{"id": 1, "tags": ["series:x", "page:2"], "thumbnail": "thumbs/1.jpg"}]}
/// ```
///
/// Thumbnail paths are resolved relative to the snapshot file.
pub struct SnapshotSource {
    items: Vec<Item>,
    thumbnails: HashMap<ItemId, PathBuf>,
}

impl SnapshotSource {
    pub fn open(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading snapshot {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let source = Self::from_json(&text, base)
            .with_context(|| format!("parsing snapshot {}", path.display()))?;
        tracing::info!(
            "Loaded snapshot {}: {} items, {} thumbnails",
            path.display(),
            source.items.len(),
            source.thumbnails.len()
        );
        Ok(source)
    }

    pub fn from_json(text: &str, base: &Path) -> Result<Self> {
        let file: SnapshotFile = serde_json::from_str(text)?;
        let mut items = Vec::with_capacity(file.items.len());
        let mut thumbnails = HashMap::new();
        for entry in file.items {
            if let Some(thumb) = entry.thumbnail {
                thumbnails.insert(entry.id, base.join(thumb));
            }
            items.push(Item {
                id: entry.id,
                tags: entry.tags,
            });
        }
        Ok(Self { items, thumbnails })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemSource for SnapshotSource {
    fn fetch(&self, query: &[String]) -> Result<Vec<Item>> {
        let mut terms = Vec::with_capacity(query.len());
        for term in query {
            if term.starts_with(SYSTEM_PREFIX) {
                tracing::debug!("Ignoring host search predicate '{}'", term);
                continue;
            }
            terms.push(GlobMatcher::new(term)?);
        }

        let matched: Vec<Item> = self
            .items
            .iter()
            .filter(|item| {
                terms
                    .iter()
                    .all(|term| item.tags.iter().any(|tag| term.matches(tag)))
            })
            .cloned()
            .collect();

        tracing::info!(
            "Query {:?} matched {} of {} items",
            query,
            matched.len(),
            self.items.len()
        );
        Ok(matched)
    }

    fn fetch_thumbnail(&self, id: ItemId) -> Result<Vec<u8>> {
        let path = self
            .thumbnails
            .get(&id)
            .with_context(|| format!("item {id} has no thumbnail in the snapshot"))?;
        std::fs::read(path).with_context(|| format!("reading thumbnail {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "items": [
            {"id": 1, "tags": ["character:samus aran", "page:1"], "thumbnail": "t/1.png"},
            {"id": 2, "tags": ["character:samus aran", "series:metroid"]},
            {"id": 3, "tags": ["series:metroid"]},
            {"id": 4}
        ]
    }"#;

    fn source() -> SnapshotSource {
        SnapshotSource::from_json(SNAPSHOT, Path::new("/data")).unwrap()
    }

    #[test]
    fn empty_query_returns_everything() {
        let items = source().fetch(&[]).unwrap();
        assert_eq!(items.len(), 4);
        assert!(items[3].tags.is_empty());
    }

    #[test]
    fn every_term_must_match_some_tag() {
        let query = vec!["character:*".to_string(), "series:metroid".to_string()];
        let ids: Vec<ItemId> = source().fetch(&query).unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn system_predicates_are_ignored() {
        let query = vec!["system:inbox".to_string(), "series:*".to_string()];
        let ids: Vec<ItemId> = source().fetch(&query).unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn thumbnail_paths_resolve_against_snapshot_dir() {
        let src = source();
        assert_eq!(src.thumbnails.get(&1), Some(&PathBuf::from("/data/t/1.png")));
        assert!(src.fetch_thumbnail(2).is_err());
    }
}
