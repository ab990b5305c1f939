use compact_str::CompactString;

/// Identifier of a tagged item in the host library.
pub type ItemId = u64;

/// A tagged item as delivered by an [`ItemSource`](super::ItemSource).
///
/// Tags are treated as a set: order and duplicates carry no meaning, the
/// cluster engine canonicalizes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub tags: Vec<CompactString>,
}

impl Item {
    pub fn new<I, S>(id: ItemId, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        Self {
            id,
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }
}
