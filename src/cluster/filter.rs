use compact_str::CompactString;
use glob::Pattern;

use crate::error::{Result, TagmapError};
use crate::source::types::Item;

/// A compiled tag pattern.
pub trait TagMatcher {
    fn matches(&self, tag: &str) -> bool;
}

/// Shell-glob matcher: `*` matches any run of characters, `?` exactly one,
/// `[...]` a character class. Case-sensitive, `/` is an ordinary character.
#[derive(Debug, Clone)]
pub struct GlobMatcher {
    pattern: Pattern,
}

impl GlobMatcher {
    pub fn new(pattern: &str) -> Result<Self> {
        let compiled = Pattern::new(&collapse_stars(pattern)).map_err(|e| {
            TagmapError::InvalidInput(format!("bad tag pattern '{pattern}': {e}"))
        })?;
        Ok(Self { pattern: compiled })
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

/// `glob` reserves `**` for whole path components; for tags a run of stars
/// means the same as one.
fn collapse_stars(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if c == '*' && out.ends_with('*') {
            continue;
        }
        out.push(c);
    }
    out
}

impl TagMatcher for GlobMatcher {
    fn matches(&self, tag: &str) -> bool {
        self.pattern.matches(tag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterMode {
    PassThrough,
    Whitelist,
    Blacklist,
}

/// Restricts which tags take part in clustering.
///
/// A non-empty whitelist keeps only matching tags and wins over the
/// blacklist; otherwise a non-empty blacklist removes matching tags.
#[derive(Debug, Clone)]
pub struct TagFilter<M = GlobMatcher> {
    mode: FilterMode,
    matchers: Vec<M>,
}

impl<M: TagMatcher> TagFilter<M> {
    pub fn pass_through() -> Self {
        Self {
            mode: FilterMode::PassThrough,
            matchers: Vec::new(),
        }
    }

    pub fn with_matchers(whitelist: Vec<M>, blacklist: Vec<M>) -> Self {
        if !whitelist.is_empty() {
            Self {
                mode: FilterMode::Whitelist,
                matchers: whitelist,
            }
        } else if !blacklist.is_empty() {
            Self {
                mode: FilterMode::Blacklist,
                matchers: blacklist,
            }
        } else {
            Self::pass_through()
        }
    }

    pub fn is_pass_through(&self) -> bool {
        self.mode == FilterMode::PassThrough
    }

    pub fn keeps(&self, tag: &str) -> bool {
        let hit = || self.matchers.iter().any(|m| m.matches(tag));
        match self.mode {
            FilterMode::PassThrough => true,
            FilterMode::Whitelist => hit(),
            FilterMode::Blacklist => !hit(),
        }
    }

    pub fn apply(&self, tags: &[CompactString]) -> Vec<CompactString> {
        tags.iter().filter(|t| self.keeps(t)).cloned().collect()
    }

    pub fn apply_item(&self, item: &Item) -> Item {
        Item {
            id: item.id,
            tags: self.apply(&item.tags),
        }
    }
}

impl TagFilter<GlobMatcher> {
    pub fn from_globs(whitelist: &[String], blacklist: &[String]) -> Result<Self> {
        let compile = |patterns: &[String]| -> Result<Vec<GlobMatcher>> {
            patterns.iter().map(|p| GlobMatcher::new(p)).collect()
        };
        let whitelist = compile(whitelist)?;
        // Blacklist is ignored when a whitelist is present, but a typo in it is still reported.
        let blacklist = compile(blacklist)?;
        if !whitelist.is_empty() && !blacklist.is_empty() {
            tracing::warn!("Both whitelist and blacklist given; the blacklist is ignored");
        }
        Ok(Self::with_matchers(whitelist, blacklist))
    }
}

impl Default for TagFilter<GlobMatcher> {
    fn default() -> Self {
        Self::pass_through()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<CompactString> {
        list.iter().map(|t| CompactString::new(t)).collect()
    }

    fn globs(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn glob_semantics() {
        let star = GlobMatcher::new("page:*").unwrap();
        assert!(star.matches("page:"));
        assert!(star.matches("page:12"));
        assert!(!star.matches("Page:12"));
        assert!(!star.matches("pages:1"));

        let one = GlobMatcher::new("vol?").unwrap();
        assert!(one.matches("vol1"));
        assert!(!one.matches("vol"));
        assert!(!one.matches("vol12"));

        let slash = GlobMatcher::new("path:*").unwrap();
        assert!(slash.matches("path:a/b/c"));
    }

    #[test]
    fn repeated_stars_match_like_one() {
        let single = GlobMatcher::new("page:*").unwrap();
        let double = GlobMatcher::new("page:**").unwrap();
        for tag in ["page:", "page:12", "page:a/b", "Page:12", "pages:1", "title:x"] {
            assert_eq!(single.matches(tag), double.matches(tag), "{tag}");
        }

        let inner = GlobMatcher::new("a**b").unwrap();
        assert!(inner.matches("ab"));
        assert!(inner.matches("a/x/b"));
        assert!(!inner.matches("ba"));

        let filter = TagFilter::from_globs(&[], &globs(&["title:**"])).unwrap();
        assert_eq!(filter.apply(&tags(&["title:x", "creator:y"])), tags(&["creator:y"]));
    }

    #[test]
    fn bad_pattern_is_invalid_input() {
        let err = GlobMatcher::new("[unclosed").unwrap_err();
        assert!(matches!(err, TagmapError::InvalidInput(_)));
    }

    #[test]
    fn whitelist_keeps_only_matches() {
        let filter = TagFilter::from_globs(&globs(&["thread:*"]), &[]).unwrap();
        let out = filter.apply(&tags(&["thread:42", "page:1", "thread:7"]));
        assert_eq!(out, tags(&["thread:42", "thread:7"]));
    }

    #[test]
    fn blacklist_drops_matches() {
        let filter =
            TagFilter::from_globs(&[], &globs(&["page:*", "filename:*", "title:*"])).unwrap();
        let out = filter.apply(&tags(&["page:3", "blue sky", "title:x", "beach"]));
        assert_eq!(out, tags(&["blue sky", "beach"]));
    }

    #[test]
    fn whitelist_takes_precedence() {
        let filter = TagFilter::from_globs(&globs(&["a*"]), &globs(&["a1"])).unwrap();
        assert_eq!(filter.apply(&tags(&["a1", "b1"])), tags(&["a1"]));
    }

    #[test]
    fn no_patterns_leave_tags_unchanged() {
        let filter = TagFilter::from_globs(&[], &[]).unwrap();
        assert!(filter.is_pass_through());
        let input = tags(&["z", "a", "a"]);
        assert_eq!(filter.apply(&input), input);
    }

    #[test]
    fn filter_can_empty_an_item() {
        let filter = TagFilter::from_globs(&globs(&["series:*"]), &[]).unwrap();
        let item = Item::new(9, ["page:1", "rating:safe"]);
        let out = filter.apply_item(&item);
        assert_eq!(out.id, 9);
        assert!(out.tags.is_empty());
    }
}
