pub mod filter;

use std::collections::HashMap;

use compact_str::CompactString;

use self::filter::{TagFilter, TagMatcher};
use crate::source::types::{Item, ItemId};

/// A maximal group of items sharing an identical tag set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    /// Position of this cluster's key in first-seen order of the clustering run.
    pub cluster_id: usize,
    /// Sorted, deduplicated tag set shared by every member.
    pub tags: Vec<CompactString>,
    /// Member ids in input order. Never empty.
    pub item_ids: Vec<ItemId>,
}

impl Cluster {
    pub fn size(&self) -> usize {
        self.item_ids.len()
    }

    /// Item whose thumbnail stands in for the whole cluster.
    pub fn representative(&self) -> ItemId {
        self.item_ids[0]
    }

    pub fn tags_display(&self) -> String {
        self.tags.join(", ")
    }
}

/// Canonical grouping key: the tag set sorted lexicographically, duplicates removed.
pub fn canonical_tags(tags: &[CompactString]) -> Vec<CompactString> {
    let mut key = tags.to_vec();
    key.sort_unstable();
    key.dedup();
    key
}

/// Group items by exact tag set. Cluster ids follow first-seen order of the keys.
///
/// Items with an empty tag set share the empty key and land in one cluster.
pub fn cluster_items(items: &[Item]) -> Vec<Cluster> {
    let mut index: HashMap<Vec<CompactString>, usize> = HashMap::new();
    let mut clusters: Vec<Cluster> = Vec::new();

    for item in items {
        let key = canonical_tags(&item.tags);
        if let Some(&idx) = index.get(&key) {
            clusters[idx].item_ids.push(item.id);
            continue;
        }
        let cluster_id = clusters.len();
        index.insert(key.clone(), cluster_id);
        clusters.push(Cluster {
            cluster_id,
            tags: key,
            item_ids: vec![item.id],
        });
    }

    clusters
}

/// Drop clusters smaller than `minimum_size`, then order by size, largest first.
/// Equal sizes keep their first-seen order.
pub fn select_clusters(mut clusters: Vec<Cluster>, minimum_size: usize) -> Vec<Cluster> {
    clusters.retain(|c| c.size() >= minimum_size);
    clusters.sort_by(|a, b| b.size().cmp(&a.size()));
    clusters
}

/// Full preparation pipeline: skip untagged items, filter tags, cluster, select.
pub fn build_clusters<M: TagMatcher>(
    items: &[Item],
    filter: &TagFilter<M>,
    minimum_size: usize,
) -> Vec<Cluster> {
    let tagged: Vec<Item> = items
        .iter()
        .filter(|item| !item.tags.is_empty())
        .map(|item| filter.apply_item(item))
        .collect();
    let skipped = items.len() - tagged.len();
    if skipped > 0 {
        tracing::info!("Skipped {} items without tags", skipped);
    }

    let clusters = cluster_items(&tagged);
    let total = clusters.len();
    let selected = select_clusters(clusters, minimum_size);
    tracing::info!(
        "Clustered {} items into {} tag sets, {} with at least {} items",
        tagged.len(),
        total,
        selected.len(),
        minimum_size
    );
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::{BTreeSet, HashSet};

    fn scenario_a() -> Vec<Item> {
        vec![
            Item::new(1, ["a", "b"]),
            Item::new(2, ["b", "a"]),
            Item::new(3, ["c"]),
        ]
    }

    fn tags(list: &[&str]) -> Vec<CompactString> {
        list.iter().map(|t| CompactString::new(t)).collect()
    }

    #[test]
    fn same_tag_set_in_any_order_forms_one_cluster() {
        let clusters = cluster_items(&scenario_a());
        assert_eq!(clusters.len(), 2);

        assert_eq!(clusters[0].cluster_id, 0);
        assert_eq!(clusters[0].tags, tags(&["a", "b"]));
        assert_eq!(clusters[0].item_ids, vec![1, 2]);
        assert_eq!(clusters[0].size(), 2);

        assert_eq!(clusters[1].cluster_id, 1);
        assert_eq!(clusters[1].tags, tags(&["c"]));
        assert_eq!(clusters[1].item_ids, vec![3]);
        assert_eq!(clusters[1].size(), 1);
    }

    #[test]
    fn minimum_size_drops_small_clusters() {
        let selected = select_clusters(cluster_items(&scenario_a()), 2);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].tags, tags(&["a", "b"]));
        assert_eq!(selected[0].item_ids, vec![1, 2]);
    }

    #[test]
    fn ids_follow_first_seen_order_not_key_order() {
        let items = vec![
            Item::new(1, ["zebra"]),
            Item::new(2, ["apple"]),
            Item::new(3, ["zebra"]),
        ];
        let clusters = cluster_items(&items);
        assert_eq!(clusters[0].tags, tags(&["zebra"]));
        assert_eq!(clusters[1].tags, tags(&["apple"]));
    }

    #[test]
    fn duplicate_tags_collapse() {
        let items = vec![Item::new(1, ["x", "x", "y"]), Item::new(2, ["y", "x"])];
        let clusters = cluster_items(&items);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].tags, tags(&["x", "y"]));
    }

    #[test]
    fn empty_tag_sets_group_together() {
        let items = vec![
            Item::new(1, Vec::<&str>::new()),
            Item::new(2, ["a"]),
            Item::new(3, Vec::<&str>::new()),
        ];
        let clusters = cluster_items(&items);
        assert_eq!(clusters.len(), 2);
        assert!(clusters[0].tags.is_empty());
        assert_eq!(clusters[0].item_ids, vec![1, 3]);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let items = vec![
            Item::new(1, ["p"]),
            Item::new(2, ["q"]),
            Item::new(3, ["r"]),
            Item::new(4, ["r"]),
            Item::new(5, ["q"]),
        ];
        let selected = select_clusters(cluster_items(&items), 1);
        let order: Vec<&str> = selected.iter().map(|c| c.tags[0].as_str()).collect();
        assert_eq!(order, vec!["q", "r", "p"]);
    }

    #[test]
    fn empty_selection_is_fine() {
        assert!(select_clusters(cluster_items(&scenario_a()), 10).is_empty());
        assert!(cluster_items(&[]).is_empty());
    }

    #[test]
    fn pipeline_skips_untagged_but_keeps_filtered_to_empty() {
        let items = vec![
            Item::new(1, Vec::<&str>::new()),
            Item::new(2, ["page:1"]),
            Item::new(3, ["page:2"]),
            Item::new(4, ["beach", "page:3"]),
        ];
        let filter = TagFilter::from_globs(&[], &["page:*".to_string()]).unwrap();
        let clusters = build_clusters(&items, &filter, 1);
        assert_eq!(clusters.len(), 2);
        assert!(clusters[0].tags.is_empty());
        assert_eq!(clusters[0].item_ids, vec![2, 3]);
        assert_eq!(clusters[1].tags, tags(&["beach"]));
        assert!(clusters.iter().all(|c| !c.item_ids.contains(&1)));
    }

    fn arb_items() -> impl Strategy<Value = Vec<Item>> {
        let tag = prop::sample::select(vec!["a", "b", "c", "d", "e"]);
        prop::collection::vec(prop::collection::vec(tag, 0..4), 0..40).prop_map(|sets| {
            sets.into_iter()
                .enumerate()
                .map(|(i, tags)| Item::new(i as ItemId, tags))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn clusters_partition_items(items in arb_items()) {
            let clusters = cluster_items(&items);

            let mut seen = HashSet::new();
            for cluster in &clusters {
                prop_assert!(cluster.size() >= 1);
                for id in &cluster.item_ids {
                    prop_assert!(seen.insert(*id), "item {} in two clusters", id);
                    let member = &items[*id as usize];
                    let member_set: BTreeSet<&str> = member.tags.iter().map(|t| t.as_str()).collect();
                    let expected: Vec<&str> = member_set.into_iter().collect();
                    let actual: Vec<&str> = cluster.tags.iter().map(|t| t.as_str()).collect();
                    prop_assert_eq!(actual, expected);
                }
            }
            prop_assert_eq!(seen.len(), items.len());

            let keys: HashSet<&Vec<CompactString>> = clusters.iter().map(|c| &c.tags).collect();
            prop_assert_eq!(keys.len(), clusters.len());
        }

        #[test]
        fn selection_is_sorted_and_stable(items in arb_items(), min in 0usize..4) {
            let clusters = cluster_items(&items);
            let selected = select_clusters(clusters, min);
            for pair in selected.windows(2) {
                prop_assert!(pair[0].size() >= pair[1].size());
                if pair[0].size() == pair[1].size() {
                    prop_assert!(pair[0].cluster_id < pair[1].cluster_id);
                }
            }
            prop_assert!(selected.iter().all(|c| c.size() >= min));
        }
    }
}
