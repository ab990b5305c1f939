use crate::cluster::Cluster;

/// Information to display in the tooltip when hovering over a cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipInfo {
    /// Cluster tags joined with ", "
    pub tags: String,
    pub file_count: usize,
}

impl TooltipInfo {
    pub fn lines(&self) -> [String; 2] {
        [
            format!("Tags: {}", self.tags),
            format!("Files: {}", self.file_count),
        ]
    }

    pub fn text(&self) -> String {
        self.lines().join("\n")
    }
}

/// Build tooltip info for a cluster.
pub fn build_tooltip(cluster: &Cluster) -> TooltipInfo {
    TooltipInfo {
        tags: cluster.tags_display(),
        file_count: cluster.size(),
    }
}
