pub mod fit;
pub mod squarify;

use crate::cluster::Cluster;
use crate::error::{Result, TagmapError};

pub use self::fit::fit_thumbnail;
pub use self::squarify::squarify;

/// Axis-aligned rectangle in viewport coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn short_side(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Both extents strictly positive and finite.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Closed-interval containment: points on the edge are inside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// A positioned rectangle bound to the cluster it represents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRect {
    /// Index into the cluster list the layout was computed from.
    pub cluster: usize,
    pub rect: Rect,
}

/// Treemap geometry for one viewport. `rects[i].cluster == i`.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub rects: Vec<LayoutRect>,
}

/// Lay the clusters out in the given order, area proportional to size.
pub fn compute_layout(clusters: &[Cluster], bounds: Rect) -> Result<Layout> {
    let sizes: Vec<f64> = clusters.iter().map(|c| c.size() as f64).collect();
    let rects = squarify(&sizes, bounds)?
        .into_iter()
        .enumerate()
        .map(|(cluster, rect)| LayoutRect { cluster, rect })
        .collect::<Vec<_>>();

    tracing::debug!(
        "Layout computed: {} rects in {:.0}x{:.0}",
        rects.len(),
        bounds.width,
        bounds.height
    );
    Ok(Layout { rects })
}

/// The ordered cluster list together with the layout computed from it.
///
/// Keeps the two index-aligned: the layout is only ever replaced by one
/// computed from the same clusters.
#[derive(Debug, Clone)]
pub struct Treemap {
    clusters: Vec<Cluster>,
    layout: Layout,
    bounds: Option<Rect>,
}

impl Treemap {
    /// Clusters without geometry yet; call [`Treemap::relayout`] once the viewport is known.
    pub fn new(clusters: Vec<Cluster>) -> Self {
        Self {
            clusters,
            layout: Layout::default(),
            bounds: None,
        }
    }

    pub fn with_bounds(clusters: Vec<Cluster>, bounds: Rect) -> Result<Self> {
        let mut treemap = Self::new(clusters);
        treemap.relayout(bounds)?;
        Ok(treemap)
    }

    pub fn relayout(&mut self, bounds: Rect) -> Result<()> {
        if !self.clusters.is_empty() && !bounds.is_valid() {
            return Err(TagmapError::InvalidInput(format!(
                "viewport too small for a treemap: {}x{}",
                bounds.width, bounds.height
            )));
        }
        self.layout = compute_layout(&self.clusters, bounds)?;
        self.bounds = Some(bounds);
        Ok(())
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn cluster(&self, index: usize) -> Option<&Cluster> {
        self.clusters.get(index)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Cluster index under the point, first match in rect order.
    pub fn cluster_at(&self, x: f64, y: f64) -> Option<usize> {
        crate::ui::input::hit_test(&self.layout.rects, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(id: usize, size: usize) -> Cluster {
        Cluster {
            cluster_id: id,
            tags: vec![format!("t{id}").into()],
            item_ids: (0..size as u64).collect(),
        }
    }

    #[test]
    fn rects_are_index_aligned_with_clusters() {
        let clusters = vec![cluster(0, 6), cluster(1, 6), cluster(2, 4), cluster(3, 3)];
        let layout = compute_layout(&clusters, Rect::new(0.0, 0.0, 600.0, 400.0)).unwrap();
        assert_eq!(layout.rects.len(), 4);
        for (i, r) in layout.rects.iter().enumerate() {
            assert_eq!(r.cluster, i);
        }
        let total = 19.0;
        for (r, c) in layout.rects.iter().zip(&clusters) {
            let want = c.size() as f64 / total * 240_000.0;
            assert!((r.rect.area() - want).abs() < 1e-6);
        }
    }

    #[test]
    fn empty_treemap_accepts_any_viewport() {
        let mut treemap = Treemap::new(Vec::new());
        treemap.relayout(Rect::new(0.0, 0.0, 0.0, 0.0)).unwrap();
        assert!(treemap.layout().rects.is_empty());
        assert_eq!(treemap.cluster_at(0.0, 0.0), None);
    }

    #[test]
    fn relayout_rejects_collapsed_viewport() {
        let mut treemap = Treemap::with_bounds(vec![cluster(0, 2)], Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert!(treemap.relayout(Rect::new(0.0, 0.0, 10.0, -3.0)).is_err());
        // Previous geometry survives a rejected relayout.
        assert_eq!(treemap.cluster_at(5.0, 5.0), Some(0));
    }

    #[test]
    fn rect_contains_is_closed() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert!(r.contains(1.0, 2.0));
        assert!(r.contains(4.0, 6.0));
        assert!(!r.contains(4.0001, 6.0));
        assert!(!r.contains(0.9999, 3.0));
    }
}
