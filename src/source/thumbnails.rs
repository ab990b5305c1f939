use image::RgbaImage;
use rayon::prelude::*;

use super::types::ItemId;
use super::ItemSource;
use crate::cluster::Cluster;
use crate::error::TagmapError;

/// Fetch and decode one representative thumbnail per cluster (its first item).
///
/// Result is index-aligned with `clusters`. A cluster whose image cannot be
/// fetched or decoded gets `None` and renders without an overlay.
pub fn load_representatives(
    source: &dyn ItemSource,
    clusters: &[Cluster],
) -> Vec<Option<RgbaImage>> {
    // Fetching goes through the source one at a time; decoding is pure CPU work.
    let fetched: Vec<(ItemId, anyhow::Result<Vec<u8>>)> = clusters
        .iter()
        .map(|cluster| {
            let id = cluster.representative();
            (id, source.fetch_thumbnail(id))
        })
        .collect();

    let decoded: Vec<Result<RgbaImage, TagmapError>> = fetched
        .into_par_iter()
        .map(|(item_id, bytes)| {
            let bytes = bytes.map_err(|e| TagmapError::MissingThumbnail {
                item_id,
                reason: format!("{e:#}"),
            })?;
            image::load_from_memory(&bytes)
                .map(|img| img.to_rgba8())
                .map_err(|e| TagmapError::MissingThumbnail {
                    item_id,
                    reason: e.to_string(),
                })
        })
        .collect();

    let mut missing = 0usize;
    let thumbs: Vec<Option<RgbaImage>> = decoded
        .into_iter()
        .map(|result| match result {
            Ok(img) => Some(img),
            Err(e) => {
                missing += 1;
                tracing::warn!("{}", e);
                None
            }
        })
        .collect();

    tracing::info!(
        "Loaded {} of {} cluster thumbnails",
        thumbs.len() - missing,
        thumbs.len()
    );
    thumbs
}
