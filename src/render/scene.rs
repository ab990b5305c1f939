use image::imageops::{self, FilterType};
use image::RgbaImage;
use rayon::prelude::*;

use super::colors::cluster_color;
use super::cushion::shade_tile;
use super::Canvas;
use crate::config::RenderConfig;
use crate::layout::{fit_thumbnail, Treemap};

/// Scaled thumbnail ready to composite at `(x, y)`.
struct PlacedThumbnail {
    x: i64,
    y: i64,
    image: RgbaImage,
}

/// CPU-rasterize the static part of the treemap: shaded tiles, fitted
/// thumbnails and tile edges. Overlays are drawn per frame on a copy.
///
/// `thumbnails` is index-aligned with the treemap's clusters; it may be
/// empty when thumbnails are disabled.
pub fn rasterize_treemap(
    width: u32,
    height: u32,
    treemap: &Treemap,
    thumbnails: &[Option<RgbaImage>],
    config: &RenderConfig,
) -> Canvas {
    let mut canvas = Canvas::new(width, height, config.background);
    let rects = &treemap.layout().rects;

    for lr in rects {
        let Some(cluster) = treemap.cluster(lr.cluster) else {
            continue;
        };
        let base = cluster_color(&cluster.tags, config.vibrancy);
        shade_tile(&mut canvas, lr.rect, base, &config.cushion);
    }

    let placed: Vec<PlacedThumbnail> = rects
        .par_iter()
        .filter_map(|lr| {
            let img = thumbnails.get(lr.cluster)?.as_ref()?;
            let (w, h) = img.dimensions();
            let placement =
                match fit_thumbnail((w as f64, h as f64), lr.rect, config.thumbnail_padding) {
                    Ok(p) => p,
                    Err(e) => {
                        tracing::debug!("Skipping thumbnail of cluster {}: {}", lr.cluster, e);
                        return None;
                    }
                };
            let pw = placement.width.round() as u32;
            let ph = placement.height.round() as u32;
            if pw == 0 || ph == 0 {
                return None;
            }
            Some(PlacedThumbnail {
                x: placement.x.round() as i64,
                y: placement.y.round() as i64,
                image: imageops::resize(img, pw, ph, FilterType::Triangle),
            })
        })
        .collect();

    for thumb in &placed {
        canvas.blit(&thumb.image, thumb.x, thumb.y);
    }

    let edge = if thumbnails.is_empty() {
        config.edge_width
    } else {
        config.edge_width_thumbs
    };
    for lr in rects {
        canvas.stroke_rect(lr.rect, edge, config.edge_color);
    }

    tracing::debug!(
        "Treemap rasterized: {}x{}, {} tiles, {} thumbnails",
        width,
        height,
        rects.len(),
        placed.len()
    );
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::Cluster;
    use crate::layout::Rect;

    fn treemap() -> Treemap {
        let clusters = vec![
            Cluster { cluster_id: 0, tags: vec!["a".into()], item_ids: vec![1, 2, 3] },
            Cluster { cluster_id: 1, tags: vec!["b".into()], item_ids: vec![4] },
        ];
        Treemap::with_bounds(clusters, Rect::new(0.0, 0.0, 80.0, 40.0)).unwrap()
    }

    #[test]
    fn thumbnail_lands_inside_its_tile() {
        let tm = treemap();
        let magenta = RgbaImage::from_pixel(10, 10, image::Rgba([255, 0, 255, 255]));
        let thumbs = vec![Some(magenta), None];
        let canvas = rasterize_treemap(80, 40, &tm, &thumbs, &RenderConfig::default());

        let tile = tm.layout().rects[0].rect;
        let cx = (tile.x + tile.width / 2.0) as u32;
        let cy = (tile.y + tile.height / 2.0) as u32;
        assert_eq!(canvas.pixel(cx, cy), [255, 0, 255, 255]);

        let other = tm.layout().rects[1].rect;
        let ox = (other.x + other.width / 2.0) as u32;
        let oy = (other.y + other.height / 2.0) as u32;
        assert_ne!(canvas.pixel(ox, oy), [255, 0, 255, 255]);
    }

    #[test]
    fn edges_are_drawn() {
        let tm = treemap();
        let config = RenderConfig::default();
        let canvas = rasterize_treemap(80, 40, &tm, &[], &config);
        let [r, g, b, _] = config.edge_color;
        assert_eq!(canvas.pixel(0, 0), [r, g, b, 255]);
    }

    #[test]
    fn empty_treemap_is_background() {
        let tm = Treemap::new(Vec::new());
        let config = RenderConfig::default();
        let canvas = rasterize_treemap(8, 8, &tm, &[], &config);
        let [r, g, b] = config.background;
        assert!(canvas.pixels().chunks_exact(4).all(|p| p == [r, g, b, 255]));
    }
}
