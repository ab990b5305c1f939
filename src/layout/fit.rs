use super::Rect;
use crate::error::{Result, TagmapError};

/// Default inset around a thumbnail, as a fraction of its fitted size per side.
pub const DEFAULT_PADDING: f64 = 0.04;

/// Place an image of `image_size` inside `rect`: scaled to fit while keeping
/// its aspect ratio, shrunk by `padding` on each side, and centered.
pub fn fit_thumbnail(image_size: (f64, f64), rect: Rect, padding: f64) -> Result<Rect> {
    let (img_w, img_h) = image_size;
    if !(img_w > 0.0 && img_h > 0.0) {
        return Err(TagmapError::InvalidInput(format!(
            "image must have positive size, got {img_w}x{img_h}"
        )));
    }
    if !rect.is_valid() {
        return Err(TagmapError::InvalidInput(format!(
            "target rect must have positive size, got {}x{}",
            rect.width, rect.height
        )));
    }
    if !(0.0..0.5).contains(&padding) {
        return Err(TagmapError::InvalidInput(format!(
            "padding must be in [0, 0.5), got {padding}"
        )));
    }

    let scale = (rect.width / img_w).min(rect.height / img_h);
    let shrink = 1.0 - 2.0 * padding;
    let width = img_w * scale * shrink;
    let height = img_h * scale * shrink;

    Ok(Rect::new(
        rect.x + (rect.width - width) / 2.0,
        rect.y + (rect.height - height) / 2.0,
        width,
        height,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn wide_image_is_limited_by_width() {
        let rect = Rect::new(10.0, 20.0, 100.0, 100.0);
        let placed = fit_thumbnail((200.0, 100.0), rect, 0.0).unwrap();
        assert_eq!(placed, Rect::new(10.0, 45.0, 100.0, 50.0));
    }

    #[test]
    fn padding_shrinks_symmetrically() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let placed = fit_thumbnail((100.0, 50.0), rect, 0.1).unwrap();
        assert!((placed.width - 80.0).abs() < 1e-9);
        assert!((placed.height - 40.0).abs() < 1e-9);
        assert!((placed.x - 10.0).abs() < 1e-9);
        assert!((placed.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn small_image_scales_up_to_fit() {
        let placed = fit_thumbnail((10.0, 10.0), Rect::new(0.0, 0.0, 40.0, 80.0), 0.0).unwrap();
        assert_eq!(placed, Rect::new(0.0, 20.0, 40.0, 40.0));
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(fit_thumbnail((0.0, 5.0), rect, 0.04).is_err());
        assert!(fit_thumbnail((5.0, -1.0), rect, 0.04).is_err());
        assert!(fit_thumbnail((5.0, 5.0), Rect::new(0.0, 0.0, 0.0, 10.0), 0.04).is_err());
        assert!(fit_thumbnail((5.0, 5.0), rect, 0.5).is_err());
        assert!(fit_thumbnail((5.0, 5.0), rect, -0.1).is_err());
    }

    proptest! {
        #[test]
        fn placement_stays_inside_and_keeps_aspect(
            img_w in 1.0f64..4000.0,
            img_h in 1.0f64..4000.0,
            x in -500.0f64..500.0,
            y in -500.0f64..500.0,
            w in 1.0f64..2000.0,
            h in 1.0f64..2000.0,
            padding in 0.0f64..0.49,
        ) {
            let rect = Rect::new(x, y, w, h);
            let placed = fit_thumbnail((img_w, img_h), rect, padding).unwrap();
            let tol = 1e-9 * (1.0 + x.abs() + y.abs() + w + h);
            prop_assert!(placed.x >= rect.x - tol);
            prop_assert!(placed.y >= rect.y - tol);
            prop_assert!(placed.right() <= rect.right() + tol);
            prop_assert!(placed.bottom() <= rect.bottom() + tol);
            let want = img_w / img_h;
            let got = placed.width / placed.height;
            prop_assert!((got - want).abs() <= 1e-9 * want.max(1.0 / want));
        }
    }
}
