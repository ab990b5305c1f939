use super::colors::AppColor;
use super::Canvas;
use crate::layout::Rect;

/// Cushion shading parameters (van Wijk & van de Wetering 1999).
#[derive(Debug, Clone, Copy)]
pub struct CushionConfig {
    /// Ambient light intensity
    pub ambient: f32,
    /// Diffuse light intensity
    pub diffuse: f32,
    /// Normalized light direction [x, y, z]
    pub light: [f32; 3],
    /// Ridge height of each tile's cushion
    pub height: f32,
}

impl Default for CushionConfig {
    fn default() -> Self {
        let (lx, ly, lz) = (1.0_f32, 2.0, 10.0);
        let len = (lx * lx + ly * ly + lz * lz).sqrt();
        Self {
            ambient: 0.45,
            diffuse: 0.55,
            light: [lx / len, ly / len, lz / len],
            height: 0.5,
        }
    }
}

/// Parabolic ridge coefficients along one axis spanning `[x1, x2]`.
fn ridge(x1: f32, x2: f32, h: f32) -> (f32, f32) {
    let denom = x2 - x1;
    if denom.abs() < 1e-6 {
        return (0.0, 0.0);
    }
    (4.0 * h * (x2 + x1) / denom, -4.0 * h / denom)
}

/// Fill one treemap tile with a Lambert-shaded cushion of `base`.
pub fn shade_tile(canvas: &mut Canvas, rect: Rect, base: AppColor, config: &CushionConfig) {
    let (x0, x1) = (rect.x as f32, rect.right() as f32);
    let (y0, y1) = (rect.y as f32, rect.bottom() as f32);
    let (sx1, sx2) = ridge(x0, x1, config.height);
    let (sy1, sy2) = ridge(y0, y1, config.height);
    let [lx, ly, lz] = config.light;

    let cols = canvas.columns(rect.x, rect.right());
    for py in canvas.rows(rect.y, rect.bottom()) {
        let py_f = py as f32 + 0.5;
        let ny = -(2.0 * sy2 * py_f + sy1);
        for px in cols.clone() {
            let px_f = px as f32 + 0.5;
            let nx = -(2.0 * sx2 * px_f + sx1);

            let dot = nx * lx + ny * ly + lz;
            let n_len = (nx * nx + ny * ny + 1.0).sqrt();
            let cos_theta = (dot / n_len).max(0.0);
            let intensity = config.ambient + config.diffuse * cos_theta;

            canvas.put(px, py, base.scaled(intensity).to_rgb8());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_center_is_brighter_than_far_corner() {
        let mut canvas = Canvas::new(40, 40, [0, 0, 0]);
        let base = AppColor::new(0.6, 0.6, 0.6);
        shade_tile(&mut canvas, Rect::new(0.0, 0.0, 40.0, 40.0), base, &CushionConfig::default());
        let center = canvas.pixel(20, 20)[0];
        let corner = canvas.pixel(39, 39)[0];
        assert!(center > corner, "center {center} corner {corner}");
    }

    #[test]
    fn only_the_tile_is_painted() {
        let mut canvas = Canvas::new(10, 10, [1, 2, 3]);
        let base = AppColor::new(1.0, 1.0, 1.0);
        shade_tile(&mut canvas, Rect::new(0.0, 0.0, 5.0, 10.0), base, &CushionConfig::default());
        assert_ne!(canvas.pixel(2, 5), [1, 2, 3, 255]);
        assert_eq!(canvas.pixel(7, 5), [1, 2, 3, 255]);
    }
}
