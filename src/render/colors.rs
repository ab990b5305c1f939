use compact_str::CompactString;

/// Our custom color representation for easy manipulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl AppColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    pub fn scaled(self, intensity: f32) -> Self {
        Self {
            r: (self.r * intensity).clamp(0.0, 1.0),
            g: (self.g * intensity).clamp(0.0, 1.0),
            b: (self.b * intensity).clamp(0.0, 1.0),
        }
    }
}

/// Tiles for clusters whose tags were all filtered away.
pub const UNTAGGED: AppColor = AppColor::new(0.50, 0.50, 0.55);

/// Stable per-cluster color: hue from a hash of the tag set.
pub fn cluster_color(tags: &[CompactString], vibrancy: f32) -> AppColor {
    if tags.is_empty() {
        return UNTAGGED;
    }
    let mut h: u32 = 2166136261;
    for tag in tags {
        for &b in tag.as_bytes() {
            h ^= b as u32;
            h = h.wrapping_mul(16777619);
        }
        // Separator so ["ab"] and ["a", "b"] differ.
        h ^= 0x1f;
        h = h.wrapping_mul(16777619);
    }
    let hue = ((h >> 8) as f32) / ((u32::MAX >> 8) as f32);
    let sat = 0.50 + ((h & 0xFF) as f32 / 255.0) * 0.20;
    apply_vibrancy(hsv_to_rgb(hue, sat, 0.86), vibrancy)
}

fn apply_vibrancy(color: AppColor, vibrancy: f32) -> AppColor {
    let (h, s, v) = rgb_to_hsv(color);
    hsv_to_rgb(h, (s * vibrancy.clamp(0.6, 2.0)).clamp(0.0, 1.0), v)
}

fn rgb_to_hsv(c: AppColor) -> (f32, f32, f32) {
    let max = c.r.max(c.g.max(c.b));
    let min = c.r.min(c.g.min(c.b));
    let d = max - min;
    let h = if d <= 1e-6 {
        0.0
    } else if (max - c.r).abs() <= 1e-6 {
        ((c.g - c.b) / d).rem_euclid(6.0) / 6.0
    } else if (max - c.g).abs() <= 1e-6 {
        (((c.b - c.r) / d) + 2.0) / 6.0
    } else {
        (((c.r - c.g) / d) + 4.0) / 6.0
    };
    let s = if max <= 1e-6 { 0.0 } else { d / max };
    (h, s, max)
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> AppColor {
    let h6 = (h * 6.0).rem_euclid(6.0);
    let i = h6.floor() as i32;
    let f = h6 - i as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    let (r, g, b) = match i {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    AppColor { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<CompactString> {
        list.iter().map(|t| CompactString::new(t)).collect()
    }

    #[test]
    fn same_tags_same_color() {
        assert_eq!(
            cluster_color(&tags(&["a", "b"]), 1.0),
            cluster_color(&tags(&["a", "b"]), 1.0)
        );
        assert_ne!(
            cluster_color(&tags(&["ab"]), 1.0),
            cluster_color(&tags(&["a", "b"]), 1.0)
        );
    }

    #[test]
    fn untagged_is_neutral() {
        assert_eq!(cluster_color(&[], 1.0), UNTAGGED);
    }

    #[test]
    fn hsv_round_trip_of_primary() {
        let red = hsv_to_rgb(0.0, 1.0, 1.0);
        assert_eq!(red.to_rgb8(), [255, 0, 0]);
        let (h, s, v) = rgb_to_hsv(red);
        assert!(h.abs() < 1e-6 && (s - 1.0).abs() < 1e-6 && (v - 1.0).abs() < 1e-6);
    }
}
