use super::Rect;
use crate::error::{Result, TagmapError};

/// Order-preserving squarified treemap (Bruls, Huizing, van Wijk).
///
/// Returns one rectangle per size, index-aligned with `sizes`, together
/// tiling `bounds` exactly. Sizes are not re-sorted: the caller decides the
/// order, and `result[i]` always belongs to `sizes[i]`.
pub fn squarify(sizes: &[f64], bounds: Rect) -> Result<Vec<Rect>> {
    if let Some((index, value)) = sizes
        .iter()
        .copied()
        .enumerate()
        .find(|(_, s)| !(s.is_finite() && *s > 0.0))
    {
        return Err(TagmapError::InvalidInput(format!(
            "treemap size #{index} must be positive, got {value}"
        )));
    }
    if sizes.is_empty() {
        return Ok(Vec::new());
    }
    if !bounds.is_valid() {
        return Err(TagmapError::InvalidInput(format!(
            "treemap bounds must have positive extent, got {}x{}",
            bounds.width, bounds.height
        )));
    }

    // Normalize sizes to areas filling the bounds.
    let total: f64 = sizes.iter().sum();
    let scale = bounds.area() / total;
    let areas: Vec<f64> = sizes.iter().map(|s| s * scale).collect();

    let mut result = Vec::with_capacity(areas.len());
    let mut remaining = bounds;
    let mut start = 0;

    while start < areas.len() {
        let rest = &areas[start..];
        if rest.len() == 1 {
            result.push(remaining);
            break;
        }

        let take = best_prefix(rest, remaining);
        let last = take == rest.len();
        remaining = layout_strip(&rest[..take], remaining, last, &mut result);
        start += take;
        if start < areas.len() && !remaining.is_valid() {
            return Err(too_disparate(start));
        }
    }

    // Floating-point collapse: a tiny item next to a huge one can round to
    // zero extent even when the leftover bounds did not.
    if let Some(index) = result.iter().position(|r| !r.is_valid()) {
        return Err(too_disparate(index));
    }

    Ok(result)
}

fn too_disparate(index: usize) -> TagmapError {
    TagmapError::InvalidInput(format!(
        "treemap sizes too disparate to tile: item #{index} would have no area"
    ))
}

/// Length of the prefix to pack into the next strip: extend one item at a
/// time while the worst aspect ratio strictly improves.
fn best_prefix(areas: &[f64], bounds: Rect) -> usize {
    let mut take = 1;
    let mut score = worst_aspect_ratio(&areas[..1], bounds.short_side());
    while take < areas.len() {
        let next = worst_aspect_ratio(&areas[..take + 1], bounds.short_side());
        if next < score {
            score = next;
            take += 1;
        } else {
            break;
        }
    }
    take
}

/// Worst `max(w/h, h/w)` over the rectangles a strip of `row` would produce
/// when laid along a side of length `side`.
fn worst_aspect_ratio(row: &[f64], side: f64) -> f64 {
    let sum: f64 = row.iter().sum();
    if sum <= 0.0 || side <= 0.0 {
        return f64::MAX;
    }
    let thickness = sum / side;
    row.iter()
        .map(|&area| {
            let length = area / thickness;
            (thickness / length).max(length / thickness)
        })
        .fold(0.0, f64::max)
}

/// Lay `row` out as a strip along the shorter side of `bounds` and return
/// the bounds left over. The last rect of the strip, and the strip itself
/// when it is the final one, end flush with the bounds.
fn layout_strip(row: &[f64], bounds: Rect, last: bool, out: &mut Vec<Rect>) -> Rect {
    let sum: f64 = row.iter().sum();
    let column = bounds.width >= bounds.height;

    if column {
        // Strip is a column on the left, items stacked top to bottom.
        let thickness = if last { bounds.width } else { sum / bounds.height };
        let mut y = bounds.y;
        for (i, &area) in row.iter().enumerate() {
            let height = if i + 1 == row.len() {
                bounds.bottom() - y
            } else {
                area / thickness
            };
            out.push(Rect::new(bounds.x, y, thickness, height));
            y += height;
        }
        Rect::new(
            bounds.x + thickness,
            bounds.y,
            (bounds.width - thickness).max(0.0),
            bounds.height,
        )
    } else {
        // Strip is a row along the top, items left to right.
        let thickness = if last { bounds.height } else { sum / bounds.width };
        let mut x = bounds.x;
        for (i, &area) in row.iter().enumerate() {
            let width = if i + 1 == row.len() {
                bounds.right() - x
            } else {
                area / thickness
            };
            out.push(Rect::new(x, bounds.y, width, thickness));
            x += width;
        }
        Rect::new(
            bounds.x,
            bounds.y + thickness,
            bounds.width,
            (bounds.height - thickness).max(0.0),
        )
    }
}
