use crate::config::RenderConfig;
use crate::layout::Rect;
use crate::render::text::TextRenderer;
use crate::render::Canvas;
use crate::ui::interaction::Tooltip;

const PANEL: [u8; 4] = [38, 38, 46, 242];
const PANEL_BORDER: [u8; 4] = [255, 255, 255, 40];
const TEXT: [u8; 3] = [235, 235, 240];
const HOVER_OUTLINE: [u8; 4] = [255, 255, 255, 220];

/// Offset of the tooltip box from the pointer.
const TOOLTIP_OFFSET: f64 = 15.0;
const TOOLTIP_PAD: f64 = 8.0;
const TOOLTIP_MAX_WIDTH: f32 = 420.0;

/// Query title centered in the band above the treemap.
pub fn render_title(canvas: &mut Canvas, text: &mut TextRenderer, title: &str, config: &RenderConfig) {
    let band = Rect::new(0.0, 0.0, canvas.width() as f64, config.title_height);
    let [r, g, b] = config.background;
    canvas.fill_rect(band, [r, g, b, 255]);

    let max_width = (canvas.width() as f32 - 16.0).max(1.0);
    if let Some(rendered) = text.render_text(title, config.title_font_size, Some(max_width)) {
        let x = ((band.width - rendered.width as f64) / 2.0).max(8.0);
        let y = ((band.height - rendered.height as f64) / 2.0).max(0.0);
        rendered.draw(canvas, x, y, TEXT);
    }
}

pub fn render_hover_outline(canvas: &mut Canvas, rect: Rect) {
    canvas.stroke_rect(rect, 2.0, HOVER_OUTLINE);
}

/// Tooltip box next to its anchor, flipped left/up to stay on screen.
pub fn render_tooltip(
    canvas: &mut Canvas,
    text: &mut TextRenderer,
    tooltip: &Tooltip,
    config: &RenderConfig,
) {
    let Some(rendered) = text.render_text(
        &tooltip.info.text(),
        config.tooltip_font_size,
        Some(TOOLTIP_MAX_WIDTH),
    ) else {
        return;
    };

    let box_w = rendered.width as f64 + 2.0 * TOOLTIP_PAD;
    let box_h = rendered.height as f64 + 2.0 * TOOLTIP_PAD;
    let (ax, ay) = tooltip.anchor;
    let (vw, vh) = (canvas.width() as f64, canvas.height() as f64);

    let mut x = ax + TOOLTIP_OFFSET;
    if x + box_w > vw {
        x = ax - box_w - TOOLTIP_OFFSET;
    }
    let mut y = ay + TOOLTIP_OFFSET;
    if y + box_h > vh {
        y = ay - box_h - TOOLTIP_OFFSET;
    }
    let x = x.clamp(0.0, (vw - box_w).max(0.0));
    let y = y.clamp(0.0, (vh - box_h).max(0.0));

    let panel = Rect::new(x, y, box_w, box_h);
    canvas.fill_rect(panel, PANEL);
    canvas.stroke_rect(panel, 1.0, PANEL_BORDER);
    rendered.draw(canvas, x + TOOLTIP_PAD, y + TOOLTIP_PAD, TEXT);
}

/// One-line notification along the bottom edge.
pub fn render_status(canvas: &mut Canvas, text: &mut TextRenderer, message: &str, config: &RenderConfig) {
    let max_width = (canvas.width() as f32 - 24.0).max(1.0);
    let Some(rendered) = text.render_text(message, config.tooltip_font_size, Some(max_width)) else {
        return;
    };
    let h = rendered.height as f64 + 2.0 * TOOLTIP_PAD;
    let panel = Rect::new(
        0.0,
        canvas.height() as f64 - h,
        rendered.width as f64 + 2.0 * TOOLTIP_PAD,
        h,
    );
    canvas.fill_rect(panel, PANEL);
    rendered.draw(canvas, panel.x + TOOLTIP_PAD, panel.y + TOOLTIP_PAD, TEXT);
}

/// Centered message shown when no cluster survived selection.
pub fn render_empty(canvas: &mut Canvas, text: &mut TextRenderer, config: &RenderConfig) {
    if let Some(rendered) = text.render_text("Nothing to show", config.title_font_size, None) {
        let x = (canvas.width() as f64 - rendered.width as f64) / 2.0;
        let y = (canvas.height() as f64 - rendered.height as f64) / 2.0;
        rendered.draw(canvas, x, y, TEXT);
    }
}
