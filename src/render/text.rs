use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use fontdue::Font;

use super::Canvas;

pub struct TextRenderer {
    font: Option<Font>,
    layout: Layout,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self {
            font: None,
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn load_font_from_path(&mut self, path: &Path) -> Result<()> {
        let data =
            std::fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
        let font = Font::from_bytes(data, fontdue::FontSettings::default())
            .map_err(|e| anyhow!("parsing font {}: {}", path.display(), e))?;
        self.font = Some(font);
        tracing::info!("Loaded text font from {}", path.display());
        Ok(())
    }

    pub fn load_system_font(&mut self) -> Result<()> {
        let mut candidates: Vec<PathBuf> = Vec::new();

        if let Ok(windir) = std::env::var("WINDIR") {
            candidates.push(PathBuf::from(format!("{windir}\\Fonts\\segoeui.ttf")));
            candidates.push(PathBuf::from(format!("{windir}\\Fonts\\arial.ttf")));
        }
        candidates.push(PathBuf::from("C:\\Windows\\Fonts\\segoeui.ttf"));
        candidates.push(PathBuf::from("/System/Library/Fonts/Supplemental/Arial.ttf"));
        candidates.push(PathBuf::from("/Library/Fonts/Arial.ttf"));
        candidates.push(PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"));
        candidates.push(PathBuf::from("/usr/share/fonts/TTF/DejaVuSans.ttf"));
        candidates.push(PathBuf::from("/usr/share/fonts/dejavu/DejaVuSans.ttf"));
        candidates.push(PathBuf::from(
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        ));

        for path in candidates {
            if path.is_file() && self.load_font_from_path(&path).is_ok() {
                return Ok(());
            }
        }

        Err(anyhow!("unable to load a system font from known locations"))
    }

    /// Rasterize `text` (newlines break lines) into coverage bitmaps.
    pub fn render_text(
        &mut self,
        text: &str,
        font_size: f32,
        max_width: Option<f32>,
    ) -> Option<TextRenderResult> {
        let font = self.font.as_ref()?;

        self.layout.reset(&LayoutSettings {
            max_width,
            ..Default::default()
        });
        self.layout.append(&[font], &TextStyle::new(text, font_size, 0));

        let mut glyphs = Vec::new();
        let mut width: f32 = 0.0;
        let mut height: f32 = 0.0;

        for glyph in self.layout.glyphs() {
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }
            let (metrics, coverage) = font.rasterize_config(glyph.key);

            width = width.max(glyph.x + metrics.width as f32);
            height = height.max(glyph.y + metrics.height as f32);
            glyphs.push(TextGlyph {
                x: glyph.x,
                y: glyph.y,
                width: metrics.width,
                height: metrics.height,
                coverage,
            });
        }

        if glyphs.is_empty() {
            return None;
        }

        Some(TextRenderResult {
            glyphs,
            width: width.ceil() as u32,
            height: height.ceil() as u32,
        })
    }
}

pub struct TextRenderResult {
    pub glyphs: Vec<TextGlyph>,
    pub width: u32,
    pub height: u32,
}

impl TextRenderResult {
    pub fn draw(&self, canvas: &mut Canvas, x: f64, y: f64, rgb: [u8; 3]) {
        for glyph in &self.glyphs {
            canvas.blend_mask(
                &glyph.coverage,
                glyph.width,
                (x + glyph.x as f64).round() as i64,
                (y + glyph.y as f64).round() as i64,
                rgb,
            );
        }
    }
}

pub struct TextGlyph {
    pub x: f32,
    pub y: f32,
    pub width: usize,
    pub height: usize,
    /// 8-bit coverage, `width * height` bytes
    pub coverage: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn without_a_font_nothing_renders() {
        let mut text = TextRenderer::new();
        assert!(!text.has_font());
        assert!(text.render_text("hello", 14.0, None).is_none());
    }

    #[test]
    fn missing_font_file_is_an_error() {
        let mut text = TextRenderer::new();
        assert!(text
            .load_font_from_path(Path::new("/definitely/not/here.ttf"))
            .is_err());
    }
}
