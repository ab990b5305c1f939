use anyhow::{Context, Result};
use image::RgbaImage;

use crate::cluster::build_clusters;
use crate::cluster::filter::TagFilter;
use crate::config::{PlotConfig, RenderConfig};
use crate::layout::{Rect, Treemap};
use crate::render::scene::rasterize_treemap;
use crate::render::text::TextRenderer;
use crate::render::Canvas;
use crate::source::thumbnails::load_representatives;
use crate::source::{DispatchSink, ItemSource};
use crate::ui::input::{InputAction, MouseState};
use crate::ui::interaction::{ClickOutcome, InteractionController, Response};
use crate::ui::overlay;

/// Top-level state of one plot window.
pub struct App {
    pub config: PlotConfig,
    pub render_config: RenderConfig,
    pub treemap: Treemap,
    /// Representative thumbnail per cluster; empty when thumbnails are off.
    pub thumbnails: Vec<Option<RgbaImage>>,
    pub controller: InteractionController,
    sink: Box<dyn DispatchSink>,
    pub text_renderer: TextRenderer,
    pub mouse: MouseState,

    pub needs_relayout: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Rasterized treemap, rebuilt only when the layout changes.
    pub cached_treemap: Option<Canvas>,
    /// Outcome of the last click, shown along the bottom edge.
    pub status: Option<String>,
}

impl App {
    /// Fetch items, cluster them and load thumbnails. No window is needed yet.
    pub fn prepare(
        config: PlotConfig,
        render_config: RenderConfig,
        source: &dyn ItemSource,
        sink: Box<dyn DispatchSink>,
    ) -> Result<Self> {
        let filter = TagFilter::from_globs(&config.whitelist, &config.blacklist)
            .context("building tag filter")?;
        let items = source
            .fetch(&config.query)
            .with_context(|| format!("fetching items for [{}]", config.title()))?;
        tracing::info!("Fetched {} items for [{}]", items.len(), config.title());

        let clusters = build_clusters(&items, &filter, config.minimum_cluster_size);
        if clusters.is_empty() {
            tracing::warn!(
                "No cluster has at least {} items",
                config.minimum_cluster_size
            );
        }

        let thumbnails = if config.use_thumbs {
            load_representatives(source, &clusters)
        } else {
            Vec::new()
        };

        let mut text_renderer = TextRenderer::new();
        let loaded = match &render_config.font_path {
            Some(path) => text_renderer.load_font_from_path(path),
            None => text_renderer.load_system_font(),
        };
        if let Err(e) = loaded {
            tracing::warn!("No font available, text overlays disabled: {:#}", e);
        }

        let (viewport_width, viewport_height) = config.window_size;
        let controller = InteractionController::new(config.destination.clone());

        Ok(Self {
            config,
            render_config,
            treemap: Treemap::new(clusters),
            thumbnails,
            controller,
            sink,
            text_renderer,
            mouse: MouseState::default(),
            needs_relayout: true,
            viewport_width,
            viewport_height,
            cached_treemap: None,
            status: None,
        })
    }

    pub fn title(&self) -> String {
        self.config.title()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.viewport_width, self.viewport_height) {
            return;
        }
        self.viewport_width = width;
        self.viewport_height = height;
        self.needs_relayout = true;
    }

    /// Area below the title band.
    pub fn treemap_bounds(&self) -> Rect {
        let title = self.render_config.title_height;
        Rect::new(
            0.0,
            title,
            self.viewport_width as f64,
            self.viewport_height as f64 - title,
        )
    }

    /// Recompute the layout for the current viewport and re-rasterize it.
    pub fn relayout(&mut self) {
        let bounds = self.treemap_bounds();
        if !bounds.is_valid() {
            tracing::debug!(
                "Viewport {}x{} too small for a treemap, keeping previous layout",
                self.viewport_width,
                self.viewport_height
            );
            return;
        }
        if let Err(e) = self.treemap.relayout(bounds) {
            tracing::error!("Layout failed: {}", e);
            return;
        }
        tracing::info!(
            "Layout computed: {} rectangles in {}x{}",
            self.treemap.layout().rects.len(),
            self.viewport_width,
            self.viewport_height
        );

        self.cached_treemap = Some(rasterize_treemap(
            self.viewport_width,
            self.viewport_height,
            &self.treemap,
            &self.thumbnails,
            &self.render_config,
        ));
        self.needs_relayout = false;
    }

    /// Route an input action. Returns whether a redraw is needed.
    pub fn handle_action(&mut self, action: InputAction) -> bool {
        let response = self
            .controller
            .handle(action, &self.treemap, self.sink.as_mut());
        match response {
            Response::Unchanged => false,
            Response::Redraw => true,
            Response::Clicked(outcome) => match outcome {
                ClickOutcome::Dispatched { count, .. } => {
                    self.status = Some(format!(
                        "Sent {} files to '{}'",
                        count,
                        self.controller.destination()
                    ));
                    true
                }
                ClickOutcome::Failed { error, .. } => {
                    self.status = Some(format!("Dispatch failed: {}", error));
                    true
                }
                ClickOutcome::Missed | ClickOutcome::Suppressed => false,
            },
        }
    }

    /// Compose the cached treemap with this frame's overlays.
    pub fn render_frame(&mut self) -> Canvas {
        let mut canvas = match &self.cached_treemap {
            Some(cached)
                if cached.width() == self.viewport_width
                    && cached.height() == self.viewport_height =>
            {
                cached.clone()
            }
            _ => Canvas::new(
                self.viewport_width,
                self.viewport_height,
                self.render_config.background,
            ),
        };

        let title = self.title();
        overlay::render_title(
            &mut canvas,
            &mut self.text_renderer,
            &title,
            &self.render_config,
        );

        if self.treemap.is_empty() {
            overlay::render_empty(&mut canvas, &mut self.text_renderer, &self.render_config);
        }

        if let Some(tooltip) = self.controller.tooltip() {
            let rect = self
                .treemap
                .layout()
                .rects
                .iter()
                .find(|lr| lr.cluster == tooltip.cluster)
                .map(|lr| lr.rect);
            if let Some(rect) = rect {
                overlay::render_hover_outline(&mut canvas, rect);
            }
            overlay::render_tooltip(
                &mut canvas,
                &mut self.text_renderer,
                tooltip,
                &self.render_config,
            );
        }

        if let Some(status) = &self.status {
            overlay::render_status(
                &mut canvas,
                &mut self.text_renderer,
                status,
                &self.render_config,
            );
        }

        canvas
    }
}
