use std::path::PathBuf;

use clap::Parser;

use crate::layout::fit::DEFAULT_PADDING;
use crate::render::cushion::CushionConfig;

/// Cluster tagged files by their exact tag set and explore them as a treemap.
///
/// Keys: `v` shows/hides the hover tooltip, `e` locks it in place.
/// Click a tile to send its files to the destination page.
#[derive(Debug, Parser)]
#[command(name = "tagmap", version)]
pub struct PlotArgs {
    /// Tag search terms; every term must match one of an item's tags (globs allowed)
    pub query: Vec<String>,

    /// JSON snapshot of the library to read items and thumbnails from
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Clusters with fewer items are not shown
    #[arg(long, default_value_t = 8)]
    pub min_cluster_size: usize,

    /// Plain colored tiles instead of representative thumbnails
    #[arg(long)]
    pub no_thumbs: bool,

    /// Only tags matching one of these globs take part in clustering
    #[arg(long = "whitelist", value_name = "GLOB")]
    pub whitelist: Vec<String>,

    /// Tags matching any of these globs are ignored for clustering
    #[arg(long = "blacklist", value_name = "GLOB")]
    pub blacklist: Vec<String>,

    /// Page that receives the files of a clicked cluster
    #[arg(long, default_value = "CLUSTER")]
    pub destination: String,

    /// Do not ask the host to focus the destination page
    #[arg(long)]
    pub no_focus: bool,

    /// Thumbnail inset as a fraction of the fitted size, per side
    #[arg(long, default_value_t = DEFAULT_PADDING)]
    pub padding: f64,

    /// Append dispatched clusters as JSON lines to this file
    #[arg(long)]
    pub outbox: Option<PathBuf>,

    /// Initial window width
    #[arg(long)]
    pub width: Option<u32>,

    /// Initial window height
    #[arg(long)]
    pub height: Option<u32>,

    /// TrueType font for titles and tooltips
    #[arg(long)]
    pub font: Option<PathBuf>,
}

/// Everything a plot run needs, independent of how it was requested.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub query: Vec<String>,
    pub minimum_cluster_size: usize,
    pub use_thumbs: bool,
    pub whitelist: Vec<String>,
    pub blacklist: Vec<String>,
    pub destination: String,
    pub focus: bool,
    pub window_size: (u32, u32),
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            query: Vec::new(),
            minimum_cluster_size: 8,
            use_thumbs: true,
            whitelist: Vec::new(),
            blacklist: Vec::new(),
            destination: "CLUSTER".to_string(),
            focus: true,
            window_size: default_window_size(true),
        }
    }
}

impl PlotConfig {
    pub fn title(&self) -> String {
        if self.query.is_empty() {
            "(all items)".to_string()
        } else {
            self.query.join(", ")
        }
    }
}

/// Thumbnail plots get a larger window than plain ones.
pub fn default_window_size(use_thumbs: bool) -> (u32, u32) {
    if use_thumbs {
        (1900, 1200)
    } else {
        (1000, 800)
    }
}

/// Rendering knobs.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub background: [u8; 3],
    pub edge_color: [u8; 4],
    /// Tile edge width without thumbnails (px)
    pub edge_width: f64,
    /// Tile edge width when thumbnails are drawn (px)
    pub edge_width_thumbs: f64,
    pub thumbnail_padding: f64,
    /// Height of the title band above the treemap (px)
    pub title_height: f64,
    pub title_font_size: f32,
    pub tooltip_font_size: f32,
    pub font_path: Option<PathBuf>,
    pub vibrancy: f32,
    pub cushion: CushionConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: [20, 22, 28],
            edge_color: [0, 0, 0, 255],
            edge_width: 2.0,
            edge_width_thumbs: 1.0,
            thumbnail_padding: DEFAULT_PADDING,
            title_height: 28.0,
            title_font_size: 16.0,
            tooltip_font_size: 14.0,
            font_path: None,
            vibrancy: 1.0,
            cushion: CushionConfig::default(),
        }
    }
}

impl PlotArgs {
    pub fn into_configs(self) -> (PlotConfig, RenderConfig) {
        let use_thumbs = !self.no_thumbs;
        let (default_w, default_h) = default_window_size(use_thumbs);
        let plot = PlotConfig {
            query: self.query,
            minimum_cluster_size: self.min_cluster_size,
            use_thumbs,
            whitelist: self.whitelist,
            blacklist: self.blacklist,
            destination: self.destination,
            focus: !self.no_focus,
            window_size: (
                self.width.unwrap_or(default_w),
                self.height.unwrap_or(default_h),
            ),
        };
        let render = RenderConfig {
            thumbnail_padding: self.padding,
            font_path: self.font,
            ..RenderConfig::default()
        };
        (plot, render)
    }
}
