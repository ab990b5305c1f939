//! Diagnostic tool to verify the snapshot → clusters → layout pipeline without a window
use clap::Parser;
use tagmap::cluster::build_clusters;
use tagmap::cluster::filter::TagFilter;
use tagmap::config::PlotArgs;
use tagmap::layout::{compute_layout, Rect};
use tagmap::source::snapshot::SnapshotSource;
use tagmap::source::ItemSource;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tagmap=debug".parse()?),
        )
        .init();

    let args = PlotArgs::parse();
    let snapshot_path = args.snapshot.clone();
    let (plot, _render) = args.into_configs();

    println!("=== DIAGNOSTIC: Snapshot → Clusters → Layout ===");
    println!("Snapshot: {}", snapshot_path.display());
    println!("Query:    [{}]", plot.title());

    let source = SnapshotSource::open(&snapshot_path)?;
    let items = source.fetch(&plot.query)?;
    println!("\n[1] Fetched {} of {} items", items.len(), source.len());

    let filter = TagFilter::from_globs(&plot.whitelist, &plot.blacklist)?;
    let clusters = build_clusters(&items, &filter, plot.minimum_cluster_size);
    println!(
        "\n[2] {} clusters with at least {} items:",
        clusters.len(),
        plot.minimum_cluster_size
    );
    for (i, cluster) in clusters.iter().take(10).enumerate() {
        println!(
            "    [{}] id={} size={} tags=[{}]",
            i,
            cluster.cluster_id,
            cluster.size(),
            cluster.tags_display()
        );
    }
    if clusters.len() > 10 {
        println!("    ... {} more", clusters.len() - 10);
    }

    let (w, h) = plot.window_size;
    let bounds = Rect::new(0.0, 0.0, w as f64, h as f64);
    let layout = compute_layout(&clusters, bounds)?;
    println!("\n[3] Layout computed: {} rectangles in {}x{}", layout.rects.len(), w, h);

    let total: usize = clusters.iter().map(|c| c.size()).sum();
    for lr in layout.rects.iter().take(10) {
        let size = clusters[lr.cluster].size();
        let expected = bounds.area() * size as f64 / total.max(1) as f64;
        let rect = lr.rect;
        println!(
            "    [{}] {:.1}x{:.1} at ({:.1}, {:.1}) area={:.0}px² expected={:.0}px² aspect={:.2}",
            lr.cluster,
            rect.width,
            rect.height,
            rect.x,
            rect.y,
            rect.area(),
            expected,
            rect.width.max(rect.height) / rect.short_side().max(f64::MIN_POSITIVE)
        );
    }

    println!("\n[4] Checking for anomalies:");
    let area_sum: f64 = layout.rects.iter().map(|lr| lr.rect.area()).sum();
    println!("    Total rect area: {:.0}px²", area_sum);
    println!("    Viewport area:   {:.0}px²", bounds.area());
    if !layout.rects.is_empty() {
        println!("    Coverage: {:.3}%", area_sum / bounds.area() * 100.0);
    }

    let mut overlaps = 0usize;
    for (i, a) in layout.rects.iter().enumerate() {
        for b in &layout.rects[i + 1..] {
            let ow = a.rect.right().min(b.rect.right()) - a.rect.x.max(b.rect.x);
            let oh = a.rect.bottom().min(b.rect.bottom()) - a.rect.y.max(b.rect.y);
            if ow > 1e-6 && oh > 1e-6 {
                overlaps += 1;
            }
        }
    }
    println!("    Overlapping pairs: {}", overlaps);

    let escaped = layout
        .rects
        .iter()
        .filter(|lr| {
            lr.rect.x < bounds.x - 1e-6
                || lr.rect.y < bounds.y - 1e-6
                || lr.rect.right() > bounds.right() + 1e-6
                || lr.rect.bottom() > bounds.bottom() + 1e-6
        })
        .count();
    println!("    Outside bounds:    {}", escaped);

    Ok(())
}
