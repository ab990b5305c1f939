use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use tagmap::app::App;
use tagmap::config::PlotArgs;
use tagmap::render::present::Presenter;
use tagmap::source::sink::{LogSink, OutboxSink};
use tagmap::source::snapshot::SnapshotSource;
use tagmap::source::DispatchSink;
use tagmap::ui::input::{self, InputAction};

/// Main application handler for winit's event loop.
struct TagmapWindow {
    app: App,
    presenter: Option<Presenter>,
    window: Option<Arc<Window>>,
}

impl TagmapWindow {
    fn new(app: App) -> Self {
        Self {
            app,
            presenter: None,
            window: None,
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn handle_action(&mut self, action: InputAction) {
        if self.app.handle_action(action) {
            self.request_redraw();
        }
    }
}

impl ApplicationHandler for TagmapWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (width, height) = self.app.config.window_size;
        let attrs = WindowAttributes::default()
            .with_title(format!("tagmap — {}", self.app.title()))
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match Presenter::new(window.clone()) {
            Ok(presenter) => {
                let size = window.inner_size();
                tracing::info!(
                    "Window initialized: scale_factor={:.3}, physical_size={}x{}",
                    window.scale_factor(),
                    size.width,
                    size.height
                );
                self.app.resize(size.width, size.height);
                self.presenter = Some(presenter);
                self.window = Some(window.clone());
                window.request_redraw();
            }
            Err(e) => {
                tracing::error!("Failed to initialize presentation surface: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                self.app.resize(size.width, size.height);
                self.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                tracing::info!("Scale factor changed: {:.3}", scale_factor);
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    self.app.resize(size.width, size.height);
                    window.request_redraw();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.app.mouse.x = position.x;
                self.app.mouse.y = position.y;
                self.handle_action(InputAction::Hover {
                    x: position.x,
                    y: position.y,
                });
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let action = input::process_mouse_button(button, state, &self.app.mouse);
                self.handle_action(action);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let action = input::process_key(event.logical_key.clone(), event.state);
                self.handle_action(action);
            }

            WindowEvent::RedrawRequested => {
                if self.app.needs_relayout {
                    self.app.relayout();
                }

                let frame = self.app.render_frame();
                if let Some(presenter) = &mut self.presenter {
                    if let Err(e) = presenter.present(&frame) {
                        tracing::error!("Render error: {:#}", e);
                    }
                }
            }

            _ => {}
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tagmap=info".parse()?),
        )
        .init();

    let args = PlotArgs::parse();
    let snapshot_path = args.snapshot.clone();
    let outbox = args.outbox.clone();
    let (plot, render) = args.into_configs();

    let source = SnapshotSource::open(&snapshot_path)?;
    let sink: Box<dyn DispatchSink> = match outbox {
        Some(path) => {
            tracing::info!("Dispatching clicked clusters to {}", path.display());
            Box::new(OutboxSink::new(path, plot.focus))
        }
        None => Box::new(LogSink),
    };

    tracing::info!("tagmap starting, query: [{}]", plot.title());
    let app = App::prepare(plot, render, &source, sink)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut handler = TagmapWindow::new(app);
    event_loop.run_app(&mut handler)?;

    Ok(())
}
