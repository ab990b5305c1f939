use crate::error::DispatchError;
use crate::layout::Treemap;
use crate::source::DispatchSink;
use crate::ui::input::InputAction;
use crate::ui::tooltip::{build_tooltip, TooltipInfo};

/// Key-driven interaction flags. Pointer events never change these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionState {
    /// Hover processing and tooltip drawing enabled.
    pub visible: bool,
    /// Pointer moves leave the current tooltip untouched.
    pub hover_locked: bool,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            visible: true,
            hover_locked: false,
        }
    }
}

/// The tooltip currently shown, anchored at the pointer position that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub cluster: usize,
    pub info: TooltipInfo,
    pub anchor: (f64, f64),
}

#[derive(Debug)]
pub enum ClickOutcome {
    /// The cluster's item ids were handed to the sink.
    Dispatched { cluster: usize, count: usize },
    /// The sink refused them.
    Failed { cluster: usize, error: DispatchError },
    /// Click outside every rectangle.
    Missed,
    /// Interaction is hidden; clicks are ignored.
    Suppressed,
}

#[derive(Debug)]
pub enum Response {
    Unchanged,
    /// Something visible changed.
    Redraw,
    Clicked(ClickOutcome),
}

/// Binds pointer and key events to tooltips and dispatches.
///
/// Owns the interaction state and the last tooltip; borrows the current
/// treemap per event so a relayout never leaves it holding stale geometry.
#[derive(Debug)]
pub struct InteractionController {
    state: InteractionState,
    tooltip: Option<Tooltip>,
    destination: String,
}

impl InteractionController {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            state: InteractionState::default(),
            tooltip: None,
            destination: destination.into(),
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Tooltip to draw, if any. Nothing is drawn while hidden.
    pub fn tooltip(&self) -> Option<&Tooltip> {
        if self.state.visible {
            self.tooltip.as_ref()
        } else {
            None
        }
    }

    /// Cluster under the tooltip, for highlighting.
    pub fn hovered(&self) -> Option<usize> {
        self.tooltip().map(|t| t.cluster)
    }

    pub fn toggle_visibility(&mut self) {
        self.state.visible = !self.state.visible;
        tracing::debug!("Hover tooltip visible: {}", self.state.visible);
    }

    pub fn toggle_lock(&mut self) {
        self.state.hover_locked = !self.state.hover_locked;
        tracing::debug!("Hover tooltip locked: {}", self.state.hover_locked);
    }

    /// Update the tooltip for a pointer move. Returns whether it changed.
    pub fn pointer_moved(&mut self, treemap: &Treemap, x: f64, y: f64) -> bool {
        if !self.state.visible || self.state.hover_locked {
            return false;
        }

        let next = treemap.cluster_at(x, y).and_then(|index| {
            treemap.cluster(index).map(|cluster| Tooltip {
                cluster: index,
                info: build_tooltip(cluster),
                anchor: (x, y),
            })
        });

        if next == self.tooltip {
            return false;
        }
        self.tooltip = next;
        true
    }

    /// Dispatch the clicked cluster's item ids. Lock state does not matter.
    pub fn pointer_clicked(
        &mut self,
        treemap: &Treemap,
        x: f64,
        y: f64,
        sink: &mut dyn DispatchSink,
    ) -> ClickOutcome {
        if !self.state.visible {
            return ClickOutcome::Suppressed;
        }
        let Some(index) = treemap.cluster_at(x, y) else {
            return ClickOutcome::Missed;
        };
        let Some(cluster) = treemap.cluster(index) else {
            return ClickOutcome::Missed;
        };

        match sink.send(&self.destination, &cluster.item_ids) {
            Ok(()) => {
                tracing::info!("File IDs: {:?}", cluster.item_ids);
                ClickOutcome::Dispatched {
                    cluster: index,
                    count: cluster.size(),
                }
            }
            Err(error) => {
                tracing::warn!("Dispatch of cluster {} failed: {}", index, error);
                ClickOutcome::Failed {
                    cluster: index,
                    error,
                }
            }
        }
    }

    pub fn handle(
        &mut self,
        action: InputAction,
        treemap: &Treemap,
        sink: &mut dyn DispatchSink,
    ) -> Response {
        match action {
            InputAction::Hover { x, y } => {
                if self.pointer_moved(treemap, x, y) {
                    Response::Redraw
                } else {
                    Response::Unchanged
                }
            }
            InputAction::Click { x, y } => {
                Response::Clicked(self.pointer_clicked(treemap, x, y, sink))
            }
            InputAction::ToggleVisibility => {
                self.toggle_visibility();
                Response::Redraw
            }
            InputAction::ToggleLock => {
                self.toggle_lock();
                Response::Unchanged
            }
            InputAction::None => Response::Unchanged,
        }
    }
}
