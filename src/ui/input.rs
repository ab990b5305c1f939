use winit::event::{ElementState, MouseButton};
use winit::keyboard::Key;

use crate::layout::LayoutRect;

/// Mouse state tracking.
#[derive(Debug, Default)]
pub struct MouseState {
    pub x: f64,
    pub y: f64,
}

/// Hit-test: index of the cluster whose rectangle contains the point.
///
/// Edges count as inside. Rectangles are disjoint, so the first match in
/// layout order is the only one except on shared edges, where the earlier
/// rectangle wins.
pub fn hit_test(layout_rects: &[LayoutRect], x: f64, y: f64) -> Option<usize> {
    layout_rects
        .iter()
        .find(|r| r.rect.contains(x, y))
        .map(|r| r.cluster)
}

/// Input action produced from raw input events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// Pointer moved to a new position
    Hover { x: f64, y: f64 },
    /// Left click at a position
    Click { x: f64, y: f64 },
    /// Show or hide the hover tooltip (`v`)
    ToggleVisibility,
    /// Freeze or unfreeze the hover tooltip (`e`)
    ToggleLock,
    /// No action
    None,
}

/// Process a mouse button event.
pub fn process_mouse_button(
    button: MouseButton,
    state: ElementState,
    mouse: &MouseState,
) -> InputAction {
    if state != ElementState::Pressed {
        return InputAction::None;
    }

    match button {
        MouseButton::Left => InputAction::Click {
            x: mouse.x,
            y: mouse.y,
        },
        _ => InputAction::None,
    }
}

/// Process a keyboard event.
pub fn process_key(key: Key, state: ElementState) -> InputAction {
    if state != ElementState::Pressed {
        return InputAction::None;
    }

    match key.as_ref() {
        Key::Character(c) if c.eq_ignore_ascii_case("v") => InputAction::ToggleVisibility,
        Key::Character(c) if c.eq_ignore_ascii_case("e") => InputAction::ToggleLock,
        _ => InputAction::None,
    }
}
