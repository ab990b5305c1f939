pub mod input;
pub mod interaction;
pub mod overlay;
pub mod tooltip;
