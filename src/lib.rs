// Public library interface for tagmap
// The windowed viewer and the debug-layout tool both build on these modules

pub mod app;
pub mod cluster;
pub mod config;
pub mod error;
pub mod layout;
pub mod render;
pub mod source;
pub mod ui;
