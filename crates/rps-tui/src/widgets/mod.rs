//! Render widgets: room view, minimap and message log.

mod log;
mod minimap;
mod room;

pub use log::LogWidget;
pub use minimap::MinimapWidget;
pub use room::{glyph, RoomWidget};
