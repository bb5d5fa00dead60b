//! Layout engine: document to draw-command list, and its inverse.

pub mod display_list;
pub mod engine;
pub mod geometry;
pub mod rhythm;

pub use display_list::{DrawCommand, Style};
pub use engine::{layout_measure, layout_song, ViewState};
pub use geometry::Geometry;
pub use hit_test::hit_test;
