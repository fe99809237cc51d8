//! CPU raster module
//!
//! The persistent canvas, the rigid rotation warp applied to it every frame,
//! and the disc rasterizer brushes draw with.

pub mod canvas;
pub mod rotate;
pub mod shapes;

pub use canvas::Canvas;
pub use rotate::Rotation;
pub use shapes::fill_disc;
