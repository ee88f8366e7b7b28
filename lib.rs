//! Procedurally generated Dyson ring rendered on the CPU with a depth-sorted,
//! translucent painter's algorithm.

pub mod background;
pub mod compositor;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod lights;
pub mod math;
pub mod overlay;
pub mod raster;
pub mod scene;
pub mod transform;
