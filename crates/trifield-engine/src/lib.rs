//! Trifield engine crate.
//!
//! Renders a large, continuously animated field of random flat-colored
//! triangles. This crate owns the scene generator, the wgpu renderer and the
//! winit runtime that paces it; binaries supply configuration and an `App`.

pub mod coords;
pub mod core;
pub mod device;
pub mod logging;
pub mod render;
pub mod scene;
pub mod time;
pub mod window;
