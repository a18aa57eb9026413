//! Coordinate types shared by the renderer and the runtime.
//!
//! Spaces:
//! - world: `[0, 1] x [0, 1]`, +Y up, where scene triangles live
//! - clip: `[-1, 1] x [-1, 1]`, produced by the world-to-clip transform
//! - surface: physical pixels, origin top-left, covered by the viewport

mod viewport;

pub use viewport::Viewport;
