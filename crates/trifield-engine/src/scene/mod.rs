//! Scene (triangle field) types.
//!
//! Responsibilities:
//! - describe the immutable triangle primitives drawn each frame
//! - pack them into the flat position/color arrays the GPU buffers mirror
//! - generate whole scenes procedurally from an RNG stream

mod generator;
mod list;
mod triangle;

pub use generator::{generate, SceneGenerator, MAX_VERTEX_OFFSET};
pub use list::Scene;
pub(crate) use list::{COLOR_COMPONENTS, POSITION_COMPONENTS};
pub use triangle::{Rgb, Triangle};
