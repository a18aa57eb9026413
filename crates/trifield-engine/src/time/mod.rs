//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the runtime.
//! Intended usage:
//! - one `FrameClock` per render loop
//! - call `tick()` once per frame callback to obtain `FrameStats`

mod frame_clock;

pub use frame_clock::{FrameClock, FrameStats};
