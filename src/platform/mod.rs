//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks (frame pacing)
//! - Input events (keyboard listeners, wasm only)

#[cfg(target_arch = "wasm32")]
pub mod keyboard;
pub mod time;

#[cfg(target_arch = "wasm32")]
pub use keyboard::Keyboarder;
pub use time::{FrameClock, TickPacing};
