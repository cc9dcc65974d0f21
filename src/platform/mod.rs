//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (monotonic and wall clocks)
//! - Browser bindings (wasm32 only)
//!
//! Score storage backends live in [`crate::persistence`].

pub mod time;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use time::{Clock, ManualClock};
#[cfg(not(target_arch = "wasm32"))]
pub use time::SystemClock;
#[cfg(target_arch = "wasm32")]
pub use time::BrowserClock;
