//! Platform abstraction (clipboard, task spawning, clocks, logging).

#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
pub use wasm::copy_to_clipboard;

#[cfg(all(target_arch = "wasm32", feature = "dom-web"))]
mod runtime_wasm;
#[cfg(all(target_arch = "wasm32", feature = "dom-web"))]
pub use runtime_wasm::{init_logging, spawn, Instant};

#[cfg(all(not(target_arch = "wasm32"), feature = "native"))]
mod native;
#[cfg(all(not(target_arch = "wasm32"), feature = "native"))]
pub use native::copy_to_clipboard;

#[cfg(all(not(target_arch = "wasm32"), feature = "native"))]
mod runtime_native;
#[cfg(all(not(target_arch = "wasm32"), feature = "native"))]
pub use runtime_native::{init_logging, spawn, Instant};

// Library-only builds (no runtime feature) still need a clock for toasts.
#[cfg(all(not(target_arch = "wasm32"), not(feature = "native")))]
pub use std::time::Instant;
