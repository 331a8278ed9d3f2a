//! catbox - random cat facts and images, with favorites that stick around
//!
//! The library holds all state and logic; the binaries are thin shells.
//!
//! ## Architecture
//!
//! catbox is built to work in two modes:
//! - **Native**: Terminal UI using crossterm and ratatui, favorites in SQLite
//! - **Web**: DOM frontend via wasm-bindgen, favorites in `localStorage`
//!
//! ## Usage
//!
//! For native builds:
//! ```bash
//! cargo build --features native
//! ```
//!
//! For web builds:
//! ```bash
//! cargo build --target wasm32-unknown-unknown --no-default-features --features dom-web --bin catbox-web-dom
//! ```

// Core modules (available on all platforms)
pub mod config;
pub mod types;

// HTTP client for the fact, image and breed providers
pub mod api;

// Key-value backends and the favorites list on top of them
pub mod storage;
pub mod favorites;

// Theme system (ratatui colors and CSS variables)
pub mod theme;

pub mod app;
pub mod ui;

// UI snapshot types for DOM-based rendering (all platforms)
pub mod ui_snapshot;

// Background fetching needs a task spawner from one of the runtimes
#[cfg(any(feature = "native", all(target_arch = "wasm32", feature = "dom-web")))]
pub mod fetch_worker;

// Platform abstraction layer
pub mod platform;

// Re-export commonly used types
pub use api::{CatApi, FetchError, ImageOutcome};
pub use app::{App, CandidateSlot, Pane};
pub use config::Config;
pub use favorites::{FavoritesStore, FavoritesView};
pub use types::{AppEvent, Breed, FavoriteItem, FavoriteKind, FetchRequest};
