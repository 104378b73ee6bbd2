//! # textfill-text
//!
//! Text measurement backend for the fitter. Shapes text with `cosmic-text`
//! and binds text blocks to containers as [`textfill_core::FitTarget`]s.
//!
//! ## Architecture
//!
//! ```text
//! TextMeasurer (cosmic-text FontSystem + LRU extent cache)
//!     │
//!     ▼
//! measure(text, style, wrap width) ──► Extent { width, height }
//!     ▲
//!     │
//! BoundBlock (TextBlock + container size) ── FitTarget ──► TextFiller
//! ```
//!
//! - **`engine`** — Shaping, style and the extent cache.
//! - **`block`** — Text blocks, visible-block selection and the fit binding.

pub mod block;
pub mod engine;

// Re-exports for ergonomic use.
pub use block::{select_visible, BoundBlock, TextBlock};
pub use engine::{CacheStats, Extent, LineHeight, TextMeasurer, TextStyle, WrapMode};
