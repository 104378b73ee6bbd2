//! # textfill-core
//!
//! Font auto-sizing: find the largest font size at which a text element
//! still fits its container, using nothing but an injected measurement
//! capability.
//!
//! ## Architecture
//!
//! ```text
//! FitOptions ──► TextFiller::fill_all(targets)
//!                    │
//!                    ├── SizingRequest(Height) ──► fit(probe) ──► h
//!                    ├── SizingRequest(Width)  ──► fit(probe) ──► w
//!                    ▼
//!              min(h, w) applied ──► re-measure ──► Outcome
//!                                                     │
//!                                     Callbacks (success / fail / complete)
//! ```
//!
//! - **`fit`** — Integer binary search over font sizes driven by a [`Probe`].
//! - **`fill`** — Dual-axis orchestration, outcomes and batch callbacks.
//! - **`options`** — Configuration with documented defaults.
//! - **`target`** — The [`FitTarget`] capability trait implemented by
//!   rendering backends.

pub mod fill;
pub mod fit;
pub mod options;
pub mod target;

// Re-exports for ergonomic use.
pub use fill::{Callbacks, ElementReport, FitReport, Outcome, TextFiller};
pub use fit::{fit, Probe, SearchStep, SizingRequest, SizingResult};
pub use options::{ConfigError, FitOptions, FontCeiling};
pub use target::{Axis, FitTarget, Size};
