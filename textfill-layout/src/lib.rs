//! # textfill-layout
//!
//! Container layout for the fitter. Boxes are laid out by `taffy`; each
//! box's content area becomes the target its text is fitted into.
//!
//! - **`engine`** — Taffy-backed box tree with dirty tracking.
//! - **`scene`** — Scene files, box/text binding and batch fitting.

pub mod engine;
pub mod scene;

pub use engine::{LayoutEngine, LayoutError};
pub use scene::{
    BoxSpec, FlowDirection, RootSpec, Scene, SceneBox, SceneDescription, SceneEntry, SceneError,
    SceneReport, SceneTarget, TextSpec,
};
