//! The capabilities the fitter needs from its environment.
//!
//! A [`FitTarget`] is one container paired with the text element selected
//! inside it. Implementations own the real rendering concerns (shaping,
//! layout, styles); the core only applies sizes and reads extents back.

use serde::{Deserialize, Serialize};

/// A sizing dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Height,
    Width,
}

impl Axis {
    /// Single-letter prefix used in debug traces.
    pub fn prefix(self) -> &'static str {
        match self {
            Axis::Height => "H",
            Axis::Width => "W",
        }
    }
}

/// Width/height pair in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The component along `axis`.
    #[inline]
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Height => self.height,
            Axis::Width => self.width,
        }
    }
}

/// A container + inner text element that can be auto-sized.
///
/// Every setter must be reflected by the very next measurement
/// (synchronous layout semantics).
pub trait FitTarget {
    /// Whether a visible text element was selected inside the container.
    fn has_text(&self) -> bool {
        true
    }

    /// The container's available (content-box) size.
    fn container_size(&self) -> Size;

    /// Font size currently applied to the text element.
    fn font_size(&self) -> f32;

    /// Line height currently in effect for the text element.
    fn line_height(&self) -> f32;

    fn set_font_size(&mut self, px: f32);

    /// Disable wrapping so the text renders on a single line.
    fn set_no_wrap(&mut self);

    /// Apply a line height to the containing box.
    fn set_line_height(&mut self, px: f32);

    /// Rendered extent of the text element along `axis`.
    fn measure(&mut self, axis: Axis) -> f32;
}

impl<T: FitTarget + ?Sized> FitTarget for &mut T {
    fn has_text(&self) -> bool {
        (**self).has_text()
    }

    fn container_size(&self) -> Size {
        (**self).container_size()
    }

    fn font_size(&self) -> f32 {
        (**self).font_size()
    }

    fn line_height(&self) -> f32 {
        (**self).line_height()
    }

    fn set_font_size(&mut self, px: f32) {
        (**self).set_font_size(px)
    }

    fn set_no_wrap(&mut self) {
        (**self).set_no_wrap()
    }

    fn set_line_height(&mut self, px: f32) {
        (**self).set_line_height(px)
    }

    fn measure(&mut self, axis: Axis) -> f32 {
        (**self).measure(axis)
    }
}
