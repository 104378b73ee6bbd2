//! Text blocks and their [`FitTarget`] binding.
//!
//! A [`TextBlock`] is the text element inside a container. Binding it to a
//! measurer and the container's available size yields a [`BoundBlock`],
//! which the fitter can resize and probe.

use textfill_core::{Axis, FitTarget, Size};

use crate::engine::{Extent, LineHeight, TextMeasurer, TextStyle, WrapMode};

/// A run of text with its current style.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub content: String,
    pub style: TextStyle,
    /// Hidden blocks are never selected for fitting.
    pub visible: bool,
}

impl TextBlock {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: TextStyle::default(),
            visible: true,
        }
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Measure the block as laid out inside a box `wrap_width` wide.
    pub fn measure(&self, measurer: &TextMeasurer, wrap_width: f32) -> Extent {
        measurer.measure(&self.content, &self.style, Some(wrap_width))
    }

    pub fn bind<'a>(&'a mut self, measurer: &'a TextMeasurer, container: Size) -> BoundBlock<'a> {
        BoundBlock {
            measurer,
            block: Some(self),
            container,
        }
    }
}

/// Pick the first visible block, mirroring "first visible inner element".
pub fn select_visible(blocks: &mut [TextBlock]) -> Option<&mut TextBlock> {
    blocks.iter_mut().find(|b| b.visible)
}

/// A text block laid out in a container of known size.
///
/// The block is optional so containers without visible text can still go
/// through a batch and be reported.
pub struct BoundBlock<'a> {
    measurer: &'a TextMeasurer,
    block: Option<&'a mut TextBlock>,
    container: Size,
}

impl<'a> BoundBlock<'a> {
    pub fn new(measurer: &'a TextMeasurer, block: Option<&'a mut TextBlock>, container: Size) -> Self {
        Self {
            measurer,
            block: block.filter(|b| b.visible),
            container,
        }
    }

    pub fn block(&self) -> Option<&TextBlock> {
        self.block.as_deref()
    }

    fn extent(&self) -> Extent {
        match &self.block {
            Some(block) => block.measure(self.measurer, self.container.width),
            None => Extent::default(),
        }
    }
}

impl FitTarget for BoundBlock<'_> {
    fn has_text(&self) -> bool {
        self.block.is_some()
    }

    fn container_size(&self) -> Size {
        self.container
    }

    fn font_size(&self) -> f32 {
        self.block.as_ref().map_or(0.0, |b| b.style.font_size)
    }

    fn line_height(&self) -> f32 {
        self.block.as_ref().map_or(0.0, |b| b.style.line_height_px())
    }

    fn set_font_size(&mut self, px: f32) {
        if let Some(block) = self.block.as_mut() {
            block.style.font_size = px;
        }
    }

    fn set_no_wrap(&mut self) {
        if let Some(block) = self.block.as_mut() {
            block.style.wrap = WrapMode::None;
        }
    }

    fn set_line_height(&mut self, px: f32) {
        if let Some(block) = self.block.as_mut() {
            block.style.line_height = LineHeight::Absolute(px);
        }
    }

    fn measure(&mut self, axis: Axis) -> f32 {
        let extent = self.extent();
        match axis {
            Axis::Width => extent.width,
            Axis::Height => extent.height,
        }
    }
}
