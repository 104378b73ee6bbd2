//! Text measurer — shapes text with `cosmic-text` and reports its extent.
//!
//! The measurer owns a `FontSystem` (font discovery + shaping) and an LRU
//! cache of measured extents. The fitter probes the same text at a handful
//! of sizes per axis and re-probes the final size, so repeated
//! `(text, style, width)` triples are served from the cache.
//!
//! Both live behind `RefCell`s: measuring only needs `&self`, which lets
//! many bound blocks share one measurer during a batch.

use std::cell::{Cell, RefCell};
use std::num::NonZeroUsize;

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Style as CStyle, Weight, Wrap};
use lru::LruCache;

/// Default number of cached extents.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

// ── Style ───────────────────────────────────────────────────────────

/// Line wrapping behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Wrap at word boundaries when a width limit is given.
    Word,
    /// Single line, never wrap.
    None,
}

impl Default for WrapMode {
    fn default() -> Self {
        Self::Word
    }
}

/// Line height, either proportional to the font size or fixed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineHeight {
    /// Multiple of the font size (CSS unitless line height).
    Relative(f32),
    /// Fixed pixels.
    Absolute(f32),
}

impl Default for LineHeight {
    fn default() -> Self {
        Self::Relative(1.25)
    }
}

impl LineHeight {
    pub fn to_px(self, font_size: f32) -> f32 {
        match self {
            LineHeight::Relative(factor) => factor * font_size,
            LineHeight::Absolute(px) => px,
        }
    }
}

/// Style of a measured run of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size: f32,
    pub line_height: LineHeight,
    /// CSS-style font family chain (e.g. `"Arial, Helvetica, sans-serif"`).
    /// The first entry is handed to cosmic-text, which does its own fallback.
    pub family: String,
    /// Font weight (100–900). 400 = normal, 700 = bold.
    pub weight: u16,
    pub italic: bool,
    /// Extra spacing between glyphs in pixels (can be negative).
    pub letter_spacing: f32,
    pub wrap: WrapMode,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            line_height: LineHeight::default(),
            family: String::from("sans-serif"),
            weight: 400,
            italic: false,
            letter_spacing: 0.0,
            wrap: WrapMode::Word,
        }
    }
}

impl TextStyle {
    /// Line height in pixels at the current font size.
    pub fn line_height_px(&self) -> f32 {
        self.line_height.to_px(self.font_size)
    }
}

/// Rendered size of a text block.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

/// Cache hit/miss counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct MeasureKey {
    text: String,
    family: String,
    font_size: u32,
    line_height: u32,
    letter_spacing: u32,
    weight: u16,
    italic: bool,
    max_width: Option<u32>,
}

impl MeasureKey {
    fn new(text: &str, style: &TextStyle, max_width: Option<f32>) -> Self {
        Self {
            text: text.to_owned(),
            family: style.family.clone(),
            font_size: style.font_size.to_bits(),
            line_height: style.line_height_px().to_bits(),
            letter_spacing: style.letter_spacing.to_bits(),
            weight: style.weight,
            italic: style.italic,
            max_width: max_width.map(f32::to_bits),
        }
    }
}

// ── Measurer ────────────────────────────────────────────────────────

/// Shapes text and reports its rendered extent.
pub struct TextMeasurer {
    font_system: RefCell<FontSystem>,
    cache: RefCell<LruCache<MeasureKey, Extent>>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl Default for TextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer {
    /// Create a measurer with system font discovery.
    pub fn new() -> Self {
        Self::with_font_system(FontSystem::new(), DEFAULT_CACHE_CAPACITY)
    }

    /// Create a measurer around an existing font system.
    pub fn with_font_system(font_system: FontSystem, cache_capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            font_system: RefCell::new(font_system),
            cache: RefCell::new(LruCache::new(capacity)),
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    /// Number of font faces known to the font system.
    pub fn face_count(&self) -> usize {
        self.font_system.borrow().db().faces().count()
    }

    pub fn cache_len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.get(),
            misses: self.misses.get(),
        }
    }

    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }

    /// Measure `text` laid out with `style`.
    ///
    /// `max_width` is the wrap width; it is ignored for
    /// [`WrapMode::None`]. Zero or negative sizes render nothing.
    pub fn measure(&self, text: &str, style: &TextStyle, max_width: Option<f32>) -> Extent {
        let line_height = style.line_height_px();
        if !(style.font_size > 0.0 && line_height > 0.0)
            || !style.font_size.is_finite()
            || !line_height.is_finite()
        {
            return Extent::default();
        }

        let max_width = match style.wrap {
            WrapMode::Word => max_width.filter(|w| w.is_finite()),
            WrapMode::None => None,
        };

        let key = MeasureKey::new(text, style, max_width);
        if let Some(extent) = self.cache.borrow_mut().get(&key) {
            self.hits.set(self.hits.get() + 1);
            return *extent;
        }
        self.misses.set(self.misses.get() + 1);

        let extent = self.shape(text, style, line_height, max_width);
        log::trace!(
            "measured {:?} at {}px: {}x{}",
            text,
            style.font_size,
            extent.width,
            extent.height
        );
        self.cache.borrow_mut().put(key, extent);
        extent
    }

    fn shape(&self, text: &str, style: &TextStyle, line_height: f32, max_width: Option<f32>) -> Extent {
        let mut font_system = self.font_system.borrow_mut();
        let metrics = Metrics::new(style.font_size, line_height);

        let font_style = if style.italic {
            CStyle::Italic
        } else {
            CStyle::Normal
        };
        let attrs = Attrs::new()
            .family(family_of(&style.family))
            .weight(Weight(style.weight))
            .style(font_style);

        let wrap = match style.wrap {
            WrapMode::Word => Wrap::Word,
            WrapMode::None => Wrap::None,
        };

        let mut buffer = Buffer::new(&mut font_system, metrics);
        buffer.set_wrap(&mut font_system, wrap);
        buffer.set_size(&mut font_system, max_width, None);
        buffer.set_text(&mut font_system, text, attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut font_system, false);

        let mut extent = Extent::default();
        for run in buffer.layout_runs() {
            let spacing = style.letter_spacing * run.glyphs.len().saturating_sub(1) as f32;
            extent.width = extent.width.max(run.line_w + spacing);
            extent.height = extent.height.max(run.line_top + line_height);
        }
        extent
    }
}

/// Map the first entry of a CSS family chain to a cosmic-text family.
fn family_of(chain: &str) -> Family<'_> {
    let first = chain
        .split(',')
        .next()
        .unwrap_or(chain)
        .trim()
        .trim_matches('"')
        .trim_matches('\'');
    match first {
        "sans-serif" | "" => Family::SansSerif,
        "serif" => Family::Serif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        concrete => Family::Name(concrete),
    }
}

// ===================================================================
// Tests
// ===================================================================
