//! Font-size search — the core of the fitter.
//!
//! A bounded integer binary search over `[min, max]` that converges to the
//! largest font size whose probed extent stays within the target. The
//! search never measures anything itself; it drives a [`Probe`] that applies
//! a candidate size and reports the resulting extent along one axis.
//!
//! ```text
//!   min ───────── mid ───────── max
//!    │   fits?  ◄──probe(mid)──►  │
//!    ▼                            ▼
//!  min = mid  (extent <= target)  max = mid  (overflow)
//! ```
//!
//! Once the bracket is one pixel wide the ceiling is probed one last time
//! and adopted when it fits after all (sub-pixel rendering can make that
//! happen).

use crate::target::Axis;

/// Applies a font size and reads back the rendered extent along one axis.
///
/// Probing has a side effect: the last probed size stays applied.
pub trait Probe {
    fn measure_at(&mut self, font_size: u32) -> f32;
}

impl<F> Probe for F
where
    F: FnMut(u32) -> f32,
{
    #[inline]
    fn measure_at(&mut self, font_size: u32) -> f32 {
        self(font_size)
    }
}

/// One per-axis sizing job.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizingRequest {
    pub axis: Axis,
    /// Extent the text may not exceed, in pixels.
    pub target_pixels: f32,
    pub min_font_pixels: u32,
    pub max_font_pixels: u32,
}

/// Outcome of a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizingResult {
    /// Converged font size in whole pixels.
    pub font_size: u32,
    /// Number of probe evaluations, including the final ceiling check.
    pub probes: u32,
    /// Set when a probe hit the target exactly and ended the search early.
    pub exact: bool,
}

/// Snapshot emitted after every probe, for tracing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchStep {
    pub font_size: u32,
    pub extent: f32,
    pub target: f32,
    /// Bounds after this step was applied.
    pub min: u32,
    pub max: u32,
    /// True for the final ceiling probe when the ceiling was adopted.
    pub optimistic: bool,
}

impl SizingRequest {
    pub fn new(axis: Axis, target_pixels: f32, min_font_pixels: u32, max_font_pixels: u32) -> Self {
        Self {
            axis,
            target_pixels,
            min_font_pixels,
            max_font_pixels,
        }
    }

    /// Run the search against `probe`.
    pub fn run<P: Probe + ?Sized>(&self, probe: &mut P) -> SizingResult {
        self.run_traced(probe, |_| {})
    }

    /// Run the search, reporting every probe to `trace`.
    pub fn run_traced<P, F>(&self, probe: &mut P, mut trace: F) -> SizingResult
    where
        P: Probe + ?Sized,
        F: FnMut(&SearchStep),
    {
        search(
            probe,
            self.target_pixels,
            self.min_font_pixels,
            self.max_font_pixels,
            &mut trace,
        )
    }
}

/// Largest integral font size in `[min, max]` whose probed extent is
/// `<= target`.
///
/// Never fails: when nothing fits, `min` comes back and the caller decides
/// what an overflow means.
pub fn fit<P: Probe + ?Sized>(probe: &mut P, target: f32, min: u32, max: u32) -> u32 {
    search(probe, target, min, max, &mut |_: &SearchStep| {}).font_size
}

fn search<P, F>(probe: &mut P, target: f32, mut min: u32, mut max: u32, trace: &mut F) -> SizingResult
where
    P: Probe + ?Sized,
    F: FnMut(&SearchStep),
{
    let mut probes = 0u32;
    let mut exact = false;

    while min < max.saturating_sub(1) {
        let mid = min + (max - min) / 2;
        let extent = probe.measure_at(mid);
        probes += 1;

        if extent <= target {
            min = mid;
            exact = extent == target;
        } else {
            max = mid;
        }

        trace(&SearchStep {
            font_size: mid,
            extent,
            target,
            min,
            max,
            optimistic: false,
        });

        if exact {
            break;
        }
    }

    let extent = probe.measure_at(max);
    probes += 1;

    if extent <= target {
        min = max;
        trace(&SearchStep {
            font_size: max,
            extent,
            target,
            min,
            max,
            optimistic: true,
        });
    }

    SizingResult {
        font_size: min,
        probes,
        exact,
    }
}

// ===================================================================
// Tests
// ===================================================================
