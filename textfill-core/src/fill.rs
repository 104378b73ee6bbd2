//! Dual-axis orchestration and batch dispatch.
//!
//! For each target: resolve the available box, fit the height (unless
//! width-only) and the width, apply the binding size, then re-measure.
//! Overflow after all that is a failure; the original font size is put
//! back and the batch moves on.
//!
//! ```text
//! targets ──► fill_at ──► Outcome ──► success / fail callback
//!                │                         │
//!          H fit │ W fit               (per element)
//!                ▼                         ▼
//!        min(H, W) applied        complete(&FitReport)  (once)
//! ```

use log::{debug, warn};
use serde::Serialize;

use crate::fit::{SearchStep, SizingRequest};
use crate::options::{ConfigError, FitOptions};
use crate::target::{Axis, FitTarget, Size};

/// Per-element verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
}

/// What happened to one element of a batch.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementReport {
    /// Position in the batch.
    pub index: usize,
    pub outcome: Outcome,
    /// Target box after explicit overrides.
    pub available: Size,
    /// Height-axis result; `None` in width-only mode.
    pub height_fit: Option<u32>,
    /// Width-axis result; `None` when no text element was selected.
    pub width_fit: Option<u32>,
    /// Font size left applied (the original one after a failure).
    pub font_size: f32,
    pub original_font_size: f32,
}

/// Results of a whole batch, in batch order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FitReport {
    pub elements: Vec<ElementReport>,
}

impl FitReport {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.count(Outcome::Success)
    }

    pub fn failed(&self) -> usize {
        self.count(Outcome::Failure)
    }

    fn count(&self, outcome: Outcome) -> usize {
        self.elements.iter().filter(|e| e.outcome == outcome).count()
    }
}

type ElementCallback<'a, T> = Box<dyn FnMut(&T) + 'a>;
type CompleteCallback<'a> = Box<dyn FnMut(&FitReport) + 'a>;

/// Notification hooks for [`TextFiller::fill_all`].
pub struct Callbacks<'a, T: ?Sized> {
    success: Option<ElementCallback<'a, T>>,
    fail: Option<ElementCallback<'a, T>>,
    complete: Option<CompleteCallback<'a>>,
    legacy: Option<ElementCallback<'a, T>>,
    legacy_warned: bool,
}

impl<T: ?Sized> Default for Callbacks<'_, T> {
    fn default() -> Self {
        Self {
            success: None,
            fail: None,
            complete: None,
            legacy: None,
            legacy_warned: false,
        }
    }
}

impl<'a, T: ?Sized> Callbacks<'a, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called for every element that fits.
    pub fn on_success(mut self, f: impl FnMut(&T) + 'a) -> Self {
        self.success = Some(Box::new(f));
        self
    }

    /// Called for every element that still overflows.
    pub fn on_fail(mut self, f: impl FnMut(&T) + 'a) -> Self {
        self.fail = Some(Box::new(f));
        self
    }

    /// Called once after the whole batch.
    pub fn on_complete(mut self, f: impl FnMut(&FitReport) + 'a) -> Self {
        self.complete = Some(Box::new(f));
        self
    }

    /// Old name for [`Callbacks::on_success`]; ignored when a success
    /// callback is set.
    #[deprecated(note = "use `on_success` instead")]
    pub fn callback(mut self, f: impl FnMut(&T) + 'a) -> Self {
        self.legacy = Some(Box::new(f));
        self
    }

    fn dispatch(&mut self, outcome: Outcome, element: &T) {
        match outcome {
            Outcome::Failure => {
                if let Some(fail) = self.fail.as_mut() {
                    fail(element);
                }
            }
            Outcome::Success => {
                if let Some(success) = self.success.as_mut() {
                    success(element);
                } else if let Some(legacy) = self.legacy.as_mut() {
                    if !self.legacy_warned {
                        warn!("callback is deprecated, use success instead");
                        self.legacy_warned = true;
                    }
                    legacy(element);
                }
            }
        }
    }

    fn finish(&mut self, report: &FitReport) {
        if let Some(complete) = self.complete.as_mut() {
            complete(report);
        }
    }
}

/// Auto-sizes fonts so text fills its container.
#[derive(Clone, Debug, Default)]
pub struct TextFiller {
    options: FitOptions,
}

impl TextFiller {
    /// Validate `options` once and build a filler around them.
    pub fn new(options: FitOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        if options.debug {
            debug!("Opts: {options:?}");
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    /// Fit a single target.
    pub fn fill<T: FitTarget + ?Sized>(&self, target: &mut T) -> ElementReport {
        self.fill_at(0, target)
    }

    /// Fit every target in order, one outcome each, then signal completion
    /// exactly once.
    pub fn fill_all<I, T>(&self, targets: I, callbacks: &mut Callbacks<'_, T>) -> FitReport
    where
        I: IntoIterator<Item = T>,
        T: FitTarget,
    {
        let mut report = FitReport::default();

        for (index, mut target) in targets.into_iter().enumerate() {
            let element = self.fill_at(index, &mut target);
            callbacks.dispatch(element.outcome, &target);
            report.elements.push(element);
        }

        debug!(
            "Batch complete: {} elements, {} succeeded, {} failed",
            report.len(),
            report.succeeded(),
            report.failed()
        );
        callbacks.finish(&report);
        report
    }

    fn fill_at<T: FitTarget + ?Sized>(&self, index: usize, target: &mut T) -> ElementReport {
        let options = &self.options;
        let container = target.container_size();
        let available = Size::new(
            explicit_or(options.explicit_width, container.width),
            explicit_or(options.explicit_height, container.height),
        );

        // Nothing to size means nothing can overflow.
        if !target.has_text() {
            warn!("Element {index}: no visible text element to fit");
            return ElementReport {
                index,
                outcome: Outcome::Success,
                available,
                height_fit: None,
                width_fit: None,
                font_size: 0.0,
                original_font_size: 0.0,
            };
        }

        let original_font_size = target.font_size();
        let line_height_ratio = target.line_height() / original_font_size;
        let min = options.min_font_pixels;
        let max = options.ceiling().resolve(available.height);

        if options.debug {
            debug!(
                "Vars: maxHeight: {}, maxWidth: {}",
                available.height, available.width
            );
        }

        let height_fit = if options.width_only {
            None
        } else {
            let request = SizingRequest::new(Axis::Height, available.height, min, max);
            Some(self.size_axis(target, &request))
        };

        if options.width_only {
            target.set_no_wrap();
        }
        let request = SizingRequest::new(Axis::Width, available.width, min, max);
        let width_fit = self.size_axis(target, &request);

        let final_size = match height_fit {
            Some(height_fit) => height_fit.min(width_fit),
            None => width_fit,
        };
        target.set_font_size(final_size as f32);

        if options.change_line_height && line_height_ratio.is_finite() {
            target.set_line_height(line_height_ratio * final_size as f32);
        }

        if options.debug {
            debug!("Final: {}px", target.font_size());
        }

        let overflows = target.measure(Axis::Width) > available.width
            || (!options.width_only && target.measure(Axis::Height) > available.height);

        let outcome = if overflows {
            target.set_font_size(original_font_size);
            Outcome::Failure
        } else {
            Outcome::Success
        };
        debug!("Element {index}: {outcome:?} at {}px", target.font_size());

        ElementReport {
            index,
            outcome,
            available,
            height_fit,
            width_fit: Some(width_fit),
            font_size: target.font_size(),
            original_font_size,
        }
    }

    fn size_axis<T: FitTarget + ?Sized>(&self, target: &mut T, request: &SizingRequest) -> u32 {
        let axis = request.axis;
        let debug = self.options.debug;
        if debug {
            debug!(
                "{}: target: {}, minFontPixels: {}, maxFontPixels: {}",
                axis.prefix(),
                request.target_pixels,
                request.min_font_pixels,
                request.max_font_pixels
            );
        }

        let mut probe = |size: u32| {
            target.set_font_size(size as f32);
            target.measure(axis)
        };
        let result = request.run_traced(&mut probe, |step| {
            if debug {
                trace_step(axis, step);
            }
        });
        result.font_size
    }
}

/// Explicit overrides win unless they are zero.
fn explicit_or(explicit: Option<f32>, measured: f32) -> f32 {
    match explicit {
        Some(value) if value > 0.0 => value,
        _ => measured,
    }
}

fn trace_step(axis: Axis, step: &SearchStep) {
    let marker = if step.extent > step.target {
        '>'
    } else if step.extent == step.target {
        '='
    } else {
        '<'
    };
    debug!(
        "{}{} font: {}px, {}: {} {} {}, minFontPixels: {}, maxFontPixels: {}",
        axis.prefix(),
        if step.optimistic { "*" } else { ":" },
        step.font_size,
        axis.prefix(),
        step.extent,
        marker,
        step.target,
        step.min,
        step.max
    );
}

// ===================================================================
// Tests
// ===================================================================
