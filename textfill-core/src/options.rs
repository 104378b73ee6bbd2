//! Fitter configuration.
//!
//! Field names follow the camelCase keys used by scene files, so a JSON
//! object like `{ "maxFontPixels": 0, "widthOnly": true }` deserializes
//! directly. Missing keys take the documented defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MAX_FONT_PIXELS: i32 = 40;
pub const DEFAULT_MIN_FONT_PIXELS: u32 = 4;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("minFontPixels ({min}) is greater than maxFontPixels ({max})")]
    InvertedBounds { min: u32, max: u32 },
    #[error("{name} must be a finite, non-negative number of pixels, got {value}")]
    InvalidDimension { name: &'static str, value: f32 },
    #[error("Invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Upper search bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontCeiling {
    Fixed(u32),
    /// Use the available height as the ceiling.
    FromHeight,
}

impl FontCeiling {
    /// Resolve to a pixel ceiling given the available height.
    pub fn resolve(self, available_height: f32) -> u32 {
        match self {
            FontCeiling::Fixed(px) => px,
            FontCeiling::FromHeight => {
                if available_height.is_finite() && available_height > 0.0 {
                    available_height.floor() as u32
                } else {
                    0
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FitOptions {
    /// Ceiling in pixels; `<= 0` derives it from the available height.
    pub max_font_pixels: i32,
    pub min_font_pixels: u32,
    /// Only balance the width; the text is forced onto a single line.
    pub width_only: bool,
    /// Overrides the measured container width.
    pub explicit_width: Option<f32>,
    /// Overrides the measured container height.
    pub explicit_height: Option<f32>,
    /// Rescale the containing box's line height along with the font.
    pub change_line_height: bool,
    /// Trace every search step at `debug` level.
    pub debug: bool,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_font_pixels: DEFAULT_MAX_FONT_PIXELS,
            min_font_pixels: DEFAULT_MIN_FONT_PIXELS,
            width_only: false,
            explicit_width: None,
            explicit_height: None,
            change_line_height: false,
            debug: false,
        }
    }
}

impl FitOptions {
    /// Parse options from a JSON object and validate them.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: FitOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn ceiling(&self) -> FontCeiling {
        if self.max_font_pixels <= 0 {
            FontCeiling::FromHeight
        } else {
            FontCeiling::Fixed(self.max_font_pixels as u32)
        }
    }

    /// Reject configurations the search cannot make sense of.
    ///
    /// A derived ceiling is only known per element, so bounds are checked
    /// for fixed ceilings only.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let FontCeiling::Fixed(max) = self.ceiling() {
            if self.min_font_pixels > max {
                return Err(ConfigError::InvertedBounds {
                    min: self.min_font_pixels,
                    max,
                });
            }
        }

        for (name, value) in [
            ("explicitWidth", self.explicit_width),
            ("explicitHeight", self.explicit_height),
        ] {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfigError::InvalidDimension { name, value });
                }
            }
        }
        Ok(())
    }
}
