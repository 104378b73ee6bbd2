//! Scenes — laid-out containers holding text, fitted as one batch.
//!
//! A scene is a root flex container with child boxes. Each box holds one
//! or more text blocks; the first visible one is the text that gets fitted
//! to the box's content area.
//!
//! # Architecture
//!
//! ```text
//!  SceneDescription (JSON) ──▸ Scene ──▸ LayoutEngine (taffy)
//!                                │             │ content sizes
//!                                ▼             ▼
//!                           SceneTarget ◂── BoundBlock ──▸ TextMeasurer
//!                                │
//!                                ▼
//!                      TextFiller::fill_all ──▸ SceneReport
//! ```

use serde::{Deserialize, Serialize};
use taffy::prelude::*;
use taffy::Style;
use thiserror::Error;
use uuid::Uuid;

use textfill_core::{
    Axis, Callbacks, ConfigError, ElementReport, FitOptions, FitTarget, TextFiller,
};
use textfill_text::{select_visible, BoundBlock, LineHeight, TextBlock, TextMeasurer, TextStyle, WrapMode};

use crate::engine::{LayoutEngine, LayoutError};

// ---------------------------------------------------------------
// Error types
// ---------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Invalid fit options: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown box '{0}'")]
    UnknownBox(String),
}

// ---------------------------------------------------------------
// Description (serde)
// ---------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    Row,
    #[default]
    Column,
}

impl From<FlowDirection> for FlexDirection {
    fn from(direction: FlowDirection) -> Self {
        match direction {
            FlowDirection::Row => FlexDirection::Row,
            FlowDirection::Column => FlexDirection::Column,
        }
    }
}

/// The root container.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootSpec {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub direction: FlowDirection,
    #[serde(default)]
    pub gap: f32,
    #[serde(default)]
    pub padding: f32,
}

/// A child box. Missing dimensions are resolved by flex layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxSpec {
    pub name: String,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default)]
    pub grow: f32,
    #[serde(default)]
    pub padding: f32,
    #[serde(default)]
    pub text: Vec<TextSpec>,
}

/// A text element inside a box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextSpec {
    pub content: String,
    pub visible: bool,
    pub font_size: f32,
    /// Fixed line height in pixels; proportional to the font when absent.
    pub line_height: Option<f32>,
    pub family: String,
    pub weight: u16,
    pub italic: bool,
    pub letter_spacing: f32,
    pub no_wrap: bool,
}

impl Default for TextSpec {
    fn default() -> Self {
        let style = TextStyle::default();
        Self {
            content: String::new(),
            visible: true,
            font_size: style.font_size,
            line_height: None,
            family: style.family,
            weight: style.weight,
            italic: style.italic,
            letter_spacing: style.letter_spacing,
            no_wrap: false,
        }
    }
}

impl From<TextSpec> for TextBlock {
    fn from(spec: TextSpec) -> Self {
        let style = TextStyle {
            font_size: spec.font_size,
            line_height: spec
                .line_height
                .map_or_else(LineHeight::default, LineHeight::Absolute),
            family: spec.family,
            weight: spec.weight,
            italic: spec.italic,
            letter_spacing: spec.letter_spacing,
            wrap: if spec.no_wrap {
                WrapMode::None
            } else {
                WrapMode::Word
            },
        };
        TextBlock {
            content: spec.content,
            style,
            visible: spec.visible,
        }
    }
}

/// Complete scene file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDescription {
    #[serde(default)]
    pub options: FitOptions,
    pub root: RootSpec,
    #[serde(default)]
    pub boxes: Vec<BoxSpec>,
}

// ---------------------------------------------------------------
// Runtime scene
// ---------------------------------------------------------------

/// A named box and its text blocks.
#[derive(Clone, Debug)]
pub struct SceneBox {
    pub id: Uuid,
    pub name: String,
    pub blocks: Vec<TextBlock>,
}

impl SceneBox {
    /// The block that was (or would be) fitted.
    pub fn selected(&self) -> Option<&TextBlock> {
        self.blocks.iter().find(|b| b.visible)
    }
}

/// One box of a scene as seen by the fitter.
pub struct SceneTarget<'a> {
    id: Uuid,
    name: &'a str,
    block: BoundBlock<'a>,
}

impl SceneTarget<'_> {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name
    }
}

impl FitTarget for SceneTarget<'_> {
    fn has_text(&self) -> bool {
        self.block.has_text()
    }

    fn container_size(&self) -> textfill_core::Size {
        self.block.container_size()
    }

    fn font_size(&self) -> f32 {
        self.block.font_size()
    }

    fn line_height(&self) -> f32 {
        self.block.line_height()
    }

    fn set_font_size(&mut self, px: f32) {
        self.block.set_font_size(px)
    }

    fn set_no_wrap(&mut self) {
        self.block.set_no_wrap()
    }

    fn set_line_height(&mut self, px: f32) {
        self.block.set_line_height(px)
    }

    fn measure(&mut self, axis: Axis) -> f32 {
        self.block.measure(axis)
    }
}

/// Per-box result, in scene order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SceneEntry {
    pub name: String,
    pub id: Uuid,
    #[serde(flatten)]
    pub element: ElementReport,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SceneReport {
    pub entries: Vec<SceneEntry>,
    pub succeeded: usize,
    pub failed: usize,
}

impl SceneReport {
    pub fn get(&self, name: &str) -> Option<&SceneEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

pub struct Scene {
    layout: LayoutEngine,
    measurer: TextMeasurer,
    root: Uuid,
    boxes: Vec<SceneBox>,
    options: FitOptions,
}

impl Scene {
    /// Create an empty scene with a root container.
    pub fn new(root: &RootSpec, measurer: TextMeasurer) -> Result<Self, LayoutError> {
        let mut layout = LayoutEngine::new();
        let root_id = Uuid::new_v4();

        let mut style = LayoutEngine::create_flex_style(root.direction.into(), root.gap, root.padding);
        style.size = Size {
            width: Dimension::length(root.width),
            height: Dimension::length(root.height),
        };
        layout.add_box(root_id, None, style)?;

        Ok(Self {
            layout,
            measurer,
            root: root_id,
            boxes: Vec::new(),
            options: FitOptions::default(),
        })
    }

    /// Parse and build a scene with system fonts.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let description: SceneDescription = serde_json::from_str(json)?;
        Self::from_description(description, TextMeasurer::new())
    }

    pub fn from_description(description: SceneDescription, measurer: TextMeasurer) -> Result<Self, SceneError> {
        description.options.validate()?;

        let mut scene = Scene::new(&description.root, measurer)?;
        scene.options = description.options;

        for spec in description.boxes {
            let style = box_style(&spec);
            let blocks = spec.text.into_iter().map(TextBlock::from).collect();
            scene.add_box(spec.name, style, blocks)?;
        }

        log::debug!("Scene loaded: {} boxes", scene.boxes.len());
        Ok(scene)
    }

    /// Append a box under the root.
    pub fn add_box(&mut self, name: impl Into<String>, style: Style, blocks: Vec<TextBlock>) -> Result<Uuid, LayoutError> {
        let id = Uuid::new_v4();
        self.layout.add_box(id, Some(self.root), style)?;
        self.boxes.push(SceneBox {
            id,
            name: name.into(),
            blocks,
        });
        Ok(id)
    }

    /// Change a box's width or height.
    pub fn resize_box(&mut self, name: &str, axis: Axis, value: f32) -> Result<(), SceneError> {
        let id = self
            .get(name)
            .map(|b| b.id)
            .ok_or_else(|| SceneError::UnknownBox(name.to_owned()))?;
        self.layout.update_dimension(id, axis, value)?;
        Ok(())
    }

    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: FitOptions) {
        self.options = options;
    }

    pub fn boxes(&self) -> &[SceneBox] {
        &self.boxes
    }

    pub fn get(&self, name: &str) -> Option<&SceneBox> {
        self.boxes.iter().find(|b| b.name == name)
    }

    pub fn measurer(&self) -> &TextMeasurer {
        &self.measurer
    }

    /// Content size of a box from the last layout pass.
    pub fn content_size(&self, name: &str) -> Option<textfill_core::Size> {
        self.get(name).and_then(|b| self.layout.content_size(b.id))
    }

    /// Lay out the scene and fit every box.
    pub fn fit_all(&mut self) -> Result<SceneReport, SceneError> {
        self.fit_all_with(&mut Callbacks::new())
    }

    /// Lay out the scene and fit every box, notifying `callbacks`.
    pub fn fit_all_with<'s>(
        &'s mut self,
        callbacks: &mut Callbacks<'_, SceneTarget<'s>>,
    ) -> Result<SceneReport, SceneError> {
        self.layout.compute_layout(self.root)?;
        let filler = TextFiller::new(self.options.clone())?;

        let layout = &self.layout;
        let measurer = &self.measurer;
        let ids: Vec<(Uuid, String)> = self.boxes.iter().map(|b| (b.id, b.name.clone())).collect();

        let targets = self.boxes.iter_mut().map(|scene_box| {
            let SceneBox { id, name, blocks } = scene_box;
            let container = layout.content_size(*id).unwrap_or(textfill_core::Size::ZERO);
            SceneTarget {
                id: *id,
                name: name.as_str(),
                block: BoundBlock::new(measurer, select_visible(blocks), container),
            }
        });
        let report = filler.fill_all(targets, callbacks);

        let entries: Vec<SceneEntry> = report
            .elements
            .into_iter()
            .zip(ids)
            .map(|(element, (id, name))| SceneEntry { name, id, element })
            .collect();
        let failed = entries
            .iter()
            .filter(|e| e.element.outcome == textfill_core::Outcome::Failure)
            .count();

        Ok(SceneReport {
            succeeded: entries.len() - failed,
            failed,
            entries,
        })
    }
}

fn box_style(spec: &BoxSpec) -> Style {
    let dimension = |value: Option<f32>| value.map_or_else(Dimension::auto, Dimension::length);
    let mut style = LayoutEngine::create_box_style(0.0, 0.0, spec.padding);
    style.size = Size {
        width: dimension(spec.width),
        height: dimension(spec.height),
    };
    style.flex_grow = spec.grow;
    if spec.grow > 0.0 {
        style.flex_basis = Dimension::length(0.0);
    }
    style
}

// ===================================================================
// Tests
// ===================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    const SCENE: &str = r#"{
        "options": { "maxFontPixels": 64, "minFontPixels": 6 },
        "root": { "width": 400, "height": 300, "direction": "column", "gap": 10, "padding": 10 },
        "boxes": [
            { "name": "title", "height": 80, "padding": 4,
              "text": [ { "content": "Headline" } ] },
            { "name": "body", "grow": 1,
              "text": [ { "content": "hidden draft", "visible": false },
                        { "content": "A longer paragraph of body copy", "lineHeight": 18 } ] },
            { "name": "empty", "height": 20 }
        ]
    }"#;

    #[test]
    fn test_parse_description() {
        let description: SceneDescription = serde_json::from_str(SCENE).unwrap();
        assert_eq!(description.options.max_font_pixels, 64);
        assert_eq!(description.root.direction, FlowDirection::Column);
        assert_eq!(description.boxes.len(), 3);
        let body = &description.boxes[1];
        assert_eq!(body.grow, 1.0);
        assert!(!body.text[0].visible);
        assert_eq!(body.text[1].line_height, Some(18.0));
        assert_eq!(body.text[1].font_size, 16.0);
    }

    #[test]
    fn test_text_spec_to_block() {
        let block = TextBlock::from(TextSpec {
            content: "x".into(),
            line_height: Some(30.0),
            no_wrap: true,
            ..Default::default()
        });
        assert_eq!(block.style.line_height, LineHeight::Absolute(30.0));
        assert_eq!(block.style.wrap, WrapMode::None);
        assert!(block.visible);
    }

    #[test]
    fn test_invalid_options_rejected() {
        let json = r#"{ "options": { "minFontPixels": 90 }, "root": { "width": 10, "height": 10 } }"#;
        assert!(matches!(Scene::from_json(json), Err(SceneError::Config(_))));
    }

    #[test]
    fn test_fit_scene_layout_and_selection() {
        let mut scene = Scene::from_json(SCENE).unwrap();
        let report = scene.fit_all().unwrap();

        assert_eq!(report.entries.len(), 3);
        assert_eq!(report.succeeded + report.failed, 3);

        // root content 380 wide; title box 80 high with 4px padding.
        assert_eq!(scene.content_size("title"), Some(textfill_core::Size::new(372.0, 72.0)));
        // body grows into 280 - 80 - 20 - 2 * 10 = 160.
        let body = scene.content_size("body").unwrap();
        assert!((body.height - 160.0).abs() < 0.5, "body height {}", body.height);

        // The hidden draft is never touched.
        let body_box = scene.get("body").unwrap();
        assert_eq!(body_box.blocks[0].style.font_size, 16.0);
        assert_eq!(body_box.selected().unwrap().content, "A longer paragraph of body copy");

        // No text: nothing sized, nothing overflows.
        let empty = report.get("empty").unwrap();
        assert_eq!(empty.element.outcome, textfill_core::Outcome::Success);
        assert_eq!(empty.element.width_fit, None);

        for entry in &report.entries {
            if entry.element.outcome == textfill_core::Outcome::Success && entry.element.width_fit.is_some() {
                let size = entry.element.font_size;
                assert!((6.0..=64.0).contains(&size), "{}: {size}", entry.name);
            }
        }
    }

    #[test]
    fn test_callbacks_see_box_names() {
        let mut scene = Scene::from_json(SCENE).unwrap();
        let seen = RefCell::new(Vec::new());
        let done = RefCell::new(0);
        let mut callbacks = Callbacks::new()
            .on_success(|t: &SceneTarget<'_>| seen.borrow_mut().push(t.name().to_owned()))
            .on_fail(|t: &SceneTarget<'_>| seen.borrow_mut().push(t.name().to_owned()))
            .on_complete(|_| *done.borrow_mut() += 1);

        scene.fit_all_with(&mut callbacks).unwrap();
        drop(callbacks);

        assert_eq!(seen.into_inner(), vec!["title", "body", "empty"]);
        assert_eq!(done.into_inner(), 1);
    }

    #[test]
    fn test_resize_unknown_box() {
        let mut scene = Scene::from_json(SCENE).unwrap();
        assert!(matches!(
            scene.resize_box("nope", Axis::Width, 10.0),
            Err(SceneError::UnknownBox(_))
        ));
        scene.resize_box("empty", Axis::Height, 40.0).unwrap();
        scene.fit_all().unwrap();
        assert_eq!(scene.content_size("empty").unwrap().height, 40.0);
    }

    #[test]
    fn test_report_serializes_flat() {
        let mut scene = Scene::from_json(SCENE).unwrap();
        let report = scene.fit_all().unwrap();
        let json = serde_json::to_value(&report).unwrap();
        let first = &json["entries"][0];
        assert_eq!(first["name"], "title");
        assert!(first.get("outcome").is_some());
        assert!(first.get("fontSize").is_some());
    }
}
