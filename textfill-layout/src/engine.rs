use rustc_hash::{FxHashMap, FxHashSet};
use taffy::prelude::*;
use taffy::{Layout, NodeId, Style, TaffyError, TaffyTree};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Taffy error: {0}")]
    Taffy(#[from] TaffyError),
    #[error("Box not found: {0}")]
    BoxNotFound(Uuid),
    #[error("Parent not found: {0}")]
    ParentNotFound(Uuid),
}

/// Container layout backed by Taffy.
///
/// Maps box UUIDs to Taffy `NodeId`s, with dirty-tracking so a batch of
/// fits only lays the tree out once.
pub struct LayoutEngine {
    taffy: TaffyTree,

    box_to_node: FxHashMap<Uuid, NodeId>,

    dirty: FxHashSet<Uuid>,

    /// Computed layouts from the last pass.
    layout_results: FxHashMap<Uuid, Layout>,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            box_to_node: FxHashMap::default(),
            dirty: FxHashSet::default(),
            layout_results: FxHashMap::default(),
        }
    }

    // ---------------------------------------------------------------
    // Style helpers
    // ---------------------------------------------------------------

    /// Fixed-size box with uniform padding.
    pub fn create_box_style(width: f32, height: f32, padding: f32) -> Style {
        Style {
            size: Size {
                width: Dimension::length(width),
                height: Dimension::length(height),
            },
            padding: uniform(padding),
            ..Style::default()
        }
    }

    /// Flex container with the given direction, gap and padding.
    pub fn create_flex_style(direction: FlexDirection, gap: f32, padding: f32) -> Style {
        Style {
            display: Display::Flex,
            flex_direction: direction,
            gap: Size {
                width: LengthPercentage::length(gap),
                height: LengthPercentage::length(gap),
            },
            padding: uniform(padding),
            ..Style::default()
        }
    }

    // ---------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------

    /// Add a box, optionally under a parent.
    pub fn add_box(&mut self, id: Uuid, parent_id: Option<Uuid>, style: Style) -> Result<(), LayoutError> {
        let parent_node = match parent_id {
            Some(pid) => Some(
                *self
                    .box_to_node
                    .get(&pid)
                    .ok_or(LayoutError::ParentNotFound(pid))?,
            ),
            None => None,
        };

        let node = self.taffy.new_leaf(style)?;
        self.box_to_node.insert(id, node);

        if let Some(parent_node) = parent_node {
            self.taffy.add_child(parent_node, node)?;
        }

        self.dirty.insert(id);
        Ok(())
    }

    pub fn remove_box(&mut self, id: Uuid) -> Result<(), LayoutError> {
        let node = *self.box_to_node.get(&id).ok_or(LayoutError::BoxNotFound(id))?;

        self.taffy.remove(node)?;
        self.box_to_node.remove(&id);
        self.layout_results.remove(&id);
        self.dirty.remove(&id);
        // Siblings move when a box leaves.
        self.dirty.extend(self.box_to_node.keys().copied());
        Ok(())
    }

    /// Update the width or height of an existing box.
    pub fn update_dimension(&mut self, id: Uuid, axis: textfill_core::Axis, value: f32) -> Result<(), LayoutError> {
        let node = *self.box_to_node.get(&id).ok_or(LayoutError::BoxNotFound(id))?;

        let mut style = self.taffy.style(node)?.clone();
        match axis {
            textfill_core::Axis::Width => style.size.width = Dimension::length(value),
            textfill_core::Axis::Height => style.size.height = Dimension::length(value),
        }
        self.taffy.set_style(node, style)?;
        self.dirty.insert(id);
        Ok(())
    }

    // ---------------------------------------------------------------
    // Layout computation
    // ---------------------------------------------------------------

    /// Lay out the tree rooted at `root_id`.
    ///
    /// No-op while nothing is dirty.
    pub fn compute_layout(&mut self, root_id: Uuid) -> Result<(), LayoutError> {
        if self.dirty.is_empty() {
            return Ok(());
        }

        let root_node = *self
            .box_to_node
            .get(&root_id)
            .ok_or(LayoutError::BoxNotFound(root_id))?;

        self.taffy.compute_layout(root_node, Size::MAX_CONTENT)?;

        for (&id, &node) in &self.box_to_node {
            if let Ok(layout) = self.taffy.layout(node) {
                self.layout_results.insert(id, *layout);
            }
        }

        self.dirty.clear();
        Ok(())
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    pub fn get_layout(&self, id: Uuid) -> Option<&Layout> {
        self.layout_results.get(&id)
    }

    /// Content-box size of a laid-out box (border box minus padding and
    /// border).
    pub fn content_size(&self, id: Uuid) -> Option<textfill_core::Size> {
        self.layout_results.get(&id).map(|layout| {
            let insets = |a: f32, b: f32, c: f32, d: f32| a + b + c + d;
            textfill_core::Size::new(
                (layout.size.width
                    - insets(
                        layout.padding.left,
                        layout.padding.right,
                        layout.border.left,
                        layout.border.right,
                    ))
                .max(0.0),
                (layout.size.height
                    - insets(
                        layout.padding.top,
                        layout.padding.bottom,
                        layout.border.top,
                        layout.border.bottom,
                    ))
                .max(0.0),
            )
        })
    }

    pub fn node_count(&self) -> usize {
        self.box_to_node.len()
    }

    pub fn dirty_count(&self) -> usize {
        self.dirty.len()
    }
}

fn uniform(padding: f32) -> taffy::Rect<LengthPercentage> {
    taffy::Rect {
        left: LengthPercentage::length(padding),
        right: LengthPercentage::length(padding),
        top: LengthPercentage::length(padding),
        bottom: LengthPercentage::length(padding),
    }
}

// ===================================================================
// Tests
// ===================================================================
