//! Placed component instances.
//!
//! A [`PlacedComponent`] pairs a shared [`ComponentDefinition`] with a board
//! position, a rotation, and per-instance overrides. The definition handle
//! is reference counted: removing a definition from a library never
//! invalidates placements that still use it.

use std::sync::Arc;

use crate::geometry::Rotation;
use crate::model::definition::ComponentDefinition;

/// A positioned, rotatable instance of a definition on a board.
///
/// `(x, y)` anchors the top-left of the *unrotated* bounding box; `uid` is
/// assigned by the caller (the model never generates identifiers). Fields
/// are public for reads; edits from dialogs go through [`ComponentEdit`] so
/// the board can re-validate bounds atomically.
#[derive(Debug, Clone)]
pub struct PlacedComponent {
    pub definition: Arc<ComponentDefinition>,
    pub x: i32,
    pub y: i32,
    pub uid: String,
    pub rotation: Rotation,
    pub custom_color: String,
    pub custom_width: i32,
    pub custom_height: i32,
    pub value: String,
}

impl PlacedComponent {
    /// New instance with overrides defaulting to the definition's values.
    pub fn new(
        definition: Arc<ComponentDefinition>,
        x: i32,
        y: i32,
        uid: impl Into<String>,
        rotation: Rotation,
    ) -> Self {
        let custom_color = definition.default_color.clone();
        let custom_width = definition.width;
        let custom_height = definition.height;
        let value = definition.name.clone();
        Self {
            definition,
            x,
            y,
            uid: uid.into(),
            rotation,
            custom_color,
            custom_width,
            custom_height,
            value,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.custom_color = color.into();
        self
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.custom_width = width;
        self.custom_height = height;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Effective bounding-box width on the board (extents swap at 90/270).
    pub fn width(&self) -> i32 {
        if self.rotation.swaps_extents() {
            self.custom_height
        } else {
            self.custom_width
        }
    }

    /// Effective bounding-box height on the board.
    pub fn height(&self) -> i32 {
        if self.rotation.swaps_extents() {
            self.custom_width
        } else {
            self.custom_height
        }
    }

    /// Map a board-relative cell of the rotated bounding box back to the
    /// footprint's unrotated frame, using the custom extents as the pivot.
    pub fn rotated_to_local(&self, rel_x: i32, rel_y: i32) -> (i32, i32) {
        self.rotation
            .to_local(rel_x, rel_y, self.custom_width, self.custom_height)
    }

    /// Map a footprint-frame cell to board-relative coordinates under the
    /// current rotation. Inverse of [`PlacedComponent::rotated_to_local`];
    /// used by renderers to draw ghosts and by tests to verify the pairing.
    pub fn local_to_rotated(&self, local_x: i32, local_y: i32) -> (i32, i32) {
        self.rotation
            .from_local(local_x, local_y, self.custom_width, self.custom_height)
    }

    /// Pin label under a board cell, if any.
    ///
    /// Pin cells are authoritative on their own: no body-membership or
    /// bounding-box check is applied, so a pin defined outside the body
    /// still answers here.
    pub fn pin_at(&self, board_x: i32, board_y: i32) -> Option<&str> {
        let (local_x, local_y) = self.rotated_to_local(board_x - self.x, board_y - self.y);
        self.definition.pin_label(local_x, local_y)
    }

    /// Whether a board cell is covered by this instance's body.
    pub fn is_body_at(&self, board_x: i32, board_y: i32) -> bool {
        let rel_x = board_x - self.x;
        let rel_y = board_y - self.y;
        // Cheap reject against the effective extents before the frame map.
        if rel_x < 0 || rel_x >= self.width() || rel_y < 0 || rel_y >= self.height() {
            return false;
        }
        let (local_x, local_y) = self.rotated_to_local(rel_x, rel_y);
        self.definition.is_body_cell(local_x, local_y)
    }
}

/// Atomic edit applied to a placed component from an editing dialog.
///
/// All supplied fields land together; the board's
/// [`edit_component`](crate::model::board::Board::edit_component) re-runs
/// the bounds gate before committing.
#[derive(Debug, Clone, Default)]
pub struct ComponentEdit {
    pub value: Option<String>,
    pub color: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub rotation: Option<Rotation>,
}

impl PlacedComponent {
    /// Apply an edit in place, without bounds checking.
    pub fn apply_edit(&mut self, edit: &ComponentEdit) {
        if let Some(value) = &edit.value {
            self.value = value.clone();
        }
        if let Some(color) = &edit.color {
            self.custom_color = color.clone();
        }
        if let Some(width) = edit.width {
            self.custom_width = width;
        }
        if let Some(height) = edit.height {
            self.custom_height = height;
        }
        if let Some(rotation) = edit.rotation {
            self.rotation = rotation;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::definition::ComponentKind;
    use std::collections::HashMap;

    fn resistor() -> Arc<ComponentDefinition> {
        Arc::new(ComponentDefinition::new(
            "Resistor",
            3,
            1,
            HashMap::from([((0, 0), "1".to_string()), ((2, 0), "2".to_string())]),
            ComponentKind::Resistor,
            "#D4AC0D",
        ))
    }

    #[test]
    fn test_defaults_come_from_definition() {
        let placed = PlacedComponent::new(resistor(), 4, 2, "r1", Rotation::R0);
        assert_eq!(placed.custom_color, "#D4AC0D");
        assert_eq!((placed.custom_width, placed.custom_height), (3, 1));
        assert_eq!(placed.value, "Resistor");
    }

    #[test]
    fn test_effective_extents_swap() {
        let mut placed = PlacedComponent::new(resistor(), 0, 0, "r1", Rotation::R0);
        assert_eq!((placed.width(), placed.height()), (3, 1));
        placed.rotation = Rotation::R90;
        assert_eq!((placed.width(), placed.height()), (1, 3));
        placed.rotation = Rotation::R180;
        assert_eq!((placed.width(), placed.height()), (3, 1));
    }

    #[test]
    fn test_pin_lookup_follows_rotation() {
        // 3x1 resistor at (4, 2) rotated 90: occupies (4,2)..(4,4) downward,
        // pin "1" (the left end) ends up at the top cell.
        let placed = PlacedComponent::new(resistor(), 4, 2, "r1", Rotation::R90);
        assert_eq!(placed.pin_at(4, 2), Some("1"));
        assert_eq!(placed.pin_at(4, 4), Some("2"));
        assert_eq!(placed.pin_at(4, 3), None);
        assert_eq!(placed.pin_at(5, 2), None);
    }

    #[test]
    fn test_body_respects_effective_bounds() {
        let placed = PlacedComponent::new(resistor(), 4, 2, "r1", Rotation::R90);
        assert!(placed.is_body_at(4, 2));
        assert!(placed.is_body_at(4, 4));
        assert!(!placed.is_body_at(5, 2));
        assert!(!placed.is_body_at(4, 5));
        assert!(!placed.is_body_at(3, 2));
    }

    #[test]
    fn test_frame_maps_are_inverse() {
        let placed = PlacedComponent::new(resistor(), 0, 0, "r1", Rotation::R270);
        for x in 0..3 {
            let (rx, ry) = placed.local_to_rotated(x, 0);
            assert_eq!(placed.rotated_to_local(rx, ry), (x, 0));
        }
    }

    #[test]
    fn test_edit_applies_all_fields() {
        let mut placed = PlacedComponent::new(resistor(), 0, 0, "r1", Rotation::R0);
        placed.apply_edit(&ComponentEdit {
            value: Some("10k".to_string()),
            rotation: Some(Rotation::R180),
            ..ComponentEdit::default()
        });
        assert_eq!(placed.value, "10k");
        assert_eq!(placed.rotation, Rotation::R180);
        assert_eq!(placed.custom_width, 3);
    }
}
