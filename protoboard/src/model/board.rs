//! The board aggregate: a fixed grid holding placed components and wires.
//!
//! Insertion order doubles as stacking order, so every spatial query scans
//! in reverse to return the topmost match. The placement gate is bounds-only:
//! overlapping components are a tolerated state (parts stack on both faces
//! of a real perfboard), and overlap ties resolve to the most recent
//! addition.

use crate::model::placement::{ComponentEdit, PlacedComponent};
use crate::model::wire::{Wire, WireEdit, DEFAULT_HIT_THRESHOLD};

/// Fixed-size grid surface. Dimensions are set at construction and never
/// change; the component and wire collections mutate through the methods
/// below, one discrete user action at a time.
#[derive(Debug, Clone)]
pub struct Board {
    width: i32,
    height: i32,
    components: Vec<PlacedComponent>,
    wires: Vec<Wire>,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            components: Vec::new(),
            wires: Vec::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Placed components in insertion (stacking) order.
    pub fn components(&self) -> &[PlacedComponent] {
        &self.components
    }

    /// Wires in insertion (stacking) order.
    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// Whether a placement's effective bounding box lies fully on the board.
    ///
    /// This is the sole placement criterion; collisions are never checked.
    pub fn fits(&self, placed: &PlacedComponent) -> bool {
        placed.x >= 0
            && placed.y >= 0
            && placed.x + placed.width() <= self.width
            && placed.y + placed.height() <= self.height
    }

    /// Accept a placement if it fits, rejecting out-of-bounds instances
    /// without touching the collection.
    pub fn add_component(&mut self, placed: PlacedComponent) -> bool {
        if !self.fits(&placed) {
            tracing::debug!(
                uid = %placed.uid,
                x = placed.x,
                y = placed.y,
                "rejected out-of-bounds placement"
            );
            return false;
        }
        tracing::debug!(uid = %placed.uid, x = placed.x, y = placed.y, "placed component");
        self.components.push(placed);
        true
    }

    /// Remove every component with a matching uid. No-op when absent.
    pub fn remove_component(&mut self, uid: &str) {
        self.components.retain(|c| c.uid != uid);
    }

    /// Component with a matching uid, if present.
    pub fn component(&self, uid: &str) -> Option<&PlacedComponent> {
        self.components.iter().find(|c| c.uid == uid)
    }

    pub fn add_wire(&mut self, wire: Wire) {
        self.wires.push(wire);
    }

    /// Remove the first wire equal to the given one. No-op when absent.
    pub fn remove_wire(&mut self, wire: &Wire) -> bool {
        match self.wires.iter().position(|w| w == wire) {
            Some(index) => {
                self.wires.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove a wire by stacking index.
    pub fn remove_wire_at(&mut self, index: usize) -> Option<Wire> {
        if index < self.wires.len() {
            Some(self.wires.remove(index))
        } else {
            None
        }
    }

    /// Topmost component whose body covers the cell.
    pub fn component_at(&self, x: i32, y: i32) -> Option<&PlacedComponent> {
        self.components.iter().rev().find(|c| c.is_body_at(x, y))
    }

    /// Topmost wire within the default hit threshold of the point.
    pub fn wire_at(&self, x: i32, y: i32) -> Option<&Wire> {
        self.wire_index_at(x, y).map(|index| &self.wires[index])
    }

    /// Stacking index of the topmost wire near the point.
    pub fn wire_index_at(&self, x: i32, y: i32) -> Option<usize> {
        self.wires
            .iter()
            .rposition(|w| w.is_near(x as f64, y as f64, DEFAULT_HIT_THRESHOLD))
    }

    /// Topmost component with a pin under the cell, with the pin's label.
    ///
    /// Pin cells answer independently of body membership, so a pin that
    /// falls outside the strict body is still addressable here.
    pub fn pin_at(&self, x: i32, y: i32) -> Option<(&PlacedComponent, &str)> {
        self.components
            .iter()
            .rev()
            .find_map(|c| c.pin_at(x, y).map(|label| (c, label)))
    }

    /// Whether a component body occupies the cell. Used by wire drawing to
    /// forbid routing through bodies on the currently edited face; the
    /// rear-face exemption is the caller's concern.
    pub fn is_location_blocked(&self, x: i32, y: i32) -> bool {
        self.component_at(x, y).is_some()
    }

    /// Apply an edit to the component with the given uid, re-running the
    /// bounds gate. An edit that would push the footprint off the board is
    /// rolled back and reported as false.
    pub fn edit_component(&mut self, uid: &str, edit: &ComponentEdit) -> bool {
        let width = self.width;
        let height = self.height;
        let Some(component) = self.components.iter_mut().find(|c| c.uid == uid) else {
            return false;
        };
        let previous = component.clone();
        component.apply_edit(edit);
        let in_bounds = component.x >= 0
            && component.y >= 0
            && component.x + component.width() <= width
            && component.y + component.height() <= height;
        if !in_bounds {
            tracing::debug!(uid = %uid, "rolled back out-of-bounds edit");
            *component = previous;
            return false;
        }
        true
    }

    /// Apply a metadata edit to the wire at a stacking index.
    pub fn edit_wire(&mut self, index: usize, edit: &WireEdit) -> bool {
        match self.wires.get_mut(index) {
            Some(wire) => {
                wire.apply_edit(edit);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rotation;
    use crate::model::definition::{ComponentDefinition, ComponentKind};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn square(name: &str) -> Arc<ComponentDefinition> {
        Arc::new(ComponentDefinition::new(
            name,
            2,
            2,
            HashMap::new(),
            ComponentKind::Ic,
            "#333",
        ))
    }

    fn board_with(placements: Vec<PlacedComponent>) -> Board {
        let mut board = Board::new(10, 10);
        for placed in placements {
            assert!(board.add_component(placed));
        }
        board
    }

    #[test]
    fn test_gate_rejects_negative_anchor() {
        let mut board = Board::new(10, 10);
        let placed = PlacedComponent::new(square("A"), -1, 0, "a", Rotation::R0);
        assert!(!board.add_component(placed));
        assert!(board.components().is_empty());
    }

    #[test]
    fn test_gate_is_boundary_inclusive() {
        let mut board = Board::new(10, 10);
        // x + width == board width exactly.
        let flush = PlacedComponent::new(square("A"), 8, 8, "a", Rotation::R0);
        assert!(board.add_component(flush));
        // One past the edge.
        let over = PlacedComponent::new(square("B"), 9, 8, "b", Rotation::R0);
        assert!(!board.add_component(over));
        assert_eq!(board.components().len(), 1);
    }

    #[test]
    fn test_overlap_resolves_to_most_recent() {
        let board = board_with(vec![
            PlacedComponent::new(square("First"), 2, 2, "first", Rotation::R0),
            PlacedComponent::new(square("Second"), 3, 3, "second", Rotation::R0),
        ]);
        // (3,3) is covered by both; the later addition wins.
        assert_eq!(board.component_at(3, 3).unwrap().uid, "second");
        // (2,2) is only covered by the first.
        assert_eq!(board.component_at(2, 2).unwrap().uid, "first");
        assert!(board.component_at(9, 9).is_none());
    }

    #[test]
    fn test_remove_component_is_idempotent() {
        let mut board = board_with(vec![PlacedComponent::new(
            square("A"),
            0,
            0,
            "a",
            Rotation::R0,
        )]);
        board.remove_component("missing");
        assert_eq!(board.components().len(), 1);
        board.remove_component("a");
        board.remove_component("a");
        assert!(board.components().is_empty());
    }

    #[test]
    fn test_wire_queries_scan_in_reverse() {
        let mut board = Board::new(10, 10);
        board.add_wire(Wire::new(vec![(0, 0), (5, 0)]).with_name("under"));
        board.add_wire(Wire::new(vec![(0, 0), (0, 5)]).with_name("over"));
        assert_eq!(board.wire_at(0, 0).unwrap().name, "over");
        assert_eq!(board.wire_at(3, 0).unwrap().name, "under");
        assert!(board.wire_at(9, 9).is_none());
    }

    #[test]
    fn test_remove_wire_by_equality() {
        let mut board = Board::new(10, 10);
        let wire = Wire::new(vec![(0, 0), (3, 0)]).with_name("N0");
        board.add_wire(wire.clone());
        assert!(board.remove_wire(&wire));
        assert!(!board.remove_wire(&wire));
        assert!(board.wires().is_empty());
    }

    #[test]
    fn test_edit_component_rolls_back_out_of_bounds() {
        let mut board = board_with(vec![PlacedComponent::new(
            square("A"),
            8,
            8,
            "a",
            Rotation::R0,
        )]);
        // Growing to 3 wide would overhang the right edge.
        let rejected = board.edit_component(
            "a",
            &ComponentEdit {
                width: Some(3),
                ..ComponentEdit::default()
            },
        );
        assert!(!rejected);
        assert_eq!(board.component("a").unwrap().custom_width, 2);

        let accepted = board.edit_component(
            "a",
            &ComponentEdit {
                value: Some("U1".to_string()),
                ..ComponentEdit::default()
            },
        );
        assert!(accepted);
        assert_eq!(board.component("a").unwrap().value, "U1");
    }
}
