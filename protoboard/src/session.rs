//! Interactive editing session state.
//!
//! The session confines all per-session mutable state (tool mode, viewed
//! face, placement rotation, wire in progress, selection) to one object
//! owned by the UI layer; the model types in [`crate::model`] never see it.
//! Input handling stays external: the UI translates device events into the
//! calls below and renders from the returned [`ClickOutcome`] and the board
//! state, so every editing decision is testable without a canvas.

use std::sync::Arc;

use crate::geometry::Rotation;
use crate::library::ComponentLibrary;
use crate::model::board::Board;
use crate::model::definition::ComponentDefinition;
use crate::model::placement::{ComponentEdit, PlacedComponent};
use crate::model::wire::{Wire, WireEdit, WireSide};

/// Active editing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    #[default]
    Select,
    Place,
    Wire,
    Delete,
}

/// What the user currently has selected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Component(String),
    Wire(usize),
}

/// Result of a click, for the UI to react to (status line, warning, redraw).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A component was committed to the board.
    Placed { uid: String },
    /// The ghost fell outside the board; nothing changed.
    PlacementRejected,
    /// A point was appended to the wire in progress.
    WirePointAdded { point: (i32, i32) },
    /// The point sits on a component body on the front face; not added.
    WireBlocked { point: (i32, i32) },
    /// A repeated point finished the wire; it is now on the board.
    WireCommitted { name: String },
    SelectedComponent { uid: String },
    SelectedWire { index: usize },
    SelectionCleared,
    DeletedComponent { uid: String },
    DeletedWire { name: String },
    /// The click had no effect.
    Nothing,
}

/// One editing session over a board and a library.
#[derive(Debug)]
pub struct EditorSession {
    board: Board,
    library: ComponentLibrary,
    mode: ToolMode,
    back_view: bool,
    place_rotation: Rotation,
    pending_wire: Vec<(i32, i32)>,
    selection: Selection,
    active_definition: Option<Arc<ComponentDefinition>>,
}

impl EditorSession {
    /// New session in Select mode, with the first library definition (in
    /// name order) pre-armed for placement.
    pub fn new(board: Board, library: ComponentLibrary) -> Self {
        let active_definition = library.first();
        Self {
            board,
            library,
            mode: ToolMode::default(),
            back_view: false,
            place_rotation: Rotation::default(),
            pending_wire: Vec::new(),
            selection: Selection::default(),
            active_definition,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn library(&self) -> &ComponentLibrary {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut ComponentLibrary {
        &mut self.library
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    /// Switch tools. Any wire in progress is discarded.
    pub fn set_mode(&mut self, mode: ToolMode) {
        tracing::debug!(?mode, "tool change");
        self.mode = mode;
        self.pending_wire.clear();
    }

    pub fn back_view(&self) -> bool {
        self.back_view
    }

    /// Flip between the front and back face.
    pub fn toggle_view(&mut self) {
        self.back_view = !self.back_view;
    }

    pub fn place_rotation(&self) -> Rotation {
        self.place_rotation
    }

    /// Rotate the placement ghost a quarter turn clockwise (the `R` key).
    pub fn rotate_placement(&mut self) {
        self.place_rotation = self.place_rotation.clockwise();
    }

    pub fn active_definition(&self) -> Option<&Arc<ComponentDefinition>> {
        self.active_definition.as_ref()
    }

    /// Arm a library definition for placement and switch to Place mode.
    pub fn select_definition(&mut self, name: &str) -> bool {
        match self.library.get(name) {
            Some(definition) => {
                self.active_definition = Some(definition);
                self.set_mode(ToolMode::Place);
                true
            }
            None => false,
        }
    }

    pub fn pending_wire(&self) -> &[(i32, i32)] {
        &self.pending_wire
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Handle a click on a grid cell with the current tool.
    pub fn click(&mut self, x: i32, y: i32) -> ClickOutcome {
        match self.mode {
            ToolMode::Wire => self.click_wire(x, y),
            ToolMode::Place => self.click_place(x, y),
            ToolMode::Delete => self.click_delete(x, y),
            ToolMode::Select => self.click_select(x, y),
        }
    }

    /// Escape: finish a viable wire in progress, otherwise drop back to
    /// Select mode. Returns the committed wire's name, if one was made.
    pub fn escape(&mut self) -> Option<String> {
        if self.mode == ToolMode::Wire && self.pending_wire.len() >= 2 {
            self.finish_wire()
        } else {
            self.set_mode(ToolMode::Select);
            None
        }
    }

    /// Commit the wire in progress, naming it `N<count>` and coloring it by
    /// face. A trailing repeated point (the commit gesture) is dropped
    /// first; fewer than two remaining points discard the wire instead.
    pub fn finish_wire(&mut self) -> Option<String> {
        if self.pending_wire.len() > 1
            && self.pending_wire[self.pending_wire.len() - 1]
                == self.pending_wire[self.pending_wire.len() - 2]
        {
            self.pending_wire.pop();
        }
        let points = std::mem::take(&mut self.pending_wire);
        if points.len() < 2 {
            return None;
        }
        let name = format!("N{}", self.board.wires().len());
        let (side, color) = if self.back_view {
            (WireSide::Back, "#2980B9")
        } else {
            (WireSide::Front, "#C0392B")
        };
        tracing::info!(%name, ?side, points = points.len(), "committed wire");
        self.board
            .add_wire(Wire::new(points).with_name(&name).with_color(color).with_side(side));
        Some(name)
    }

    /// Delete whatever is selected. Returns false when nothing was.
    pub fn delete_selected(&mut self) -> bool {
        match std::mem::take(&mut self.selection) {
            Selection::Component(uid) => {
                self.board.remove_component(&uid);
                true
            }
            Selection::Wire(index) => self.board.remove_wire_at(index).is_some(),
            Selection::None => false,
        }
    }

    /// Apply a dialog edit to the selected component. Fails when nothing is
    /// selected or the board rejects the edited bounds.
    pub fn edit_selected_component(&mut self, edit: &ComponentEdit) -> bool {
        match &self.selection {
            Selection::Component(uid) => {
                let uid = uid.clone();
                self.board.edit_component(&uid, edit)
            }
            _ => false,
        }
    }

    /// Apply a dialog edit to the selected wire.
    pub fn edit_selected_wire(&mut self, edit: &WireEdit) -> bool {
        match &self.selection {
            Selection::Wire(index) => self.board.edit_wire(*index, edit),
            _ => false,
        }
    }

    fn click_wire(&mut self, x: i32, y: i32) -> ClickOutcome {
        // Bodies block wire points on the front face unless the cell is a
        // pin; the back face routes freely underneath components.
        if !self.back_view {
            let on_pin = self.board.pin_at(x, y).is_some();
            if self.board.is_location_blocked(x, y) && !on_pin {
                return ClickOutcome::WireBlocked { point: (x, y) };
            }
        }
        self.pending_wire.push((x, y));
        let len = self.pending_wire.len();
        if len > 1 && self.pending_wire[len - 1] == self.pending_wire[len - 2] {
            match self.finish_wire() {
                Some(name) => ClickOutcome::WireCommitted { name },
                None => ClickOutcome::Nothing,
            }
        } else {
            ClickOutcome::WirePointAdded { point: (x, y) }
        }
    }

    fn click_place(&mut self, x: i32, y: i32) -> ClickOutcome {
        let Some(definition) = self.active_definition.clone() else {
            return ClickOutcome::Nothing;
        };
        let uid = uuid::Uuid::new_v4().to_string();
        let placed = PlacedComponent::new(definition, x, y, &uid, self.place_rotation);
        if self.board.add_component(placed) {
            ClickOutcome::Placed { uid }
        } else {
            ClickOutcome::PlacementRejected
        }
    }

    fn click_delete(&mut self, x: i32, y: i32) -> ClickOutcome {
        if let Some(component) = self.board.component_at(x, y) {
            let uid = component.uid.clone();
            self.board.remove_component(&uid);
            self.selection = Selection::None;
            return ClickOutcome::DeletedComponent { uid };
        }
        if let Some(index) = self.board.wire_index_at(x, y) {
            // Indices shift on removal, so any wire selection is stale.
            self.selection = Selection::None;
            if let Some(wire) = self.board.remove_wire_at(index) {
                return ClickOutcome::DeletedWire { name: wire.name };
            }
        }
        ClickOutcome::Nothing
    }

    fn click_select(&mut self, x: i32, y: i32) -> ClickOutcome {
        if let Some(component) = self.board.component_at(x, y) {
            let uid = component.uid.clone();
            self.selection = Selection::Component(uid.clone());
            return ClickOutcome::SelectedComponent { uid };
        }
        if let Some(index) = self.board.wire_index_at(x, y) {
            self.selection = Selection::Wire(index);
            return ClickOutcome::SelectedWire { index };
        }
        self.selection = Selection::None;
        ClickOutcome::SelectionCleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> EditorSession {
        EditorSession::new(Board::new(30, 20), ComponentLibrary::with_defaults())
    }

    #[test]
    fn test_new_session_arms_first_definition() {
        let session = session();
        assert_eq!(session.mode(), ToolMode::Select);
        // "Cap" sorts first in the starter library.
        assert_eq!(session.active_definition().unwrap().name, "Cap");
    }

    #[test]
    fn test_mode_change_discards_pending_wire() {
        let mut session = session();
        session.set_mode(ToolMode::Wire);
        session.click(1, 1);
        session.click(5, 1);
        assert_eq!(session.pending_wire().len(), 2);
        session.set_mode(ToolMode::Select);
        assert!(session.pending_wire().is_empty());
        assert!(session.board().wires().is_empty());
    }

    #[test]
    fn test_escape_commits_viable_wire() {
        let mut session = session();
        session.set_mode(ToolMode::Wire);
        session.click(1, 1);
        session.click(5, 1);
        let name = session.escape();
        assert_eq!(name.as_deref(), Some("N0"));
        assert_eq!(session.board().wires().len(), 1);
        assert_eq!(session.mode(), ToolMode::Wire);
    }

    #[test]
    fn test_escape_without_wire_returns_to_select() {
        let mut session = session();
        session.set_mode(ToolMode::Wire);
        session.click(1, 1);
        assert!(session.escape().is_none());
        assert_eq!(session.mode(), ToolMode::Select);
    }

    #[test]
    fn test_rotate_cycles() {
        let mut session = session();
        assert_eq!(session.place_rotation(), Rotation::R0);
        session.rotate_placement();
        assert_eq!(session.place_rotation(), Rotation::R90);
        for _ in 0..3 {
            session.rotate_placement();
        }
        assert_eq!(session.place_rotation(), Rotation::R0);
    }
}
