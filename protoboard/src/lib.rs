//! Protoboard - grid-based circuit board layout core
//!
//! This library is the board model behind a breadboard/perfboard-style
//! editor: component footprints on a discrete grid, placed instances with
//! quarter-turn rotation and per-instance overrides, wires as polylines
//! over grid points, and a board aggregate owning placement validation and
//! spatial queries. Rendering, dialogs, and input handling live in external
//! collaborators that drive this model.
//!
//! # Quick Start
//!
//! ```
//! use protoboard::prelude::*;
//!
//! let library = ComponentLibrary::with_defaults();
//! let mut board = Board::new(30, 20);
//!
//! let dip8 = library.get("DIP8").unwrap();
//! let placed = PlacedComponent::new(dip8, 5, 5, "u1", Rotation::R90);
//! assert!(board.add_component(placed));
//!
//! // Pin 1 of the rotated DIP-8 lands on the top-right corner cell.
//! let (component, pin) = board.pin_at(8, 5).unwrap();
//! assert_eq!(component.uid, "u1");
//! assert_eq!(pin, "1");
//! ```
//!
//! # Features
//!
//! - **Placement model**: bounds-gated placement, rotation-aware pin and
//!   body queries, topmost-wins overlap resolution
//! - **Wires**: segment proximity hit-testing over front/back faces
//! - **Library**: shared immutable definitions with JSON persistence
//! - **Session**: the interactive state machine (tools, selection, wire
//!   drawing) used by GUI shells

pub mod geometry;
pub mod library;
pub mod model;
pub mod session;

// Re-export main types
pub use geometry::{InvalidRotation, Rotation};
pub use library::{ComponentLibrary, LibraryError};
pub use model::{
    Board, ComponentDefinition, ComponentEdit, ComponentKind, DefinitionFormatError,
    PlacedComponent, Wire, WireEdit, WireSide, DEFAULT_HIT_THRESHOLD,
};
pub use session::{ClickOutcome, EditorSession, Selection, ToolMode};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Board, ClickOutcome, ComponentDefinition, ComponentEdit, ComponentKind, ComponentLibrary,
        EditorSession, LibraryError, PlacedComponent, Rotation, Selection, ToolMode, Wire,
        WireEdit, WireSide,
    };
}
