//! The board geometry and placement model.
//!
//! Everything here is rendering-agnostic and synchronous: definitions are
//! immutable templates, placements rotate and answer board-space queries,
//! wires hit-test their segments, and the board aggregates both with
//! bounds-gated placement and reverse-stacking-order lookups.

pub mod board;
pub mod definition;
pub mod placement;
pub mod wire;

// Re-exports for convenience
pub use board::Board;
pub use definition::{ComponentDefinition, ComponentKind, DefinitionFormatError};
pub use placement::{ComponentEdit, PlacedComponent};
pub use wire::{Wire, WireEdit, WireSide, DEFAULT_HIT_THRESHOLD};
