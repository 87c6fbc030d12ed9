//! Component footprint templates.
//!
//! A [`ComponentDefinition`] is an immutable description of a component on
//! the grid: its bounding extents, the cells its body actually occupies
//! (possibly a strict subset, e.g. the two pin columns of a DIP package),
//! and a pin label per electrically significant cell. Definitions are shared
//! by reference across placed instances and across the library, so they are
//! never mutated after construction.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Open tag set used by renderers to pick a symbol. The geometry core never
/// branches on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentKind {
    Ic,
    Resistor,
    Capacitor,
    Diode,
    Other(String),
}

impl ComponentKind {
    /// The persisted tag for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            ComponentKind::Ic => "IC",
            ComponentKind::Resistor => "R",
            ComponentKind::Capacitor => "C",
            ComponentKind::Diode => "D",
            ComponentKind::Other(tag) => tag,
        }
    }
}

impl From<String> for ComponentKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "IC" => ComponentKind::Ic,
            "R" => ComponentKind::Resistor,
            "C" => ComponentKind::Capacitor,
            "D" => ComponentKind::Diode,
            _ => ComponentKind::Other(tag),
        }
    }
}

impl From<ComponentKind> for String {
    fn from(kind: ComponentKind) -> String {
        kind.as_str().to_string()
    }
}

/// Malformed persisted definition data. Library files are loaded once at
/// startup, so this is a fatal configuration fault, not a runtime condition.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionFormatError {
    #[error("invalid pin coordinate key {0:?} (expected \"x,y\")")]
    InvalidPinKey(String),
}

/// Immutable footprint template: extents, occupied body cells, pin labels.
///
/// No validation is performed beyond the persisted-form parsing: a producer
/// may construct a definition whose pins fall outside `body_cells` (pins are
/// queryable independently of body occupancy) or even outside the bounding
/// box. Lookups on such cells simply never match a placement query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DefinitionRecord", into = "DefinitionRecord")]
pub struct ComponentDefinition {
    pub name: String,
    pub width: i32,
    pub height: i32,
    pub pin_labels: HashMap<(i32, i32), String>,
    pub kind: ComponentKind,
    pub default_color: String,
    pub body_cells: HashSet<(i32, i32)>,
}

impl ComponentDefinition {
    /// New definition with a full rectangular body.
    pub fn new(
        name: impl Into<String>,
        width: i32,
        height: i32,
        pin_labels: HashMap<(i32, i32), String>,
        kind: ComponentKind,
        default_color: impl Into<String>,
    ) -> Self {
        let body_cells = (0..width)
            .flat_map(|x| (0..height).map(move |y| (x, y)))
            .collect();
        Self {
            name: name.into(),
            width,
            height,
            pin_labels,
            kind,
            default_color: default_color.into(),
            body_cells,
        }
    }

    /// Replace the body with an explicit cell set (e.g. a hollow package).
    pub fn with_body_cells(mut self, body_cells: HashSet<(i32, i32)>) -> Self {
        self.body_cells = body_cells;
        self
    }

    /// Pin label at a local cell, if any.
    pub fn pin_label(&self, x: i32, y: i32) -> Option<&str> {
        self.pin_labels.get(&(x, y)).map(String::as_str)
    }

    /// Whether a local cell is part of the body.
    pub fn is_body_cell(&self, x: i32, y: i32) -> bool {
        self.body_cells.contains(&(x, y))
    }
}

/// Persisted form of a definition. Pin keys encode as `"x,y"` strings and
/// body cells as `[x, y]` pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct DefinitionRecord {
    name: String,
    width: i32,
    height: i32,
    pin_labels: BTreeMap<String, String>,
    comp_type: String,
    default_color: String,
    body_cells: Vec<(i32, i32)>,
}

impl TryFrom<DefinitionRecord> for ComponentDefinition {
    type Error = DefinitionFormatError;

    fn try_from(record: DefinitionRecord) -> Result<Self, Self::Error> {
        let mut pin_labels = HashMap::with_capacity(record.pin_labels.len());
        for (key, label) in record.pin_labels {
            let (x, y) = parse_cell_key(&key)
                .ok_or_else(|| DefinitionFormatError::InvalidPinKey(key.clone()))?;
            pin_labels.insert((x, y), label);
        }
        Ok(ComponentDefinition {
            name: record.name,
            width: record.width,
            height: record.height,
            pin_labels,
            kind: ComponentKind::from(record.comp_type),
            default_color: record.default_color,
            body_cells: record.body_cells.into_iter().collect(),
        })
    }
}

impl From<ComponentDefinition> for DefinitionRecord {
    fn from(definition: ComponentDefinition) -> Self {
        let pin_labels = definition
            .pin_labels
            .into_iter()
            .map(|((x, y), label)| (format!("{},{}", x, y), label))
            .collect();
        let mut body_cells: Vec<(i32, i32)> = definition.body_cells.into_iter().collect();
        body_cells.sort_unstable();
        DefinitionRecord {
            name: definition.name,
            width: definition.width,
            height: definition.height,
            pin_labels,
            comp_type: definition.kind.into(),
            default_color: definition.default_color,
            body_cells,
        }
    }
}

fn parse_cell_key(key: &str) -> Option<(i32, i32)> {
    let (x, y) = key.split_once(',')?;
    Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
}
