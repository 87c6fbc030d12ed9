//! The component library: named definitions with JSON persistence.
//!
//! Definitions are handed out as `Arc` clones, so a board can keep using a
//! definition after it is deleted from the library; the library only drops
//! its own handle. The persisted form is a flat array of definition records
//! (see [`crate::model::definition`]) and round-trips exactly.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::model::definition::{ComponentDefinition, ComponentKind};

#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Name-keyed definition store with sorted iteration.
#[derive(Debug, Clone, Default)]
pub struct ComponentLibrary {
    definitions: BTreeMap<String, Arc<ComponentDefinition>>,
}

impl ComponentLibrary {
    /// Empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Library seeded with the starter definitions: a hollow-bodied DIP-8,
    /// a 3x1 resistor, a 2x1 polarized capacitor, and a 1x1 LED.
    pub fn with_defaults() -> Self {
        let mut library = Self::new();
        library.insert(dip8());
        library.insert(ComponentDefinition::new(
            "Resistor",
            3,
            1,
            [((0, 0), "1".to_string()), ((2, 0), "2".to_string())].into(),
            ComponentKind::Resistor,
            "#D4AC0D",
        ));
        library.insert(ComponentDefinition::new(
            "Cap",
            2,
            1,
            [((0, 0), "+".to_string()), ((1, 0), "-".to_string())].into(),
            ComponentKind::Capacitor,
            "#2980B9",
        ));
        library.insert(ComponentDefinition::new(
            "LED",
            1,
            1,
            [((0, 0), "A".to_string())].into(),
            ComponentKind::Diode,
            "#C0392B",
        ));
        library
    }

    /// Insert a definition under its own name, replacing any previous entry,
    /// and return the shared handle.
    pub fn insert(&mut self, definition: ComponentDefinition) -> Arc<ComponentDefinition> {
        let handle = Arc::new(definition);
        self.definitions
            .insert(handle.name.clone(), Arc::clone(&handle));
        handle
    }

    /// Shared handle to a definition by name.
    pub fn get(&self, name: &str) -> Option<Arc<ComponentDefinition>> {
        self.definitions.get(name).cloned()
    }

    /// Drop the library's handle to a definition. Placements holding the
    /// definition are unaffected.
    pub fn remove(&mut self, name: &str) -> bool {
        self.definitions.remove(name).is_some()
    }

    /// Definition names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    /// Definitions in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ComponentDefinition>> {
        self.definitions.values()
    }

    /// First definition in name order, if any.
    pub fn first(&self) -> Option<Arc<ComponentDefinition>> {
        self.definitions.values().next().cloned()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Load a library from a JSON file (a flat array of definitions).
    pub fn load(path: &Path) -> Result<Self, LibraryError> {
        let mut library = Self::new();
        library.merge_from_file(path)?;
        Ok(library)
    }

    /// Merge definitions from a JSON file over the current contents,
    /// returning how many were read. Later entries win on name clashes,
    /// matching how user libraries override the starter set.
    pub fn merge_from_file(&mut self, path: &Path) -> Result<usize, LibraryError> {
        let data = fs::read_to_string(path)?;
        let definitions: Vec<ComponentDefinition> = serde_json::from_str(&data)?;
        let count = definitions.len();
        for definition in definitions {
            self.insert(definition);
        }
        tracing::info!(path = %path.display(), count, "loaded component library");
        Ok(count)
    }

    /// Save the library as a pretty-printed JSON array.
    pub fn save(&self, path: &Path) -> Result<(), LibraryError> {
        let definitions: Vec<&ComponentDefinition> =
            self.definitions.values().map(Arc::as_ref).collect();
        let data = serde_json::to_string_pretty(&definitions)?;
        fs::write(path, data)?;
        tracing::info!(path = %path.display(), count = definitions.len(), "saved component library");
        Ok(())
    }
}

/// DIP-8: two 4-pin columns with a hollow center. Pins count down the left
/// column (1-4) and back up the right (5-8), DIP convention.
fn dip8() -> ComponentDefinition {
    let mut pin_labels = std::collections::HashMap::new();
    for y in 0..4 {
        pin_labels.insert((0, y), (y + 1).to_string());
        pin_labels.insert((2, 3 - y), (y + 5).to_string());
    }
    let body_cells = (0..4).flat_map(|y| [(0, y), (2, y)]).collect();
    ComponentDefinition::new("DIP8", 3, 4, pin_labels, ComponentKind::Ic, "#333")
        .with_body_cells(body_cells)
}
