//! Wires: ordered polylines over board grid points.

use serde::{Deserialize, Serialize};

use crate::geometry::dist_point_to_segment;

/// Default proximity threshold for wire hit-testing, in grid units.
pub const DEFAULT_HIT_THRESHOLD: f64 = 0.5;

/// Which face of the board a wire runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireSide {
    Front,
    #[default]
    Back,
}

impl WireSide {
    pub fn flipped(self) -> WireSide {
        match self {
            WireSide::Front => WireSide::Back,
            WireSide::Back => WireSide::Front,
        }
    }
}

/// A routed connection: an ordered sequence of grid points with metadata.
///
/// No point-count invariant is enforced; wires with fewer than two points
/// are representable but never hit-test positive and draw nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wire {
    pub points: Vec<(i32, i32)>,
    pub name: String,
    pub color: String,
    pub side: WireSide,
}

impl Wire {
    pub fn new(points: Vec<(i32, i32)>) -> Self {
        Self {
            points,
            name: "Wire".to_string(),
            color: "#FF0000".to_string(),
            side: WireSide::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_side(mut self, side: WireSide) -> Self {
        self.side = side;
        self
    }

    /// First point, if any.
    pub fn start(&self) -> Option<(i32, i32)> {
        self.points.first().copied()
    }

    /// Last point, if any.
    pub fn end(&self) -> Option<(i32, i32)> {
        self.points.last().copied()
    }

    /// Whether the query point lies within `threshold` grid units of any
    /// segment of the polyline. Always false for wires with fewer than two
    /// points.
    pub fn is_near(&self, x: f64, y: f64, threshold: f64) -> bool {
        if self.points.len() < 2 {
            return false;
        }
        self.points.windows(2).any(|pair| {
            let a = (pair[0].0 as f64, pair[0].1 as f64);
            let b = (pair[1].0 as f64, pair[1].1 as f64);
            dist_point_to_segment(x, y, a, b) < threshold
        })
    }
}

/// Atomic metadata edit applied to a wire from an editing dialog.
#[derive(Debug, Clone, Default)]
pub struct WireEdit {
    pub name: Option<String>,
    pub color: Option<String>,
    pub side: Option<WireSide>,
}

impl Wire {
    /// Apply an edit in place. All supplied fields land together.
    pub fn apply_edit(&mut self, edit: &WireEdit) {
        if let Some(name) = &edit.name {
            self.name = name.clone();
        }
        if let Some(color) = &edit.color {
            self.color = color.clone();
        }
        if let Some(side) = edit.side {
            self.side = side;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_wires_never_hit() {
        let empty = Wire::new(vec![]);
        assert!(!empty.is_near(0.0, 0.0, 100.0));
        assert!(empty.start().is_none());

        let single = Wire::new(vec![(3, 3)]);
        assert!(!single.is_near(3.0, 3.0, 100.0));
        assert_eq!(single.start(), single.end());
    }

    #[test]
    fn test_hit_threshold_is_strict() {
        let wire = Wire::new(vec![(0, 0), (10, 0)]);
        assert!(wire.is_near(5.0, 0.4, DEFAULT_HIT_THRESHOLD));
        // Exactly at the threshold counts as a miss.
        assert!(!wire.is_near(5.0, 0.5, DEFAULT_HIT_THRESHOLD));
        assert!(!wire.is_near(5.0, 0.6, DEFAULT_HIT_THRESHOLD));
    }

    #[test]
    fn test_hit_beyond_segment_end() {
        let wire = Wire::new(vec![(0, 0), (2, 0)]);
        assert!(!wire.is_near(4.0, 0.0, DEFAULT_HIT_THRESHOLD));
        assert!(wire.is_near(2.3, 0.0, DEFAULT_HIT_THRESHOLD));
    }

    #[test]
    fn test_multi_segment_hit() {
        let wire = Wire::new(vec![(0, 0), (5, 0), (5, 5)]);
        assert!(wire.is_near(5.0, 3.0, DEFAULT_HIT_THRESHOLD));
        assert!(!wire.is_near(0.0, 5.0, DEFAULT_HIT_THRESHOLD));
    }

    #[test]
    fn test_edit_is_selective() {
        let mut wire = Wire::new(vec![(0, 0), (1, 0)]).with_name("N0");
        wire.apply_edit(&WireEdit {
            color: Some("#00FF00".to_string()),
            ..WireEdit::default()
        });
        assert_eq!(wire.name, "N0");
        assert_eq!(wire.color, "#00FF00");
        assert_eq!(wire.side, WireSide::Back);
    }

    #[test]
    fn test_side_serializes_lowercase() {
        let json = serde_json::to_string(&WireSide::Front).unwrap();
        assert_eq!(json, "\"front\"");
        assert_eq!(WireSide::Front.flipped(), WireSide::Back);
    }
}
