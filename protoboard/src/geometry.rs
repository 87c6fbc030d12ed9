//! Grid geometry shared by the board model: quarter-turn rotations and
//! point-to-segment distance.
//!
//! Rotation here is always clockwise and always about a footprint's own
//! bounding box, so both directions of the mapping need the *unrotated*
//! extents. `to_local` goes from rotated (board-relative) coordinates back
//! to the footprint frame; `from_local` is its inverse. The two are not the
//! same formula set: the 90 and 270 degree cases swap roles between
//! directions.

use serde::{Deserialize, Serialize};

/// Angle that is not a clockwise multiple of 90 degrees in `[0, 360)`.
#[derive(Debug, thiserror::Error)]
#[error("invalid rotation angle {0} (expected 0, 90, 180 or 270)")]
pub struct InvalidRotation(pub u16);

/// Clockwise footprint rotation in multiples of 90 degrees.
///
/// Serializes as the angle in degrees so persisted placements stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// All rotations, in clockwise order.
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

    /// The angle in degrees.
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }

    /// Parse an angle in degrees.
    pub fn from_degrees(degrees: u16) -> Option<Rotation> {
        match degrees {
            0 => Some(Rotation::R0),
            90 => Some(Rotation::R90),
            180 => Some(Rotation::R180),
            270 => Some(Rotation::R270),
            _ => None,
        }
    }

    /// The next rotation a quarter turn clockwise (the `R` key in editors).
    pub fn clockwise(self) -> Rotation {
        match self {
            Rotation::R0 => Rotation::R90,
            Rotation::R90 => Rotation::R180,
            Rotation::R180 => Rotation::R270,
            Rotation::R270 => Rotation::R0,
        }
    }

    /// The rotation that undoes this one.
    pub fn inverse(self) -> Rotation {
        match self {
            Rotation::R0 => Rotation::R0,
            Rotation::R90 => Rotation::R270,
            Rotation::R180 => Rotation::R180,
            Rotation::R270 => Rotation::R90,
        }
    }

    /// Whether this rotation swaps a footprint's width and height.
    pub fn swaps_extents(self) -> bool {
        matches!(self, Rotation::R90 | Rotation::R270)
    }

    /// Map a cell of the *rotated* bounding box back into the footprint's
    /// unrotated local frame.
    ///
    /// `width` and `height` are the unrotated extents. For `R90`/`R270` the
    /// input ranges over the swapped box (`height` wide, `width` tall); the
    /// output always ranges over `[0, width) x [0, height)` when the input
    /// is in range. Out-of-range input maps to out-of-range output, which
    /// downstream lookups treat as "no match".
    pub fn to_local(self, x: i32, y: i32, width: i32, height: i32) -> (i32, i32) {
        match self {
            Rotation::R0 => (x, y),
            Rotation::R90 => (y, height - 1 - x),
            Rotation::R180 => (width - 1 - x, height - 1 - y),
            Rotation::R270 => (width - 1 - y, x),
        }
    }

    /// Map a footprint-frame cell to its position in the rotated bounding
    /// box. Inverse of [`Rotation::to_local`].
    pub fn from_local(self, x: i32, y: i32, width: i32, height: i32) -> (i32, i32) {
        match self {
            Rotation::R0 => (x, y),
            Rotation::R90 => (height - 1 - y, x),
            Rotation::R180 => (width - 1 - x, height - 1 - y),
            Rotation::R270 => (y, width - 1 - x),
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = InvalidRotation;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        Rotation::from_degrees(degrees).ok_or(InvalidRotation(degrees))
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> u16 {
        rotation.degrees()
    }
}

/// Euclidean distance from `(px, py)` to the segment `a`-`b`.
///
/// Projects the point onto the infinite line through the segment, clamps the
/// projection parameter to `[0, 1]`, and measures to the clamped point.
/// Zero-length segments degrade to point-to-point distance.
pub fn dist_point_to_segment(px: f64, py: f64, a: (f64, f64), b: (f64, f64)) -> f64 {
    let (x1, y1) = a;
    let (x2, y2) = b;
    let dx = x2 - x1;
    let dy = y2 - y1;
    if dx == 0.0 && dy == 0.0 {
        return (px - x1).hypot(py - y1);
    }
    let t = (((px - x1) * dx + (py - y1) * dy) / (dx * dx + dy * dy)).clamp(0.0, 1.0);
    (px - (x1 + t * dx)).hypot(py - (y1 + t * dy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rotation_round_trip_all_angles() {
        let (w, h) = (3, 4);
        for rotation in Rotation::ALL {
            for x in 0..w {
                for y in 0..h {
                    let (rx, ry) = rotation.from_local(x, y, w, h);
                    assert_eq!(
                        rotation.to_local(rx, ry, w, h),
                        (x, y),
                        "round trip failed for {:?} at ({}, {})",
                        rotation,
                        x,
                        y
                    );
                }
            }
        }
    }

    #[test]
    fn test_rotation_is_bijection_onto_rotated_box() {
        let (w, h) = (3, 4);
        for rotation in Rotation::ALL {
            let (rw, rh) = if rotation.swaps_extents() { (h, w) } else { (w, h) };
            let mut seen = HashSet::new();
            for x in 0..w {
                for y in 0..h {
                    let (rx, ry) = rotation.from_local(x, y, w, h);
                    assert!(rx >= 0 && rx < rw && ry >= 0 && ry < rh);
                    assert!(seen.insert((rx, ry)), "collision at ({}, {})", rx, ry);
                }
            }
            assert_eq!(seen.len(), (w * h) as usize);
        }
    }

    #[test]
    fn test_inverse_pairing() {
        // The board->local formula for an angle equals the local->board
        // formula of its inverse with swapped extents.
        let (w, h) = (5, 2);
        for rotation in Rotation::ALL {
            let (rw, rh) = if rotation.swaps_extents() { (h, w) } else { (w, h) };
            for x in 0..rw {
                for y in 0..rh {
                    assert_eq!(
                        rotation.to_local(x, y, w, h),
                        rotation.inverse().from_local(x, y, rw, rh),
                    );
                }
            }
        }
    }

    #[test]
    fn test_degrees_conversion() {
        assert_eq!(Rotation::from_degrees(90), Some(Rotation::R90));
        assert_eq!(Rotation::from_degrees(45), None);
        assert_eq!(Rotation::R270.degrees(), 270);
        assert_eq!(Rotation::R0.clockwise(), Rotation::R90);
        assert_eq!(Rotation::R270.clockwise(), Rotation::R0);
    }

    #[test]
    fn test_segment_distance() {
        // Point above the middle of a horizontal segment.
        let d = dist_point_to_segment(1.0, 1.0, (0.0, 0.0), (2.0, 0.0));
        assert!((d - 1.0).abs() < 1e-9);

        // Beyond the end: clamped to the endpoint.
        let d = dist_point_to_segment(4.0, 0.0, (0.0, 0.0), (2.0, 0.0));
        assert!((d - 2.0).abs() < 1e-9);

        // Degenerate segment.
        let d = dist_point_to_segment(3.0, 4.0, (0.0, 0.0), (0.0, 0.0));
        assert!((d - 5.0).abs() < 1e-9);
    }
}
