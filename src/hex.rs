//! Axial hex coordinates and planar geometry.
//!
//! The board addresses tiles with axial coordinates (q, r). This module
//! converts them to planar positions using the flat-top orientation that the
//! rest of the crate assumes: `x = size * 3/2 * q`, `y = size * sqrt(3) *
//! (r + q/2)`, with the six corners at angles 0°, 60°, ... 300° around the
//! center.

use serde::{Deserialize, Serialize};

/// Axial coordinate for hex grid.
///
/// In axial coordinates:
/// - `q` increases going east (right)
/// - `r` increases going southeast
/// - The third coordinate `s` (not stored) satisfies: q + r + s = 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct HexCoord {
    /// Column (increases going east)
    pub q: i32,
    /// Row (increases going southeast)
    pub r: i32,
}

/// Cosine/sine of the six flat-top corner angles, counterclockwise from east.
const CORNER_OFFSETS: [(f64, f64); 6] = [
    (1.0, 0.0),
    (0.5, 0.866_025_403_784_438_6),
    (-0.5, 0.866_025_403_784_438_6),
    (-1.0, 0.0),
    (-0.5, -0.866_025_403_784_438_6),
    (0.5, -0.866_025_403_784_438_6),
];

impl HexCoord {
    /// Create a new hex coordinate
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The implicit third coordinate (s = -q - r)
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// The six neighboring hexes, counterclockwise from East
    pub fn neighbors(&self) -> [HexCoord; 6] {
        [
            HexCoord::new(self.q + 1, self.r),
            HexCoord::new(self.q + 1, self.r - 1),
            HexCoord::new(self.q, self.r - 1),
            HexCoord::new(self.q - 1, self.r),
            HexCoord::new(self.q - 1, self.r + 1),
            HexCoord::new(self.q, self.r + 1),
        ]
    }

    /// Convert to planar coordinates (center of the hex), flat-top
    /// orientation with the given hex size (circumradius).
    pub fn to_pixel(&self, hex_size: f64) -> (f64, f64) {
        let x = hex_size * 1.5 * self.q as f64;
        let y = hex_size * 3.0_f64.sqrt() * (self.r as f64 + self.q as f64 / 2.0);
        (x, y)
    }

    /// The six corner positions of this hex, counterclockwise from the
    /// eastern corner. Adjacent hexes produce bit-for-bit *nearly* equal
    /// positions for shared corners; callers that need corner identity must
    /// round (see `graph`).
    pub fn corners(&self, hex_size: f64) -> [(f64, f64); 6] {
        let (cx, cy) = self.to_pixel(hex_size);
        CORNER_OFFSETS.map(|(dx, dy)| (cx + dx * hex_size, cy + dy * hex_size))
    }
}
