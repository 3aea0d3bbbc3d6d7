use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Integer cell coordinate or offset on the tile grid.
///
/// The same type is used for absolute cell positions and for offsets relative
/// to a paste origin; `origin + offset` yields the target cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: i32,
    pub y: i32,
}

impl Point2 {
    pub const ZERO: Point2 = Point2 { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Wire encoding: x then y, each a little-endian i32
    pub fn to_le_bytes(self) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        bytes[..4].copy_from_slice(&self.x.to_le_bytes());
        bytes[4..].copy_from_slice(&self.y.to_le_bytes());
        bytes
    }
}

impl Add for Point2 {
    type Output = Point2;

    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x.wrapping_add(rhs.x), self.y.wrapping_add(rhs.y))
    }
}

impl Sub for Point2 {
    type Output = Point2;

    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x.wrapping_sub(rhs.x), self.y.wrapping_sub(rhs.y))
    }
}

impl From<IVec2> for Point2 {
    fn from(v: IVec2) -> Self {
        Point2::new(v.x, v.y)
    }
}

impl From<Point2> for IVec2 {
    fn from(p: Point2) -> Self {
        IVec2::new(p.x, p.y)
    }
}

impl From<(i32, i32)> for Point2 {
    fn from((x, y): (i32, i32)) -> Self {
        Point2::new(x, y)
    }
}

impl std::fmt::Display for Point2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
