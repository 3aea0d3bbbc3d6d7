//! Building a copied selection from a rectangular map area.

use bevy::prelude::*;

use crate::map::{MapGrid, Point2};

use super::types::{CopiedEntry, CopiedEntryKind, CopiedEntryKinds, CopiedSelection};

/// Inclusive rectangle of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellArea {
    pub min: Point2,
    pub max: Point2,
}

impl CellArea {
    /// Area spanned by two opposite corners, in any order
    pub fn from_corners(a: Point2, b: Point2) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn width(&self) -> i64 {
        i64::from(self.max.x) - i64::from(self.min.x) + 1
    }

    pub fn height(&self) -> i64 {
        i64::from(self.max.y) - i64::from(self.min.y) + 1
    }

    /// Cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Point2> {
        let (min, max) = (self.min, self.max);
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| Point2::new(x, y)))
    }
}

/// Copy the enabled element kinds of every existing cell in `area`.
///
/// Offsets are relative to the area's top-left cell, so pasting at that cell
/// reproduces the copied layout in place. Cells outside the map are skipped.
pub fn copy_area(map: &dyn MapGrid, area: CellArea, kinds: &CopiedEntryKinds) -> CopiedSelection {
    let mut selection = CopiedSelection::default();

    for cell_coords in area.cells() {
        let Some(cell) = map.tile(cell_coords) else {
            continue;
        };
        let offset = cell_coords - area.min;

        if kinds.contains(CopiedEntryKind::Terrain) {
            selection.push(CopiedEntry::Terrain {
                offset,
                tile_index: cell.tile_index,
                sub_tile_index: cell.sub_tile_index,
            });
        }

        if kinds.contains(CopiedEntryKind::Overlay)
            && let Some(overlay) = &cell.overlay
        {
            match map.rules().overlay_type(overlay.overlay_type) {
                Some(overlay_type) => selection.push(CopiedEntry::Overlay {
                    offset,
                    overlay_type_name: overlay_type.ini_name.clone(),
                    frame_index: overlay.frame_index,
                }),
                None => debug!(
                    "Skipping overlay at {} with unknown type index {}",
                    cell_coords, overlay.overlay_type
                ),
            }
        }

        if kinds.contains(CopiedEntryKind::TerrainObject)
            && let Some(object) = &cell.terrain_object
        {
            match map.rules().terrain_type(object.terrain_type) {
                Some(terrain_type) => selection.push(CopiedEntry::TerrainObject {
                    offset,
                    terrain_type_name: terrain_type.ini_name.clone(),
                }),
                None => debug!(
                    "Skipping terrain object at {} with unknown type index {}",
                    cell_coords, object.terrain_type
                ),
            }
        }
    }

    debug!(
        "Copied {} entries from {}x{} area at {}",
        selection.len(),
        area.width(),
        area.height(),
        area.min
    );

    selection
}
