//! Pasting a copied selection onto the map.

use bevy::prelude::*;
use std::sync::Arc;

use crate::editor::clipboard::{CopiedEntry, CopiedEntryKind, CopiedSelection};
use crate::map::{MapGrid, Overlay, Point2, TerrainObject};

use super::contract::{Mutation, MutationError, MutationState, MutationTarget};
use super::refresh::RefreshPolicy;

/// Terrain of a cell before it was overwritten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginalCellTerrainData {
    pub cell_coords: Point2,
    pub tile_index: i32,
    pub sub_tile_index: u8,
}

/// Overlay type and frame that occupied a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlaySnapshot {
    pub overlay_type: usize,
    pub frame_index: i32,
}

/// Overlay of a cell before it was replaced; `previous: None` means the
/// cell had no overlay and undo clears it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginalOverlayInfo {
    pub cell_coords: Point2,
    pub previous: Option<OverlaySnapshot>,
}

/// Applies a [`CopiedSelection`] at an origin cell.
///
/// Entries are applied by kind: all terrain first, then overlays, then
/// terrain objects, each in selection order. Later kinds therefore see the
/// cell as already re-terrained. Entries whose target cell does not exist,
/// whose type name is unknown to the rules, or (for terrain objects) whose
/// cell is already occupied are skipped and leave no undo record.
#[derive(Debug, Clone)]
pub struct PasteTerrainMutation {
    selection: Arc<CopiedSelection>,
    origin: Point2,
    refresh_policy: RefreshPolicy,
    state: MutationState,
    terrain_undo_data: Vec<OriginalCellTerrainData>,
    overlay_undo_data: Vec<OriginalOverlayInfo>,
    terrain_object_cells: Vec<Point2>,
}

impl PasteTerrainMutation {
    pub fn new(selection: impl Into<Arc<CopiedSelection>>, origin: Point2) -> Self {
        Self {
            selection: selection.into(),
            origin,
            refresh_policy: RefreshPolicy::default(),
            state: MutationState::Constructed,
            terrain_undo_data: Vec::new(),
            overlay_undo_data: Vec::new(),
            terrain_object_cells: Vec::new(),
        }
    }

    pub fn with_refresh_policy(mut self, refresh_policy: RefreshPolicy) -> Self {
        self.refresh_policy = refresh_policy;
        self
    }

    pub fn origin(&self) -> Point2 {
        self.origin
    }

    pub fn selection(&self) -> &CopiedSelection {
        &self.selection
    }

    pub fn terrain_undo_data(&self) -> &[OriginalCellTerrainData] {
        &self.terrain_undo_data
    }

    pub fn overlay_undo_data(&self) -> &[OriginalOverlayInfo] {
        &self.overlay_undo_data
    }

    pub fn terrain_object_cells(&self) -> &[Point2] {
        &self.terrain_object_cells
    }

    fn paste_terrain(&self, map: &mut dyn MapGrid) -> Vec<OriginalCellTerrainData> {
        let mut undo_data = Vec::new();

        for entry in self.selection.entries_of(CopiedEntryKind::Terrain) {
            let CopiedEntry::Terrain {
                offset,
                tile_index,
                sub_tile_index,
            } = entry
            else {
                continue;
            };

            let cell_coords = self.origin + *offset;
            let Some(cell) = map.tile_mut(cell_coords) else {
                continue;
            };

            undo_data.push(OriginalCellTerrainData {
                cell_coords,
                tile_index: cell.tile_index,
                sub_tile_index: cell.sub_tile_index,
            });
            cell.set_terrain(*tile_index, *sub_tile_index);
        }

        undo_data
    }

    fn paste_overlays(&self, map: &mut dyn MapGrid) -> Vec<OriginalOverlayInfo> {
        let mut undo_data = Vec::new();

        for entry in self.selection.entries_of(CopiedEntryKind::Overlay) {
            let CopiedEntry::Overlay {
                offset,
                overlay_type_name,
                frame_index,
            } = entry
            else {
                continue;
            };

            let cell_coords = self.origin + *offset;
            if map.tile(cell_coords).is_none() {
                continue;
            }

            let Some(overlay_type) = map
                .rules()
                .find_overlay_type(overlay_type_name)
                .map(|ovt| ovt.index)
            else {
                debug!("Skipping pasted overlay with unknown type {:?}", overlay_type_name);
                continue;
            };

            let Some(cell) = map.tile_mut(cell_coords) else {
                continue;
            };

            undo_data.push(OriginalOverlayInfo {
                cell_coords,
                previous: cell.overlay.as_ref().map(|overlay| OverlaySnapshot {
                    overlay_type: overlay.overlay_type,
                    frame_index: overlay.frame_index,
                }),
            });

            cell.overlay = Some(Overlay {
                overlay_type,
                frame_index: *frame_index,
                position: cell_coords,
            });
        }

        undo_data
    }

    fn paste_terrain_objects(&self, map: &mut dyn MapGrid) -> Vec<Point2> {
        let mut placed_cells = Vec::new();

        for entry in self.selection.entries_of(CopiedEntryKind::TerrainObject) {
            let CopiedEntry::TerrainObject {
                offset,
                terrain_type_name,
            } = entry
            else {
                continue;
            };

            let cell_coords = self.origin + *offset;
            match map.tile(cell_coords) {
                Some(cell) if cell.terrain_object.is_none() => {}
                _ => continue,
            }

            let Some(terrain_type) = map
                .rules()
                .find_terrain_type(terrain_type_name)
                .map(|tt| tt.index)
            else {
                debug!("Skipping pasted terrain object with unknown type {:?}", terrain_type_name);
                continue;
            };

            if map.add_terrain_object(TerrainObject::new(terrain_type, cell_coords)) {
                placed_cells.push(cell_coords);
            }
        }

        placed_cells
    }
}

impl Mutation for PasteTerrainMutation {
    fn description(&self) -> String {
        format!("Paste {} copied entries at {}", self.selection.len(), self.origin)
    }

    fn state(&self) -> MutationState {
        self.state
    }

    fn perform(&mut self, target: &mut dyn MutationTarget) -> Result<(), MutationError> {
        if self.state != MutationState::Constructed {
            return Err(MutationError::NotPerformable(self.state));
        }

        let map = target.map_mut();
        self.terrain_undo_data = self.paste_terrain(map);
        self.overlay_undo_data = self.paste_overlays(map);
        self.terrain_object_cells = self.paste_terrain_objects(map);
        self.state = MutationState::Performed;

        let applied =
            self.terrain_undo_data.len() + self.overlay_undo_data.len() + self.terrain_object_cells.len();
        debug!(
            "Pasted {} of {} entries at {} ({} terrain, {} overlay, {} terrain objects)",
            applied,
            self.selection.len(),
            self.origin,
            self.terrain_undo_data.len(),
            self.overlay_undo_data.len(),
            self.terrain_object_cells.len()
        );

        self.refresh_policy
            .apply(self.selection.len(), self.origin, target);
        Ok(())
    }

    fn undo(&mut self, target: &mut dyn MutationTarget) -> Result<(), MutationError> {
        if self.state != MutationState::Performed {
            return Err(MutationError::NotUndoable(self.state));
        }

        let map = target.map_mut();

        // Reverse order so a cell written twice ends at its oldest recorded value
        for original in self.terrain_undo_data.iter().rev() {
            match map.tile_mut(original.cell_coords) {
                Some(cell) => cell.set_terrain(original.tile_index, original.sub_tile_index),
                None => warn!("Cannot restore terrain at {}: cell no longer exists", original.cell_coords),
            }
        }

        for info in self.overlay_undo_data.iter().rev() {
            let Some(cell) = map.tile_mut(info.cell_coords) else {
                warn!("Cannot restore overlay at {}: cell no longer exists", info.cell_coords);
                continue;
            };

            cell.overlay = info.previous.map(|previous| Overlay {
                overlay_type: previous.overlay_type,
                frame_index: previous.frame_index,
                position: info.cell_coords,
            });
        }

        for cell_coords in &self.terrain_object_cells {
            map.remove_terrain_object(*cell_coords);
        }

        self.state = MutationState::Undone;
        debug!("Undid paste of {} entries at {}", self.selection.len(), self.origin);

        self.refresh_policy
            .apply(self.selection.len(), self.origin, target);
        Ok(())
    }

    fn replay(&self) -> Box<dyn Mutation> {
        Box::new(
            PasteTerrainMutation::new(Arc::clone(&self.selection), self.origin)
                .with_refresh_policy(self.refresh_policy),
        )
    }
}
