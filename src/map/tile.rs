use bevy::prelude::*;

use super::Point2;

/// An overlay instance placed on a cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    /// Index into [`super::Rules::overlay_types`]
    pub overlay_type: usize,
    pub frame_index: i32,
    pub position: Point2,
}

/// A terrain object (tree, rock...) occupying a cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainObject {
    /// Index into [`super::Rules::terrain_types`]
    pub terrain_type: usize,
    pub position: Point2,
}

impl TerrainObject {
    pub fn new(terrain_type: usize, position: Point2) -> Self {
        Self {
            terrain_type,
            position,
        }
    }
}

/// A single map cell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapTile {
    pub tile_index: i32,
    pub sub_tile_index: u8,
    pub overlay: Option<Overlay>,
    pub terrain_object: Option<TerrainObject>,
    /// Cached visual for the tile graphic; cleared whenever terrain changes
    pub tile_image: Option<Handle<Image>>,
}

impl MapTile {
    /// Overwrite the terrain graphic and drop the cached visual
    pub fn set_terrain(&mut self, tile_index: i32, sub_tile_index: u8) {
        self.tile_image = None;
        self.tile_index = tile_index;
        self.sub_tile_index = sub_tile_index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_tile_default_is_empty() {
        let tile = MapTile::default();
        assert_eq!(tile.tile_index, 0);
        assert!(tile.overlay.is_none());
        assert!(tile.terrain_object.is_none());
        assert!(tile.tile_image.is_none());
    }

    #[test]
    fn test_set_terrain_invalidates_image() {
        let mut tile = MapTile {
            tile_image: Some(Handle::default()),
            ..default()
        };
        tile.set_terrain(42, 3);
        assert_eq!(tile.tile_index, 42);
        assert_eq!(tile.sub_tile_index, 3);
        assert!(tile.tile_image.is_none());
    }
}
