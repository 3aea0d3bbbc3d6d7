use bevy::prelude::*;

use super::{MapTile, Point2, Rules, TerrainObject};

/// Grid storage as seen by mutations.
///
/// Implementations own cell lookup and terrain object bookkeeping; a cell that
/// does not exist (out of bounds) is reported as `None`.
pub trait MapGrid {
    fn tile(&self, coords: Point2) -> Option<&MapTile>;

    fn tile_mut(&mut self, coords: Point2) -> Option<&mut MapTile>;

    fn rules(&self) -> &Rules;

    /// Place a terrain object on the cell at its position.
    /// Returns false if the cell does not exist.
    fn add_terrain_object(&mut self, object: TerrainObject) -> bool;

    /// Remove and return the terrain object at `coords`, if any
    fn remove_terrain_object(&mut self, coords: Point2) -> Option<TerrainObject>;
}

/// Rectangular tile map resource.
///
/// Cells are stored row-major; valid coordinates are `0..width` by `0..height`.
#[derive(Resource, Debug, Clone, Default)]
pub struct TileMap {
    width: i32,
    height: i32,
    tiles: Vec<MapTile>,
    pub rules: Rules,
}

impl TileMap {
    pub fn new(width: u32, height: u32, rules: Rules) -> Self {
        let width = width.min(i32::MAX as u32) as i32;
        let height = height.min(i32::MAX as u32) as i32;
        Self {
            width,
            height,
            tiles: vec![MapTile::default(); width as usize * height as usize],
            rules,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, coords: Point2) -> bool {
        coords.x >= 0 && coords.y >= 0 && coords.x < self.width && coords.y < self.height
    }

    fn index_of(&self, coords: Point2) -> Option<usize> {
        self.in_bounds(coords)
            .then(|| coords.y as usize * self.width as usize + coords.x as usize)
    }

    /// Iterate over all cells with their coordinates
    pub fn cells(&self) -> impl Iterator<Item = (Point2, &MapTile)> {
        let width = self.width.max(1);
        self.tiles.iter().enumerate().map(move |(i, tile)| {
            let i = i as i32;
            (Point2::new(i % width, i / width), tile)
        })
    }

    pub fn terrain_object_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|tile| tile.terrain_object.is_some())
            .count()
    }
}

impl MapGrid for TileMap {
    fn tile(&self, coords: Point2) -> Option<&MapTile> {
        self.index_of(coords).and_then(|i| self.tiles.get(i))
    }

    fn tile_mut(&mut self, coords: Point2) -> Option<&mut MapTile> {
        self.index_of(coords).and_then(|i| self.tiles.get_mut(i))
    }

    fn rules(&self) -> &Rules {
        &self.rules
    }

    fn add_terrain_object(&mut self, object: TerrainObject) -> bool {
        match self.tile_mut(object.position) {
            Some(tile) => {
                tile.terrain_object = Some(object);
                true
            }
            None => false,
        }
    }

    fn remove_terrain_object(&mut self, coords: Point2) -> Option<TerrainObject> {
        self.tile_mut(coords)
            .and_then(|tile| tile.terrain_object.take())
    }
}
