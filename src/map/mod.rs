mod coords;
mod rules;
mod tile;
mod tile_map;

pub use coords::Point2;
pub use rules::{OverlayType, Rules, TerrainType};
pub use tile::{MapTile, Overlay, TerrainObject};
pub use tile_map::{MapGrid, TileMap};

use bevy::prelude::*;

pub struct MapPlugin;

impl Plugin for MapPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TileMap>();
    }
}
