//! Tile map editing core: copying map areas into a compact binary clipboard
//! format and pasting them back as undoable mutations.

pub mod config;
pub mod constants;
pub mod editor;
pub mod logging;
pub mod map;
pub mod paths;

pub use config::{ConfigPlugin, EditorConfig};
pub use editor::EditorPlugin;
pub use map::MapPlugin;

use bevy::prelude::*;

/// Registers the map, config and editor plugins
pub struct TileforgedPlugin;

impl Plugin for TileforgedPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((ConfigPlugin, MapPlugin, EditorPlugin));
    }
}
