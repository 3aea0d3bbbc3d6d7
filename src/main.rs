use bevy::prelude::*;

use tileforged::{TileforgedPlugin, logging, paths};

fn main() {
    // Keep the guard alive for the duration of the program
    let _log_guard = logging::setup_logging();

    if let Err(e) = paths::ensure_directories() {
        error!("Failed to create config/data directories: {}", e);
    }

    App::new()
        .add_plugins((MinimalPlugins, TileforgedPlugin))
        .run();
}
