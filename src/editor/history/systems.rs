//! Bevy systems for undo/redo requests and keyboard shortcuts.

use bevy::prelude::*;

use crate::config::EditorConfig;
use crate::editor::mutations::{MapRefreshQueue, TileMapTarget};
use crate::map::TileMap;

use super::command_history::CommandHistory;

/// Request to undo the most recent mutation
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct UndoRequest;

/// Request to redo the most recently undone mutation
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct RedoRequest;

/// System turning Ctrl+Z / Ctrl+Y / Ctrl+Shift+Z into undo/redo requests
pub fn handle_undo_redo_shortcuts(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    mut undo_events: MessageWriter<UndoRequest>,
    mut redo_events: MessageWriter<RedoRequest>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };

    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);
    if !ctrl {
        return;
    }

    if keyboard.just_pressed(KeyCode::KeyY) || (shift && keyboard.just_pressed(KeyCode::KeyZ)) {
        redo_events.write(RedoRequest);
    } else if keyboard.just_pressed(KeyCode::KeyZ) {
        undo_events.write(UndoRequest);
    }
}

/// System to undo one mutation per request
pub fn handle_undo_requests(
    mut events: MessageReader<UndoRequest>,
    mut history: ResMut<CommandHistory>,
    mut map: ResMut<TileMap>,
    mut refresh: ResMut<MapRefreshQueue>,
) {
    for _ in events.read() {
        let mut target = TileMapTarget::new(&mut map, &mut refresh);
        match history.undo(&mut target) {
            Ok(true) => {}
            Ok(false) => debug!("Nothing to undo"),
            Err(e) => error!("Undo failed: {}", e),
        }
    }
}

/// System to redo one mutation per request
pub fn handle_redo_requests(
    mut events: MessageReader<RedoRequest>,
    mut history: ResMut<CommandHistory>,
    mut map: ResMut<TileMap>,
    mut refresh: ResMut<MapRefreshQueue>,
) {
    for _ in events.read() {
        let mut target = TileMapTarget::new(&mut map, &mut refresh);
        match history.redo(&mut target) {
            Ok(true) => {}
            Ok(false) => debug!("Nothing to redo"),
            Err(e) => error!("Redo failed: {}", e),
        }
    }
}

/// Keep the history bound in step with the config
pub fn sync_history_size(config: Res<EditorConfig>, mut history: ResMut<CommandHistory>) {
    let max_size = config.data.max_history_size;
    if history.max_size() != max_size {
        history.set_max_size(max_size);
    }
}
