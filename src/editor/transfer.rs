//! Copy and paste requests between the map and the clipboard.
//!
//! Copying serializes the selected area into [`ClipboardContents`]; pasting
//! deserializes a blob and performs a [`PasteTerrainMutation`] through the
//! [`CommandHistory`]. A blob that is too short to hold its count header is
//! logged and ignored. Any other decode failure is reported through
//! [`PasteErrorDialog`] for the host to show.

use bevy::prelude::*;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::EditorConfig;
use crate::editor::clipboard::{
    CellArea, CopiedSelection, SerializationError, copy_area, read_selection_bytes,
    write_selection_bytes,
};
use crate::editor::history::CommandHistory;
use crate::editor::mutations::{
    MapRefreshQueue, MutationError, MutationTarget, PasteTerrainMutation, RefreshPolicy,
    TileMapTarget,
};
use crate::map::{MapGrid, Point2, TileMap};
use crate::paths;

#[derive(Debug, Error)]
pub enum PasteError {
    #[error("the copied data is invalid: {0}")]
    Serialization(#[from] SerializationError),
    #[error(transparent)]
    Mutation(#[from] MutationError),
}

/// Request to paste a serialized selection with its top-left at `origin`
#[derive(Message, Debug, Clone)]
pub struct PasteSelectionRequest {
    pub data: Vec<u8>,
    pub origin: Point2,
}

/// Request to paste the current clipboard contents at `origin`
#[derive(Message, Debug, Clone, Copy)]
pub struct PasteClipboardRequest {
    pub origin: Point2,
}

/// Request to copy an area of the map into the clipboard
#[derive(Message, Debug, Clone, Copy)]
pub struct CopyAreaRequest {
    pub area: CellArea,
}

/// Request to write the clipboard contents to a file.
/// `path: None` uses [`paths::clipboard_file`].
#[derive(Message, Debug, Clone, Default)]
pub struct ExportClipboardRequest {
    pub path: Option<PathBuf>,
}

/// Request to replace the clipboard contents with a file's selection.
/// `path: None` uses [`paths::clipboard_file`].
#[derive(Message, Debug, Clone, Default)]
pub struct ImportClipboardRequest {
    pub path: Option<PathBuf>,
}

fn resolve_clipboard_path(path: &Option<PathBuf>) -> PathBuf {
    path.clone().unwrap_or_else(paths::clipboard_file)
}

/// Serialized selection from the last copy
#[derive(Resource, Default, Debug, Clone)]
pub struct ClipboardContents {
    pub data: Option<Vec<u8>>,
}

/// Error message from the last failed paste, shown by the host as a dialog
#[derive(Resource, Default, Debug, Clone)]
pub struct PasteErrorDialog {
    pub message: Option<String>,
}

impl PasteErrorDialog {
    pub fn dismiss(&mut self) {
        self.message = None;
    }
}

/// Decode `data` and paste it at `origin`, recording the mutation in
/// `history`.
///
/// Returns `Ok(false)` when nothing was pasted: the buffer was too short for
/// its count header, or the selection held no entries.
pub fn paste_selection_bytes(
    data: &[u8],
    origin: Point2,
    refresh_policy: RefreshPolicy,
    history: &mut CommandHistory,
    target: &mut dyn MutationTarget,
) -> Result<bool, PasteError> {
    let Some(selection) = CopiedSelection::deserialize(data)? else {
        return Ok(false);
    };

    if selection.is_empty() {
        debug!("Ignoring paste of an empty selection at {}", origin);
        return Ok(false);
    }

    let mutation = PasteTerrainMutation::new(selection, origin).with_refresh_policy(refresh_policy);
    history.perform(Box::new(mutation), target)?;
    Ok(true)
}

/// Copy `area` of `map` with the configured kinds and serialize it
pub fn copy_area_bytes(map: &dyn MapGrid, area: CellArea, config: &EditorConfig) -> Vec<u8> {
    copy_area(map, area, &config.data.copied_entry_kinds).serialize()
}

/// System to handle paste requests
pub fn handle_paste_requests(
    mut events: MessageReader<PasteSelectionRequest>,
    config: Res<EditorConfig>,
    mut history: ResMut<CommandHistory>,
    mut map: ResMut<TileMap>,
    mut refresh: ResMut<MapRefreshQueue>,
    mut error_dialog: ResMut<PasteErrorDialog>,
) {
    for event in events.read() {
        let mut target = TileMapTarget::new(&mut map, &mut refresh);
        match paste_selection_bytes(
            &event.data,
            event.origin,
            config.refresh_policy(),
            &mut history,
            &mut target,
        ) {
            Ok(_) => {}
            Err(e) => {
                error!("Paste at {} failed: {}", event.origin, e);
                error_dialog.message = Some(format!("Failed to paste copied map data: {}", e));
            }
        }
    }
}

/// System to forward clipboard pastes as selection paste requests
pub fn handle_paste_clipboard_requests(
    mut events: MessageReader<PasteClipboardRequest>,
    clipboard: Res<ClipboardContents>,
    mut paste_events: MessageWriter<PasteSelectionRequest>,
) {
    for event in events.read() {
        let Some(data) = &clipboard.data else {
            info!("Clipboard is empty, nothing to paste");
            continue;
        };
        paste_events.write(PasteSelectionRequest {
            data: data.clone(),
            origin: event.origin,
        });
    }
}

/// System to handle copy requests
pub fn handle_copy_requests(
    mut events: MessageReader<CopyAreaRequest>,
    config: Res<EditorConfig>,
    map: Res<TileMap>,
    mut clipboard: ResMut<ClipboardContents>,
) {
    for event in events.read() {
        let data = copy_area_bytes(&*map, event.area, &config);
        info!(
            "Copied area {} to {} ({} bytes)",
            event.area.min,
            event.area.max,
            data.len()
        );
        clipboard.data = Some(data);
    }
}

/// System to write the clipboard to a file
pub fn handle_export_clipboard_requests(
    mut events: MessageReader<ExportClipboardRequest>,
    clipboard: Res<ClipboardContents>,
) {
    for event in events.read() {
        let Some(data) = &clipboard.data else {
            warn!("Clipboard is empty, nothing to export");
            continue;
        };

        if let Err(e) = write_selection_bytes(&resolve_clipboard_path(&event.path), data) {
            error!("{}", e);
        }
    }
}

/// System to load a selection file into the clipboard.
///
/// The file is decoded only to reject invalid data; the clipboard receives
/// its bytes unchanged.
pub fn handle_import_clipboard_requests(
    mut events: MessageReader<ImportClipboardRequest>,
    mut clipboard: ResMut<ClipboardContents>,
) {
    for event in events.read() {
        let path = resolve_clipboard_path(&event.path);
        let data = match read_selection_bytes(&path) {
            Ok(data) => data,
            Err(e) => {
                error!("{}", e);
                continue;
            }
        };

        match CopiedSelection::deserialize(&data) {
            Ok(Some(selection)) => {
                info!("Imported {} copied entries from {:?}", selection.len(), path);
                clipboard.data = Some(data);
            }
            Ok(None) => warn!("Clipboard file {:?} is too short to hold a selection", path),
            Err(e) => error!("Clipboard file {:?} is not valid copied map data: {}", path, e),
        }
    }
}
