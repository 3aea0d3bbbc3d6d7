pub mod clipboard;
pub mod history;
pub mod mutations;
pub mod transfer;

pub use history::{CommandHistory, RedoRequest, UndoRequest};
pub use mutations::MapRefreshQueue;
pub use transfer::{
    ClipboardContents, CopyAreaRequest, ExportClipboardRequest, ImportClipboardRequest,
    PasteClipboardRequest, PasteError, PasteErrorDialog, PasteSelectionRequest,
};

use bevy::prelude::*;

use crate::config::{ConfigLoaded, EditorConfig};

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CommandHistory>()
            .init_resource::<MapRefreshQueue>()
            .init_resource::<ClipboardContents>()
            .init_resource::<PasteErrorDialog>()
            .add_message::<UndoRequest>()
            .add_message::<RedoRequest>()
            .add_message::<PasteSelectionRequest>()
            .add_message::<PasteClipboardRequest>()
            .add_message::<CopyAreaRequest>()
            .add_message::<ExportClipboardRequest>()
            .add_message::<ImportClipboardRequest>()
            .add_systems(Startup, history::sync_history_size.after(ConfigLoaded))
            .add_systems(
                Update,
                (
                    history::sync_history_size.run_if(resource_changed::<EditorConfig>),
                    history::handle_undo_redo_shortcuts,
                    (
                        transfer::handle_copy_requests.run_if(on_message::<CopyAreaRequest>),
                        transfer::handle_import_clipboard_requests
                            .run_if(on_message::<ImportClipboardRequest>),
                        transfer::handle_export_clipboard_requests
                            .run_if(on_message::<ExportClipboardRequest>),
                        transfer::handle_paste_clipboard_requests
                            .run_if(on_message::<PasteClipboardRequest>),
                        transfer::handle_paste_requests.run_if(on_message::<PasteSelectionRequest>),
                        history::handle_undo_requests.run_if(on_message::<UndoRequest>),
                        history::handle_redo_requests.run_if(on_message::<RedoRequest>),
                    )
                        .chain(),
                )
                    .chain(),
            );
    }
}
