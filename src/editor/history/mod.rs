//! Undo/Redo for map mutations.
//!
//! Performed mutations are kept on a bounded undo stack. Undoing moves a
//! mutation to the redo stack; redoing performs a fresh replay of it, so no
//! mutation instance is ever performed twice.
//!
//! ## Usage
//!
//! - **Ctrl+Z**: Undo the last action
//! - **Ctrl+Y** or **Ctrl+Shift+Z**: Redo the last undone action
//!
//! ## Module Structure
//!
//! - [`command_history`] - CommandHistory resource for tracking state
//! - [`systems`] - Bevy systems for requests and keyboard shortcuts

mod command_history;
mod systems;


pub use command_history::CommandHistory;
pub use systems::{
    RedoRequest, UndoRequest, handle_redo_requests, handle_undo_redo_shortcuts,
    handle_undo_requests, sync_history_size,
};
