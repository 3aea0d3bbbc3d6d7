//! Copy/paste data for map elements.
//!
//! A copy collects terrain, overlay and terrain object entries from a map
//! area, each positioned by its offset from the area's top-left cell. The
//! resulting [`CopiedSelection`] crosses the clipboard (or a file) as a
//! versionless, type-tagged byte buffer and is rebuilt at paste time.
//!
//! ## Module Structure
//!
//! - [`types`] - Entry kinds, copied entries and the selection container
//! - [`codec`] - Binary encode/decode of entries and whole selections
//! - [`copy`] - Building a selection from a rectangular map area
//! - [`transport`] - Writing and reading selection blobs as files

mod codec;
mod copy;
mod transport;
mod types;

#[cfg(test)]
mod tests;

pub use codec::{SELECTION_HEADER_LEN, SerializationError};
pub use copy::{CellArea, copy_area};
pub use transport::{
    ClipboardFileError, read_selection_bytes, read_selection_file, write_selection_bytes,
    write_selection_file,
};
pub use types::{CopiedEntry, CopiedEntryKind, CopiedEntryKinds, CopiedSelection};
