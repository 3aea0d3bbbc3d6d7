//! Centralized constants used across the crate.
//!
//! This module contains magic numbers and configuration defaults that are used
//! in multiple places or would benefit from being named constants.

/// Mutations touching more entries than this request a full map redraw
/// instead of a refresh around the origin
pub const DEFAULT_FULL_REDRAW_THRESHOLD: usize = 10;

/// Maximum number of mutations to keep in the undo history
pub const DEFAULT_MAX_HISTORY_SIZE: usize = 100;

/// File name of the persisted editor configuration
pub const CONFIG_FILE_NAME: &str = "config.json";

/// File name used when a copied selection is carried through a file
pub const CLIPBOARD_FILE_NAME: &str = "copied_map_data.bin";
