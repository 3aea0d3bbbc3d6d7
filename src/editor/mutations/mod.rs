//! Reversible map mutations.
//!
//! A mutation is a one-shot request object: `perform` applies it to a
//! [`MutationTarget`] and records undo state, `undo` reverses exactly what
//! was recorded. Redo is done by performing a [`Mutation::replay`] copy.
//!
//! ## Module Structure
//!
//! - [`contract`] - Mutation, target and refresh sink traits
//! - [`refresh`] - Full-map vs. localized refresh policy and the refresh queue
//! - [`paste_terrain`] - Pasting a copied selection onto the grid

mod contract;
mod paste_terrain;
mod refresh;


pub use contract::{Mutation, MutationError, MutationState, MutationTarget, RefreshSink};
pub use paste_terrain::{
    OriginalCellTerrainData, OriginalOverlayInfo, OverlaySnapshot, PasteTerrainMutation,
};
pub use refresh::{MapRefreshQueue, RefreshPolicy, RefreshRequest, TileMapTarget};
