//! The reversible operation contract shared by all map mutations.

use thiserror::Error;

use crate::map::{MapGrid, Point2};

/// Receiver of redraw requests after a mutation
pub trait RefreshSink {
    /// Request a redraw of the whole map
    fn invalidate_map(&mut self);

    /// Request a localized redraw around `point`
    fn add_refresh_point(&mut self, point: Point2);
}

/// What a mutation operates on: the grid plus its refresh signal
pub trait MutationTarget: RefreshSink {
    fn map_mut(&mut self) -> &mut dyn MapGrid;
}

/// Lifecycle of a single mutation instance.
///
/// `Constructed -> Performed -> Undone`; no other transition is legal, and an
/// undone instance is never performed again (see [`Mutation::replay`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationState {
    #[default]
    Constructed,
    Performed,
    Undone,
}

impl std::fmt::Display for MutationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MutationState::Constructed => "constructed",
            MutationState::Performed => "performed",
            MutationState::Undone => "undone",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error("cannot perform a mutation that is already {0}")]
    NotPerformable(MutationState),
    #[error("cannot undo a mutation that is {0}")]
    NotUndoable(MutationState),
}

/// A one-shot, reversible edit of the map.
///
/// State errors are reported before the target is touched, so a failed call
/// never leaves the grid partially modified.
pub trait Mutation: Send + Sync + std::fmt::Debug {
    /// Short label for history listings and logs
    fn description(&self) -> String;

    fn state(&self) -> MutationState;

    /// Apply the edit and record what is needed to reverse it
    fn perform(&mut self, target: &mut dyn MutationTarget) -> Result<(), MutationError>;

    /// Reverse exactly what `perform` recorded
    fn undo(&mut self, target: &mut dyn MutationTarget) -> Result<(), MutationError>;

    /// A fresh, unperformed instance of the same request
    fn replay(&self) -> Box<dyn Mutation>;
}
