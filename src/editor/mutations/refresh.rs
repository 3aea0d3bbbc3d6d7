//! Choosing between a full map redraw and a localized refresh.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_FULL_REDRAW_THRESHOLD;
use crate::map::{MapGrid, Point2, TileMap};

use super::contract::{MutationTarget, RefreshSink};

/// Redraw request chosen by a [`RefreshPolicy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshRequest {
    FullMap,
    Point(Point2),
}

/// Mutations with more entries than the threshold invalidate the whole map;
/// smaller ones refresh around their origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshPolicy {
    pub full_redraw_threshold: usize,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            full_redraw_threshold: DEFAULT_FULL_REDRAW_THRESHOLD,
        }
    }
}

impl RefreshPolicy {
    pub fn new(full_redraw_threshold: usize) -> Self {
        Self {
            full_redraw_threshold,
        }
    }

    pub fn decide(&self, entry_count: usize, origin: Point2) -> RefreshRequest {
        if entry_count > self.full_redraw_threshold {
            RefreshRequest::FullMap
        } else {
            RefreshRequest::Point(origin)
        }
    }

    pub fn apply<S: RefreshSink + ?Sized>(&self, entry_count: usize, origin: Point2, sink: &mut S) {
        match self.decide(entry_count, origin) {
            RefreshRequest::FullMap => sink.invalidate_map(),
            RefreshRequest::Point(point) => sink.add_refresh_point(point),
        }
    }
}

/// Pending redraw requests, drained by the renderer each frame
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct MapRefreshQueue {
    pub invalidate_all: bool,
    pub refresh_points: Vec<Point2>,
}

impl MapRefreshQueue {
    pub fn is_empty(&self) -> bool {
        !self.invalidate_all && self.refresh_points.is_empty()
    }

    /// Take all pending requests, leaving the queue empty
    pub fn drain(&mut self) -> MapRefreshQueue {
        std::mem::take(self)
    }
}

impl RefreshSink for MapRefreshQueue {
    fn invalidate_map(&mut self) {
        self.invalidate_all = true;
    }

    fn add_refresh_point(&mut self, point: Point2) {
        self.refresh_points.push(point);
    }
}

/// Binds the tile map resource and the refresh queue into a mutation target
pub struct TileMapTarget<'a> {
    pub map: &'a mut TileMap,
    pub refresh: &'a mut MapRefreshQueue,
}

impl<'a> TileMapTarget<'a> {
    pub fn new(map: &'a mut TileMap, refresh: &'a mut MapRefreshQueue) -> Self {
        Self { map, refresh }
    }
}

impl RefreshSink for TileMapTarget<'_> {
    fn invalidate_map(&mut self) {
        self.refresh.invalidate_map();
    }

    fn add_refresh_point(&mut self, point: Point2) {
        self.refresh.add_refresh_point(point);
    }
}

impl MutationTarget for TileMapTarget<'_> {
    fn map_mut(&mut self) -> &mut dyn MapGrid {
        &mut *self.map
    }
}
