//! Copied selection data types.

use serde::{Deserialize, Serialize};

use crate::map::Point2;

/// Kind of element a copied entry describes.
///
/// The discriminant is the tag byte written on the wire. Structure, Vehicle
/// and Infantry are reserved: they can be configured but no entry of those
/// kinds is ever produced or accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CopiedEntryKind {
    Terrain = 1,
    Overlay = 2,
    TerrainObject = 4,
    Structure = 8,
    Vehicle = 16,
    Infantry = 32,
}

impl CopiedEntryKind {
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Resolve a wire tag. Only kinds with a payload resolve; `0` and the
    /// reserved kinds do not.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(CopiedEntryKind::Terrain),
            2 => Some(CopiedEntryKind::Overlay),
            4 => Some(CopiedEntryKind::TerrainObject),
            _ => None,
        }
    }

    /// Kinds that have an entry payload and can cross the clipboard
    pub fn is_implemented(self) -> bool {
        matches!(
            self,
            CopiedEntryKind::Terrain | CopiedEntryKind::Overlay | CopiedEntryKind::TerrainObject
        )
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CopiedEntryKind::Terrain => "Terrain",
            CopiedEntryKind::Overlay => "Overlay",
            CopiedEntryKind::TerrainObject => "Terrain Objects",
            CopiedEntryKind::Structure => "Structures",
            CopiedEntryKind::Vehicle => "Vehicles",
            CopiedEntryKind::Infantry => "Infantry",
        }
    }

    pub fn all() -> &'static [CopiedEntryKind] {
        &[
            CopiedEntryKind::Terrain,
            CopiedEntryKind::Overlay,
            CopiedEntryKind::TerrainObject,
            CopiedEntryKind::Structure,
            CopiedEntryKind::Vehicle,
            CopiedEntryKind::Infantry,
        ]
    }
}

/// One copied map element, positioned relative to the paste origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopiedEntry {
    Terrain {
        offset: Point2,
        tile_index: i32,
        sub_tile_index: u8,
    },
    Overlay {
        offset: Point2,
        overlay_type_name: String,
        frame_index: i32,
    },
    TerrainObject {
        offset: Point2,
        terrain_type_name: String,
    },
}

impl CopiedEntry {
    pub fn kind(&self) -> CopiedEntryKind {
        match self {
            CopiedEntry::Terrain { .. } => CopiedEntryKind::Terrain,
            CopiedEntry::Overlay { .. } => CopiedEntryKind::Overlay,
            CopiedEntry::TerrainObject { .. } => CopiedEntryKind::TerrainObject,
        }
    }

    pub fn offset(&self) -> Point2 {
        match self {
            CopiedEntry::Terrain { offset, .. }
            | CopiedEntry::Overlay { offset, .. }
            | CopiedEntry::TerrainObject { offset, .. } => *offset,
        }
    }
}

/// Ordered list of copied entries; the clipboard payload of one copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopiedSelection {
    pub entries: Vec<CopiedEntry>,
}

impl CopiedSelection {
    pub fn new(entries: Vec<CopiedEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, entry: CopiedEntry) {
        self.entries.push(entry);
    }

    /// Entries of one kind, in their original relative order
    pub fn entries_of(&self, kind: CopiedEntryKind) -> impl Iterator<Item = &CopiedEntry> {
        self.entries.iter().filter(move |e| e.kind() == kind)
    }
}

/// The set of kinds a copy operation collects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CopiedEntryKinds(Vec<CopiedEntryKind>);

impl Default for CopiedEntryKinds {
    fn default() -> Self {
        Self(vec![
            CopiedEntryKind::Terrain,
            CopiedEntryKind::Overlay,
            CopiedEntryKind::TerrainObject,
        ])
    }
}

impl CopiedEntryKinds {
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn contains(&self, kind: CopiedEntryKind) -> bool {
        self.0.contains(&kind)
    }

    pub fn set(&mut self, kind: CopiedEntryKind, enabled: bool) {
        if enabled {
            if !self.contains(kind) {
                self.0.push(kind);
            }
        } else {
            self.0.retain(|k| *k != kind);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = CopiedEntryKind> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<CopiedEntryKind> for CopiedEntryKinds {
    fn from_iter<I: IntoIterator<Item = CopiedEntryKind>>(iter: I) -> Self {
        let mut kinds = Self::none();
        for kind in iter {
            kinds.set(kind, true);
        }
        kinds
    }
}
