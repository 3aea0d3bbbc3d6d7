//! Binary wire format for copied selections.
//!
//! ```text
//! SelectionBuffer := i32 entry_count, Entry[entry_count]
//! Entry           := u8 tag, i32 offset_x, i32 offset_y, Payload(tag)
//! Payload(1)      := i32 tile_index, u8 sub_tile_index           ; Terrain
//! Payload(2)      := String overlay_type_name, i32 frame_index   ; Overlay
//! Payload(4)      := String terrain_type_name                    ; TerrainObject
//! String          := i32 length, u8[length]                      ; ASCII, no terminator
//! ```
//!
//! Every integer is a little-endian two's-complement i32. The format has no
//! version field; any change to this layout is a breaking change.

use bevy::prelude::*;
use thiserror::Error;

use crate::map::Point2;

use super::types::{CopiedEntry, CopiedEntryKind, CopiedSelection};

/// Size of the entry count header
pub const SELECTION_HEADER_LEN: usize = 4;

/// Smallest encoded entry (a TerrainObject with an empty name)
const MIN_ENTRY_LEN: usize = 1 + 8 + 4;

/// Largest count or string length an i32 prefix can frame
const MAX_FRAMED_LEN: usize = i32::MAX as usize;

/// Substituted for characters outside the ASCII range, both ways
const NON_ASCII_REPLACEMENT: u8 = b'?';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializationError {
    #[error("invalid map data entry type {0}")]
    InvalidEntryType(u8),
    #[error("failed to read {what} from stream: end of stream")]
    UnexpectedEof { what: &'static str },
    #[error("invalid string length {0}")]
    InvalidStringLength(i32),
}

/// Forward-only cursor over an input buffer
struct ByteReader<'a> {
    bytes: &'a [u8],
    cursor: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8], cursor: usize) -> Self {
        Self { bytes, cursor }
    }

    fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.cursor)
    }

    fn read_exact(&mut self, len: usize, what: &'static str) -> Result<&'a [u8], SerializationError> {
        let end = self.cursor.saturating_add(len);
        if end > self.bytes.len() {
            return Err(SerializationError::UnexpectedEof { what });
        }
        let out = &self.bytes[self.cursor..end];
        self.cursor = end;
        Ok(out)
    }

    fn read_u8(&mut self, what: &'static str) -> Result<u8, SerializationError> {
        Ok(self.read_exact(1, what)?[0])
    }

    fn read_i32(&mut self, what: &'static str) -> Result<i32, SerializationError> {
        let raw = self.read_exact(4, what)?;
        let mut word = [0u8; 4];
        word.copy_from_slice(raw);
        Ok(i32::from_le_bytes(word))
    }

    fn read_point(&mut self) -> Result<Point2, SerializationError> {
        let x = self.read_i32("offset x")?;
        let y = self.read_i32("offset y")?;
        Ok(Point2::new(x, y))
    }

    fn read_ascii_string(&mut self, what: &'static str) -> Result<String, SerializationError> {
        let len = self.read_i32("string length")?;
        let len = usize::try_from(len).map_err(|_| SerializationError::InvalidStringLength(len))?;
        let raw = self.read_exact(len, what)?;
        Ok(raw
            .iter()
            .map(|&b| {
                if b.is_ascii() {
                    b as char
                } else {
                    NON_ASCII_REPLACEMENT as char
                }
            })
            .collect())
    }
}

fn write_i32(target: &mut Vec<u8>, value: i32) {
    target.extend_from_slice(&value.to_le_bytes());
}

fn write_ascii_string(target: &mut Vec<u8>, value: &str) {
    write_ascii_string_capped(target, value, MAX_FRAMED_LEN);
}

/// Names longer than `max_len` characters are cut so the length prefix
/// always matches the bytes that follow it
fn write_ascii_string_capped(target: &mut Vec<u8>, value: &str, max_len: usize) {
    let char_count = value.chars().count();
    if char_count > max_len {
        warn!(
            "Type name of {} characters truncated to {} for the clipboard",
            char_count, max_len
        );
    }

    let encoded: Vec<u8> = value
        .chars()
        .take(max_len)
        .map(|c| {
            if c.is_ascii() {
                c as u8
            } else {
                NON_ASCII_REPLACEMENT
            }
        })
        .collect();
    write_i32(target, encoded.len() as i32);
    target.extend_from_slice(&encoded);
}

impl CopiedEntry {
    /// Append the tag, offset and payload of this entry to `target`
    pub fn encode_into(&self, target: &mut Vec<u8>) {
        target.push(self.kind().tag());
        target.extend_from_slice(&self.offset().to_le_bytes());

        match self {
            CopiedEntry::Terrain {
                tile_index,
                sub_tile_index,
                ..
            } => {
                write_i32(target, *tile_index);
                target.push(*sub_tile_index);
            }
            CopiedEntry::Overlay {
                overlay_type_name,
                frame_index,
                ..
            } => {
                write_ascii_string(target, overlay_type_name);
                write_i32(target, *frame_index);
            }
            CopiedEntry::TerrainObject {
                terrain_type_name, ..
            } => {
                write_ascii_string(target, terrain_type_name);
            }
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        self.encode_into(&mut bytes);
        bytes
    }

    /// Decode the offset and payload of an entry whose tag was already read
    fn decode(tag: u8, reader: &mut ByteReader<'_>) -> Result<Self, SerializationError> {
        let kind = CopiedEntryKind::from_tag(tag).ok_or(SerializationError::InvalidEntryType(tag))?;
        let offset = reader.read_point()?;

        let entry = match kind {
            CopiedEntryKind::Terrain => CopiedEntry::Terrain {
                offset,
                tile_index: reader.read_i32("tile index")?,
                sub_tile_index: reader.read_u8("sub-tile index")?,
            },
            CopiedEntryKind::Overlay => CopiedEntry::Overlay {
                offset,
                overlay_type_name: reader.read_ascii_string("overlay type name")?,
                frame_index: reader.read_i32("frame index")?,
            },
            CopiedEntryKind::TerrainObject => CopiedEntry::TerrainObject {
                offset,
                terrain_type_name: reader.read_ascii_string("terrain type name")?,
            },
            CopiedEntryKind::Structure | CopiedEntryKind::Vehicle | CopiedEntryKind::Infantry => {
                return Err(SerializationError::InvalidEntryType(tag));
            }
        };

        Ok(entry)
    }

    /// Decode a single standalone entry (tag byte included)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SerializationError> {
        let mut reader = ByteReader::new(bytes, 0);
        let tag = reader.read_u8("entry type")?;
        Self::decode(tag, &mut reader)
    }
}

impl CopiedSelection {
    /// Encode as entry count followed by each entry, in list order
    pub fn serialize(&self) -> Vec<u8> {
        self.serialize_capped(MAX_FRAMED_LEN)
    }

    /// Entries past `max_entries` are left out so the count header always
    /// matches the entries that follow it
    fn serialize_capped(&self, max_entries: usize) -> Vec<u8> {
        let count = self.entries.len().min(max_entries);
        if count < self.entries.len() {
            warn!(
                "Selection of {} entries truncated to {} for the clipboard",
                self.entries.len(),
                count
            );
        }

        let mut bytes = Vec::with_capacity(SELECTION_HEADER_LEN + count * 16);
        write_i32(&mut bytes, count as i32);
        for entry in self.entries.iter().take(count) {
            entry.encode_into(&mut bytes);
        }
        bytes
    }

    /// Rebuild a selection from a clipboard buffer.
    ///
    /// A buffer shorter than the count header is logged and yields `Ok(None)`.
    /// Any other defect (bad tag, truncated entry) fails the whole buffer and
    /// no entries are returned. Bytes past the declared count are ignored, and
    /// a negative count reads as zero entries.
    pub fn deserialize(bytes: &[u8]) -> Result<Option<Self>, SerializationError> {
        if bytes.len() < SELECTION_HEADER_LEN {
            warn!(
                "Failed to deserialize copied map data: provided buffer is {} bytes, less than {}",
                bytes.len(),
                SELECTION_HEADER_LEN
            );
            return Ok(None);
        }

        let mut reader = ByteReader::new(bytes, 0);
        let entry_count = reader.read_i32("entry count")?.max(0) as usize;

        let mut entries = Vec::with_capacity(entry_count.min(reader.remaining() / MIN_ENTRY_LEN));
        for _ in 0..entry_count {
            let tag = reader.read_u8("entry type")?;
            entries.push(CopiedEntry::decode(tag, &mut reader)?);
        }

        debug!(
            "Deserialized {} copied entries ({} trailing bytes ignored)",
            entries.len(),
            reader.remaining()
        );

        Ok(Some(CopiedSelection { entries }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capped_string_prefix_matches_payload() {
        let mut bytes = Vec::new();
        write_ascii_string_capped(&mut bytes, "TIBERIUM01", 3);

        assert_eq!(bytes, [3, 0, 0, 0, b'T', b'I', b'B']);
        let mut reader = ByteReader::new(&bytes, 0);
        assert_eq!(reader.read_ascii_string("name"), Ok("TIB".to_string()));
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_capped_selection_count_matches_entries() {
        let selection = CopiedSelection::new(
            (0..5)
                .map(|i| CopiedEntry::Terrain {
                    offset: Point2::new(i, 0),
                    tile_index: i,
                    sub_tile_index: 0,
                })
                .collect(),
        );

        let bytes = selection.serialize_capped(2);
        let decoded = CopiedSelection::deserialize(&bytes).unwrap().unwrap();

        assert_eq!(decoded.entries, selection.entries[..2]);
        // Two terrain entries of 14 bytes each, nothing trailing
        assert_eq!(bytes.len(), SELECTION_HEADER_LEN + 2 * 14);
    }
}
