//! Unit tests for the clipboard module.

use crate::map::{MapGrid, Overlay, Point2, Rules, TerrainObject, TileMap};

use super::{
    CellArea, ClipboardFileError, CopiedEntry, CopiedEntryKind, CopiedEntryKinds, CopiedSelection,
    SerializationError, copy_area, read_selection_bytes, read_selection_file,
    write_selection_bytes, write_selection_file,
};

fn terrain(x: i32, y: i32, tile_index: i32, sub_tile_index: u8) -> CopiedEntry {
    CopiedEntry::Terrain {
        offset: Point2::new(x, y),
        tile_index,
        sub_tile_index,
    }
}

fn overlay(x: i32, y: i32, name: &str, frame_index: i32) -> CopiedEntry {
    CopiedEntry::Overlay {
        offset: Point2::new(x, y),
        overlay_type_name: name.to_string(),
        frame_index,
    }
}

fn terrain_object(x: i32, y: i32, name: &str) -> CopiedEntry {
    CopiedEntry::TerrainObject {
        offset: Point2::new(x, y),
        terrain_type_name: name.to_string(),
    }
}

fn mixed_selection() -> CopiedSelection {
    CopiedSelection::new(vec![
        terrain(0, 0, 5, 0),
        overlay(1, 0, "TIBERIUM01", 2),
        terrain_object(-2, 3, "TREE01"),
        terrain(-1, -1, i32::MIN, 255),
        overlay(0, 7, "", -4),
    ])
}

// Entry encoding tests
#[test]
fn test_terrain_entry_layout() {
    let bytes = terrain(0, 0, 5, 0).encode();
    assert_eq!(bytes, vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 5, 0, 0, 0, 0]);
}

#[test]
fn test_overlay_entry_layout() {
    let bytes = overlay(1, 0, "TIBERIUM01", 2).encode();
    let mut expected = vec![2, 1, 0, 0, 0, 0, 0, 0, 0, 10, 0, 0, 0];
    expected.extend_from_slice(b"TIBERIUM01");
    expected.extend_from_slice(&[2, 0, 0, 0]);
    assert_eq!(bytes, expected);
}

#[test]
fn test_terrain_object_entry_layout() {
    let bytes = terrain_object(-1, 2, "TREE").encode();
    let mut expected = vec![4, 0xFF, 0xFF, 0xFF, 0xFF, 2, 0, 0, 0, 4, 0, 0, 0];
    expected.extend_from_slice(b"TREE");
    assert_eq!(bytes, expected);
}

#[test]
fn test_single_entry_from_bytes() {
    let entry = overlay(3, 4, "GEM02", 11);
    assert_eq!(CopiedEntry::from_bytes(&entry.encode()), Ok(entry));
}

#[test]
fn test_non_ascii_name_written_as_question_mark() {
    let entry = terrain_object(0, 0, "TRÉE");
    let decoded = CopiedEntry::from_bytes(&entry.encode()).unwrap();
    assert_eq!(decoded, terrain_object(0, 0, "TR?E"));
}

#[test]
fn test_entry_kind_tags() {
    assert_eq!(CopiedEntryKind::Terrain.tag(), 1);
    assert_eq!(CopiedEntryKind::Overlay.tag(), 2);
    assert_eq!(CopiedEntryKind::TerrainObject.tag(), 4);
    assert_eq!(CopiedEntryKind::Infantry.tag(), 32);
    assert_eq!(CopiedEntryKind::from_tag(4), Some(CopiedEntryKind::TerrainObject));
    assert_eq!(CopiedEntryKind::from_tag(0), None);
    assert_eq!(CopiedEntryKind::from_tag(8), None);
}

#[test]
fn test_entry_kind_tag_resolves_back_only_when_implemented() {
    for &kind in CopiedEntryKind::all() {
        let resolved = CopiedEntryKind::from_tag(kind.tag());
        if kind.is_implemented() {
            assert_eq!(resolved, Some(kind));
        } else {
            assert_eq!(resolved, None);
        }
    }
}

// Selection round trip tests
#[test]
fn test_selection_roundtrip_preserves_order_and_fields() {
    let selection = mixed_selection();
    let restored = CopiedSelection::deserialize(&selection.serialize())
        .unwrap()
        .unwrap();
    assert_eq!(restored, selection);
}

#[test]
fn test_serialize_header_is_entry_count() {
    let bytes = mixed_selection().serialize();
    assert_eq!(&bytes[..4], &[5, 0, 0, 0]);
}

#[test]
fn test_concrete_selection_size() {
    let selection = CopiedSelection::new(vec![terrain(0, 0, 5, 0), overlay(1, 0, "TIBERIUM01", 2)]);
    assert_eq!(selection.serialize().len(), 4 + 14 + 27);
}

#[test]
fn test_empty_selection_roundtrip() {
    let bytes = CopiedSelection::default().serialize();
    assert_eq!(bytes, vec![0, 0, 0, 0]);
    let restored = CopiedSelection::deserialize(&bytes).unwrap().unwrap();
    assert!(restored.is_empty());
}

// Short buffer tolerance
#[test]
fn test_short_buffer_is_soft_failure() {
    assert_eq!(CopiedSelection::deserialize(&[]), Ok(None));
    assert_eq!(CopiedSelection::deserialize(&[1]), Ok(None));
    assert_eq!(CopiedSelection::deserialize(&[1, 0, 0]), Ok(None));
}

// Hard failures
#[test]
fn test_invalid_tag_zero_fails() {
    let bytes = [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
    assert_eq!(
        CopiedSelection::deserialize(&bytes),
        Err(SerializationError::InvalidEntryType(0))
    );
}

#[test]
fn test_unknown_and_reserved_tags_fail() {
    for tag in [3u8, 8, 16, 32, 255] {
        let mut bytes = vec![1, 0, 0, 0, tag];
        bytes.extend_from_slice(&[0; 16]);
        assert_eq!(
            CopiedSelection::deserialize(&bytes),
            Err(SerializationError::InvalidEntryType(tag)),
            "tag {tag} should be rejected"
        );
    }
}

#[test]
fn test_bad_tag_after_valid_entries_discards_everything() {
    let mut bytes = vec![3, 0, 0, 0];
    bytes.extend(terrain(0, 0, 1, 1).encode());
    bytes.extend(terrain(1, 0, 2, 2).encode());
    bytes.push(7);
    assert!(CopiedSelection::deserialize(&bytes).is_err());
}

#[test]
fn test_truncated_entry_fails() {
    let bytes = mixed_selection().serialize();
    for cut in 5..bytes.len() {
        let result = CopiedSelection::deserialize(&bytes[..cut]);
        assert!(
            matches!(result, Err(SerializationError::UnexpectedEof { .. })),
            "truncation at {cut} should fail, got {result:?}"
        );
    }
}

#[test]
fn test_truncated_sub_tile_index_fails() {
    let mut bytes = CopiedSelection::new(vec![terrain(0, 0, 5, 9)]).serialize();
    bytes.pop();
    assert_eq!(
        CopiedSelection::deserialize(&bytes),
        Err(SerializationError::UnexpectedEof {
            what: "sub-tile index"
        })
    );
}

#[test]
fn test_count_over_read_fails() {
    let mut bytes = CopiedSelection::new(vec![terrain(0, 0, 5, 0)]).serialize();
    bytes[0] = 2;
    assert_eq!(
        CopiedSelection::deserialize(&bytes),
        Err(SerializationError::UnexpectedEof { what: "entry type" })
    );
}

#[test]
fn test_count_under_read_ignores_trailing_bytes() {
    let mut bytes = CopiedSelection::new(vec![terrain(0, 0, 5, 0), terrain(1, 0, 6, 0)]).serialize();
    bytes[0] = 1;
    bytes.extend_from_slice(&[0xAB, 0xCD]);
    let restored = CopiedSelection::deserialize(&bytes).unwrap().unwrap();
    assert_eq!(restored.entries, vec![terrain(0, 0, 5, 0)]);
}

#[test]
fn test_negative_count_reads_no_entries() {
    let bytes = (-3i32).to_le_bytes();
    let restored = CopiedSelection::deserialize(&bytes).unwrap().unwrap();
    assert!(restored.is_empty());
}

#[test]
fn test_negative_string_length_fails() {
    let mut bytes = vec![1, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0];
    bytes.extend_from_slice(&(-1i32).to_le_bytes());
    assert_eq!(
        CopiedSelection::deserialize(&bytes),
        Err(SerializationError::InvalidStringLength(-1))
    );
}

#[test]
fn test_string_length_past_end_fails() {
    let mut bytes = vec![1, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0];
    bytes.extend_from_slice(&100i32.to_le_bytes());
    bytes.extend_from_slice(b"TREE");
    assert!(matches!(
        CopiedSelection::deserialize(&bytes),
        Err(SerializationError::UnexpectedEof { .. })
    ));
}

// Selection container tests
#[test]
fn test_entries_of_preserves_relative_order() {
    let selection = mixed_selection();
    let terrain_tiles: Vec<i32> = selection
        .entries_of(CopiedEntryKind::Terrain)
        .filter_map(|e| match e {
            CopiedEntry::Terrain { tile_index, .. } => Some(*tile_index),
            _ => None,
        })
        .collect();
    assert_eq!(terrain_tiles, vec![5, i32::MIN]);
    assert_eq!(selection.entries_of(CopiedEntryKind::Overlay).count(), 2);
    assert_eq!(selection.entries_of(CopiedEntryKind::Vehicle).count(), 0);
}

// Copied entry kinds tests
#[test]
fn test_copied_entry_kinds_default() {
    let kinds = CopiedEntryKinds::default();
    assert!(kinds.contains(CopiedEntryKind::Terrain));
    assert!(kinds.contains(CopiedEntryKind::Overlay));
    assert!(kinds.contains(CopiedEntryKind::TerrainObject));
    assert!(!kinds.contains(CopiedEntryKind::Structure));
}

#[test]
fn test_copied_entry_kinds_set() {
    let mut kinds = CopiedEntryKinds::none();
    kinds.set(CopiedEntryKind::Overlay, true);
    kinds.set(CopiedEntryKind::Overlay, true);
    assert_eq!(kinds.iter().count(), 1);
    kinds.set(CopiedEntryKind::Overlay, false);
    assert!(!kinds.contains(CopiedEntryKind::Overlay));
}

#[test]
fn test_copied_entry_kinds_serialization() {
    let kinds: CopiedEntryKinds = [CopiedEntryKind::Terrain, CopiedEntryKind::Vehicle]
        .into_iter()
        .collect();
    let json = serde_json::to_string(&kinds).unwrap();
    assert_eq!(json, r#"["Terrain","Vehicle"]"#);
    let parsed: CopiedEntryKinds = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, kinds);
}

// Copy tests
fn sample_map() -> TileMap {
    let rules = Rules::from_names(["GASAND", "TIBERIUM01"], ["TREE01"]);
    let mut map = TileMap::new(8, 8, rules);
    for (coords, tile_index) in [(Point2::new(2, 2), 10), (Point2::new(3, 2), 11)] {
        if let Some(tile) = map.tile_mut(coords) {
            tile.set_terrain(tile_index, 1);
        }
    }
    if let Some(tile) = map.tile_mut(Point2::new(3, 2)) {
        tile.overlay = Some(Overlay {
            overlay_type: 1,
            frame_index: 6,
            position: Point2::new(3, 2),
        });
    }
    map.add_terrain_object(TerrainObject::new(0, Point2::new(2, 3)));
    map
}

#[test]
fn test_cell_area_from_corners_normalizes() {
    let area = CellArea::from_corners(Point2::new(3, 1), Point2::new(1, 4));
    assert_eq!(area.min, Point2::new(1, 1));
    assert_eq!(area.max, Point2::new(3, 4));
    assert_eq!(area.width(), 3);
    assert_eq!(area.height(), 4);
    assert_eq!(area.cells().count(), 12);
}

#[test]
fn test_copy_area_collects_all_kinds() {
    let map = sample_map();
    let area = CellArea::from_corners(Point2::new(2, 2), Point2::new(3, 3));
    let selection = copy_area(&map, area, &CopiedEntryKinds::default());

    assert_eq!(
        selection.entries,
        vec![
            terrain(0, 0, 10, 1),
            terrain(1, 0, 11, 1),
            overlay(1, 0, "TIBERIUM01", 6),
            terrain(0, 1, 0, 0),
            terrain_object(0, 1, "TREE01"),
            terrain(1, 1, 0, 0),
        ]
    );
}

#[test]
fn test_copy_area_respects_kind_filter() {
    let map = sample_map();
    let area = CellArea::from_corners(Point2::new(2, 2), Point2::new(3, 3));
    let kinds: CopiedEntryKinds = [CopiedEntryKind::Overlay].into_iter().collect();
    let selection = copy_area(&map, area, &kinds);
    assert_eq!(selection.entries, vec![overlay(1, 0, "TIBERIUM01", 6)]);
}

#[test]
fn test_copy_area_skips_cells_outside_map() {
    let map = sample_map();
    let area = CellArea::from_corners(Point2::new(-1, -1), Point2::new(0, 0));
    let kinds: CopiedEntryKinds = [CopiedEntryKind::Terrain].into_iter().collect();
    let selection = copy_area(&map, area, &kinds);
    assert_eq!(selection.entries, vec![terrain(1, 1, 0, 0)]);
}

// File transport tests
#[test]
fn test_selection_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("copied.bin");
    let selection = mixed_selection();

    write_selection_file(&path, &selection).unwrap();
    let restored = read_selection_file(&path).unwrap();

    assert_eq!(restored, Some(selection));
}

#[test]
fn test_selection_file_missing_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_selection_file(&dir.path().join("missing.bin"));
    assert!(matches!(result, Err(ClipboardFileError::Io { .. })));
}

#[test]
fn test_selection_file_corrupt_is_serialization_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.bin");
    std::fs::write(&path, [1, 0, 0, 0, 9]).unwrap();
    let result = read_selection_file(&path);
    assert!(matches!(
        result,
        Err(ClipboardFileError::Serialization {
            source: SerializationError::InvalidEntryType(9),
            ..
        })
    ));
}

#[test]
fn test_selection_file_short_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.bin");
    std::fs::write(&path, [0, 0]).unwrap();
    assert!(read_selection_file(&path).unwrap().is_none());
}

#[test]
fn test_selection_bytes_written_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raw.bin");
    // Trailing bytes past the declared count survive the trip untouched
    let mut bytes = mixed_selection().serialize();
    bytes.extend_from_slice(&[0xAA, 0xBB]);

    write_selection_bytes(&path, &bytes).unwrap();

    assert_eq!(read_selection_bytes(&path).unwrap(), bytes);
    assert_eq!(read_selection_file(&path).unwrap(), Some(mixed_selection()));
}
