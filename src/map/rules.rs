use serde::{Deserialize, Serialize};

/// An overlay type from the rule set (ore, walls, bridges...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayType {
    /// Position in the rule set's overlay table; stable for the session
    pub index: usize,
    pub ini_name: String,
}

/// A terrain object type from the rule set (trees, rocks...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainType {
    pub index: usize,
    pub ini_name: String,
}

/// Read-only type tables consulted when pasting by name.
///
/// Names match exactly (case-sensitive), mirroring how the rule files key them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub overlay_types: Vec<OverlayType>,
    pub terrain_types: Vec<TerrainType>,
}

impl Rules {
    /// Build tables from ordered name lists, assigning indices by position
    pub fn from_names<O, T>(overlay_names: O, terrain_names: T) -> Self
    where
        O: IntoIterator,
        O::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            overlay_types: overlay_names
                .into_iter()
                .enumerate()
                .map(|(index, name)| OverlayType {
                    index,
                    ini_name: name.into(),
                })
                .collect(),
            terrain_types: terrain_names
                .into_iter()
                .enumerate()
                .map(|(index, name)| TerrainType {
                    index,
                    ini_name: name.into(),
                })
                .collect(),
        }
    }

    pub fn find_overlay_type(&self, name: &str) -> Option<&OverlayType> {
        self.overlay_types.iter().find(|ovt| ovt.ini_name == name)
    }

    pub fn find_terrain_type(&self, name: &str) -> Option<&TerrainType> {
        self.terrain_types.iter().find(|tt| tt.ini_name == name)
    }

    pub fn overlay_type(&self, index: usize) -> Option<&OverlayType> {
        self.overlay_types.get(index)
    }

    pub fn terrain_type(&self, index: usize) -> Option<&TerrainType> {
        self.terrain_types.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Rules {
        Rules::from_names(["GASAND", "TIBERIUM01"], ["TREE01", "ROCK02"])
    }

    #[test]
    fn test_from_names_assigns_indices() {
        let rules = rules();
        assert_eq!(rules.overlay_types[1].index, 1);
        assert_eq!(rules.terrain_types[0].ini_name, "TREE01");
    }

    #[test]
    fn test_find_by_exact_name() {
        let rules = rules();
        assert_eq!(rules.find_overlay_type("TIBERIUM01").map(|t| t.index), Some(1));
        assert_eq!(rules.find_terrain_type("ROCK02").map(|t| t.index), Some(1));
    }

    #[test]
    fn test_find_is_case_sensitive() {
        let rules = rules();
        assert!(rules.find_overlay_type("tiberium01").is_none());
        assert!(rules.find_terrain_type("Tree01").is_none());
    }

    #[test]
    fn test_lookup_by_index() {
        let rules = rules();
        assert_eq!(rules.overlay_type(0).map(|t| t.ini_name.as_str()), Some("GASAND"));
        assert!(rules.terrain_type(5).is_none());
    }
}
