//! Level, arena and terrain containers.

use crate::dungeon::grid::{ArenaMap, EntityGrid};
use crate::dungeon::room::Rooms;

/// The immutable blueprint of one dungeon floor: static terrain plus the
/// room graph. Generated once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub level_map: EntityGrid,
    pub rooms: Rooms,
}

/// One live, inhabited dungeon floor.
#[derive(Debug, Clone)]
pub struct Arena {
    pub map: ArenaMap,
    pub rooms: Rooms,
}

/// Non-empty ordered sequence of levels - the generator's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terrain {
    levels: Vec<Level>,
}

impl Terrain {
    /// Panics if `levels` is empty.
    pub fn new(levels: Vec<Level>) -> Self {
        assert!(!levels.is_empty(), "terrain must have at least one level");
        Self { levels }
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }
}
