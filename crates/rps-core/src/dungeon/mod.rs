//! Dungeon structure: entity grids, rooms, levels and the generator.

mod generation;
mod grid;
mod level;
mod room;

pub use generation::{inhabit, populate_room, put_walls_on, random_level, random_terrain};
pub use grid::{ArenaMap, EntityGrid, GridError};
pub use level::{Arena, Level, Terrain};
pub use room::{Room, RoomGrid, Rooms};
