//! rps-save: Terrain save/load for the dungeon crawler.
//!
//! Serializes a [`Terrain`] snapshot to a JSON document and reconstructs
//! it. Loaded terrain goes back into the engine through
//! `Game::reset_from_terrain`, so from the core's perspective a load is
//! indistinguishable from starting a fresh game.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use rps_core::dungeon::{EntityGrid, Level, Room, RoomGrid, Rooms, Terrain};
use rps_core::entity::{Entity, EntityFactory};
use rps_core::game::Game;
use rps_core::geometry::{Dimension, Position};

/// Save/restore errors.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Save file not found")]
    NotFound,

    #[error("Save document corrupted: {0}")]
    Corrupted(String),
}

/// The on-disk document: an ordered list of levels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainDoc {
    pub levels: Vec<LevelDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDoc {
    pub level_map: LevelMapDoc,
    pub rooms: RoomsDoc,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelMapDoc {
    pub dimension: Dimension,
    pub entities: Vec<PlacedEntityDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedEntityDoc {
    pub position: Position,
    pub entity: Entity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomsDoc {
    pub initial_pos: Position,
    pub dimension: Dimension,
    pub rooms_list: Vec<(Position, Room)>,
}

/// Encode a terrain snapshot into the document form.
pub fn encode_terrain(terrain: &Terrain) -> TerrainDoc {
    let levels = terrain
        .levels()
        .iter()
        .map(|level| LevelDoc {
            level_map: LevelMapDoc {
                dimension: level.level_map.dimension(),
                entities: level
                    .level_map
                    .entities()
                    .into_iter()
                    .map(|(position, _, entity)| PlacedEntityDoc {
                        position,
                        entity: entity.clone(),
                    })
                    .collect(),
            },
            rooms: RoomsDoc {
                initial_pos: level.rooms.initial_pos(),
                dimension: level.rooms.grid_dimension(),
                rooms_list: level.rooms.placed(),
            },
        })
        .collect();
    TerrainDoc { levels }
}

/// Rebuild a terrain from the document form.
///
/// Entity ids are allocated from the caller's factory, so loaded entities
/// can never collide with ids already live in the game (the surviving
/// player, in particular).
pub fn decode_terrain(doc: &TerrainDoc, factory: &mut EntityFactory) -> Result<Terrain, SaveError> {
    if doc.levels.is_empty() {
        return Err(SaveError::Corrupted("terrain has no levels".into()));
    }

    let mut levels = Vec::with_capacity(doc.levels.len());
    for level_doc in &doc.levels {
        let mut level_map = EntityGrid::new(level_doc.level_map.dimension);
        for placed in &level_doc.level_map.entities {
            level_map
                .add_entity(factory.next_id(), placed.entity.clone(), placed.position)
                .map_err(|err| SaveError::Corrupted(err.to_string()))?;
        }

        let rooms_doc = &level_doc.rooms;
        let mut grid = RoomGrid::new(rooms_doc.dimension, None);
        for &(pos, room) in &rooms_doc.rooms_list {
            if !rooms_doc.dimension.contains(pos) {
                return Err(SaveError::Corrupted(format!(
                    "room position ({},{}) outside the room-grid",
                    pos.x, pos.y
                )));
            }
            grid.set(pos, Some(room));
        }
        if !rooms_doc.dimension.contains(rooms_doc.initial_pos)
            || grid.get(rooms_doc.initial_pos).is_none()
        {
            return Err(SaveError::Corrupted(
                "initial room position holds no room".into(),
            ));
        }

        levels.push(Level {
            level_map,
            rooms: Rooms::new(rooms_doc.initial_pos, grid),
        });
    }
    Ok(Terrain::new(levels))
}

/// Save the game's terrain snapshot to a file.
pub fn save_terrain(game: &Game, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let doc = encode_terrain(&game.terrain_snapshot());
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &doc)?;
    Ok(())
}

/// Load a terrain from a file, allocating entity ids from `factory`.
pub fn load_terrain(
    path: impl AsRef<Path>,
    factory: &mut EntityFactory,
) -> Result<Terrain, SaveError> {
    let file = File::open(path).map_err(|_| SaveError::NotFound)?;
    let reader = BufReader::new(file);
    let doc: TerrainDoc = serde_json::from_reader(reader)?;
    decode_terrain(&doc, factory)
}
