//! Session state: world, play field, message log and game lifecycle.

use std::collections::VecDeque;

use crate::consts::{LEVEL_COUNT, LOG_CAP, ROOM_COUNT};
use crate::dungeon::{inhabit, random_terrain, Arena, Level, Room, Terrain};
use crate::entity::{Entity, EntityFactory, EntityId};
use crate::geometry::{Dimension, Position};
use crate::rng::GameRng;

/// Non-empty ordered sequence of inhabited arenas.
#[derive(Debug)]
pub struct World {
    arenas: Vec<Arena>,
}

impl World {
    /// Panics if `arenas` is empty.
    pub fn new(arenas: Vec<Arena>) -> Self {
        assert!(!arenas.is_empty(), "world must have at least one arena");
        Self { arenas }
    }

    pub fn arenas(&self) -> &[Arena] {
        &self.arenas
    }
}

/// The session's pointer into the world: which arena, which room.
#[derive(Debug, Clone)]
pub struct PlayField {
    arena_index: usize,
    current_room: Room,
}

impl PlayField {
    /// Start at the arena's initial room. Panics if the index is not a
    /// member of `world`.
    pub fn new(world: &World, arena_index: usize) -> Self {
        let arena = &world.arenas()[arena_index];
        Self {
            arena_index,
            current_room: arena.rooms.initial_room(),
        }
    }

    pub fn arena_index(&self) -> usize {
        self.arena_index
    }

    pub fn current_room(&self) -> Room {
        self.current_room
    }
}

/// Append-only, insertion-ordered message log; oldest entries are evicted
/// past [`LOG_CAP`].
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: VecDeque<String>,
}

impl MessageLog {
    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push_back(message.into());
        while self.messages.len() > LOG_CAP {
            self.messages.pop_front();
        }
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// One game session: a world, the play field pointing into it, the log,
/// and the id/rng state every generation draws from.
///
/// Keeping the factory and rng here (rather than rebuilding them per
/// generation) is what keeps entity ids unique across resets: surviving
/// players carry their ids into the replacement world.
#[derive(Debug)]
pub struct Game {
    world: World,
    play_field: PlayField,
    log: MessageLog,
    factory: EntityFactory,
    rng: GameRng,
}

impl Game {
    /// Panics if the play field does not point into `world`.
    pub fn new(world: World, play_field: PlayField, factory: EntityFactory, rng: GameRng) -> Self {
        assert!(
            play_field.arena_index() < world.arenas().len(),
            "play field arena is not a member of the world"
        );
        Self {
            world,
            play_field,
            log: MessageLog::default(),
            factory,
            rng,
        }
    }

    /// Generate a fresh random game anchored at the first arena's initial
    /// room.
    pub fn random(room_size: Dimension, rng: GameRng) -> Self {
        let mut factory = EntityFactory::new();
        let mut rng = rng;
        let terrain = random_terrain(room_size, ROOM_COUNT, LEVEL_COUNT, &mut factory, &mut rng);
        Self::from_terrain(&terrain, factory, rng)
    }

    /// Inhabit every level of `terrain` into a world and start a game on
    /// it. The load path goes through here too, so a loaded game is
    /// indistinguishable from a fresh one.
    pub fn from_terrain(terrain: &Terrain, mut factory: EntityFactory, mut rng: GameRng) -> Self {
        let arenas = terrain
            .levels()
            .iter()
            .map(|level| inhabit(level, &mut factory, &mut rng))
            .collect();
        let world = World::new(arenas);
        let play_field = PlayField::new(&world, 0);
        Self::new(world, play_field, factory, rng)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn play_field(&self) -> &PlayField {
        &self.play_field
    }

    pub fn arena(&self) -> &Arena {
        &self.world.arenas[self.play_field.arena_index]
    }

    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.world.arenas[self.play_field.arena_index]
    }

    pub fn current_room(&self) -> Room {
        self.play_field.current_room
    }

    /// Make `room` the current room. Panics unless it is one of the
    /// current arena's rooms.
    pub fn enter_room(&mut self, room: Room) {
        assert!(
            self.arena().rooms.all_rooms().contains(&room),
            "current room must belong to the current arena"
        );
        self.play_field.current_room = room;
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn message(&mut self, message: impl Into<String>) {
        self.log.push(message);
    }

    pub fn entity_factory_mut(&mut self) -> &mut EntityFactory {
        &mut self.factory
    }

    /// Replace world and play field, carrying every player entity tracked
    /// in the old field's arena over into the new field's current room.
    /// The log survives.
    pub fn reset(&mut self, world: World, play_field: PlayField) {
        assert!(
            play_field.arena_index() < world.arenas().len(),
            "play field arena is not a member of the world"
        );

        let player_ids: Vec<EntityId> = self
            .arena()
            .map
            .entities()
            .iter()
            .filter(|(_, _, entity)| entity.is_player())
            .map(|&(_, id, _)| id)
            .collect();
        let players: Vec<(EntityId, Entity)> = player_ids
            .into_iter()
            .map(|id| {
                let entity = self
                    .arena_mut()
                    .map
                    .remove_entity(id)
                    .expect("player id was just enumerated");
                (id, entity)
            })
            .collect();

        self.world = world;
        self.play_field = play_field;
        for (id, entity) in players {
            self.inject_player(id, entity);
        }
    }

    /// Discard the session for an entirely fresh random game at the
    /// current room size - the "you lost, restart" path.
    pub fn reset_random(&mut self) {
        let room_size = self.current_room().size();
        let terrain = random_terrain(
            room_size,
            ROOM_COUNT,
            LEVEL_COUNT,
            &mut self.factory,
            &mut self.rng,
        );
        self.reset_from_terrain(&terrain);
    }

    /// Rebuild the world from `terrain` (freshly generated or loaded) and
    /// reset onto its first arena.
    pub fn reset_from_terrain(&mut self, terrain: &Terrain) {
        let arenas = terrain
            .levels()
            .iter()
            .map(|level| inhabit(level, &mut self.factory, &mut self.rng))
            .collect();
        let world = World::new(arenas);
        let play_field = PlayField::new(&world, 0);
        self.reset(world, play_field);
    }

    /// Place a player entity on the free tile of the current room closest
    /// to its center (Euclidean distance, ties broken in row-major order).
    pub fn inject_player(&mut self, id: EntityId, entity: Entity) {
        let room = self.current_room();
        let center = room.local_center();
        let mut tiles: Vec<Position> = room.size().positions().collect();
        tiles.sort_by_key(|&local| distance2(local, center));

        let target = tiles
            .into_iter()
            .map(|local| local + room.from)
            .find(|&pos| self.arena().map.entity_at(pos).is_none())
            .expect("current room has no free tile for the player");
        self.arena_mut()
            .map
            .add_entity(id, entity, target)
            .expect("injection tile was just checked free");
    }

    /// Read-only terrain snapshot of the whole world, suitable for
    /// serialization: each arena's terrain layer plus its rooms.
    pub fn terrain_snapshot(&self) -> Terrain {
        let levels = self
            .world
            .arenas()
            .iter()
            .map(|arena| Level {
                level_map: arena.map.terrain().clone(),
                rooms: arena.rooms.clone(),
            })
            .collect();
        Terrain::new(levels)
    }
}

fn distance2(a: Position, b: Position) -> i64 {
    let dx = (a.x - b.x) as i64;
    let dy = (a.y - b.y) as i64;
    dx * dx + dy * dy
}
