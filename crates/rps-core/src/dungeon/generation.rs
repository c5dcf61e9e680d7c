//! Procedural level generation.
//!
//! A level is built by a randomized walk over an abstract room-grid:
//! starting from a seed cell, each step picks an already-placed cell,
//! drifts it until it has a free axis-neighbor, and occupies one of those
//! neighbors. The occupied cells are then shrunk to their bounding box and
//! tiled into pixel-space rooms that share their border rows/columns with
//! their neighbors, walls are stamped, and doorways carved.

use strum::IntoEnumIterator;

use crate::consts::ENEMIES_PER_ROOM;
use crate::dungeon::grid::{ArenaMap, EntityGrid};
use crate::dungeon::level::{Arena, Level, Terrain};
use crate::dungeon::room::{Room, RoomGrid, Rooms};
use crate::entity::{Entity, EntityFactory, Rps};
use crate::geometry::{Dimension, Direction, Grid, Position};
use crate::rng::GameRng;

/// Generate `number_of_levels` independent levels.
pub fn random_terrain(
    room_size: Dimension,
    number_of_rooms: usize,
    number_of_levels: usize,
    factory: &mut EntityFactory,
    rng: &mut GameRng,
) -> Terrain {
    assert!(number_of_rooms > 0, "need at least one room per level");
    assert!(number_of_levels > 0, "need at least one level");

    let levels = (0..number_of_levels)
        .map(|_| random_level(room_size, number_of_rooms, factory, rng))
        .collect();
    Terrain::new(levels)
}

/// Generate a single connected level of `number_of_rooms` rooms.
pub fn random_level(
    room_size: Dimension,
    number_of_rooms: usize,
    factory: &mut EntityFactory,
    rng: &mut GameRng,
) -> Level {
    assert!(number_of_rooms > 0, "need at least one room");

    // Generous headroom so the walk cannot run off the edge.
    let side = 2 * number_of_rooms as i32;
    let mut occupied = Grid::new(Dimension::new(side, side), false);
    let seed = Position::new(number_of_rooms as i32, number_of_rooms as i32);
    occupied.set(seed, true);

    let mut placed = vec![seed];
    let (mut min, mut max) = (seed, seed);
    for _ in 1..number_of_rooms {
        let mut pos = *rng.choose(&placed).unwrap();
        while Direction::iter().all(|dir| *occupied.get(pos + dir.vector())) {
            // Fully surrounded; drift until a free neighbor appears.
            pos = pos
                - if rng.coin_flip() {
                    Position::new(1, 0)
                } else {
                    Position::new(0, 1)
                };
        }

        let free: Vec<Position> = Direction::iter()
            .map(|dir| pos + dir.vector())
            .filter(|&neighbor| !*occupied.get(neighbor))
            .collect();
        let next = *rng.choose(&free).unwrap();
        occupied.set(next, true);
        placed.push(next);
        min = Position::new(min.x.min(next.x), min.y.min(next.y));
        max = Position::new(max.x.max(next.x), max.y.max(next.y));
    }

    // Shrink to the bounding box and derive pixel-space rooms. Adjacent
    // rooms share their boundary row/column, hence the (side - 1) stride.
    let grid_dim = Dimension::new(max.x - min.x + 1, max.y - min.y + 1);
    let (w, h) = (room_size.width(), room_size.height());
    let mut room_grid = RoomGrid::new(grid_dim, None);
    for &cell in &placed {
        let local = cell - min;
        let from = Position::new(local.x * (w - 1), local.y * (h - 1));
        room_grid.set(local, Some(Room::new(from, from + Position::new(w, h))));
    }
    let rooms = Rooms::new(seed - min, room_grid);

    let level_dim = Dimension::new(
        grid_dim.width() * w - grid_dim.width() + 1,
        grid_dim.height() * h - grid_dim.height() + 1,
    );
    let mut level = Level {
        level_map: EntityGrid::new(level_dim),
        rooms,
    };
    put_walls_on(&mut level, factory, rng);
    carve_doorways(&mut level, rng);
    level
}

/// Stamp every room's rectangular border into the level map as blocks of
/// random kind. A border tile shared between adjacent rooms is stamped
/// once, by whichever room comes first in room-grid order.
pub fn put_walls_on(level: &mut Level, factory: &mut EntityFactory, rng: &mut GameRng) {
    for room in level.rooms.all_rooms() {
        for offset in border_offsets(room.size()) {
            let pos = room.from + offset;
            if level.level_map.entity_at(pos).is_none() {
                let kind = Rps::random(rng);
                level
                    .level_map
                    .add_entity(factory.next_id(), Entity::Block { kind }, pos)
                    .expect("border tile was just checked free");
            }
        }
    }
}

/// Border offsets of a room of the given size: top and bottom rows, then
/// left and right columns. Corners appear twice; stamping skips occupied
/// tiles so the duplicates are harmless.
fn border_offsets(size: Dimension) -> Vec<Position> {
    let (w, h) = (size.width(), size.height());
    let top = (0..w).map(|x| Position::new(x, 0));
    let bottom = (0..w).map(move |x| Position::new(x, h - 1));
    let left = (0..h).map(|y| Position::new(0, y));
    let right = (0..h).map(move |y| Position::new(w - 1, y));
    top.chain(bottom).chain(left).chain(right).collect()
}

/// Clear one random non-corner tile of every shared border, so each pair
/// of adjacent rooms is connected by a doorway.
fn carve_doorways(level: &mut Level, rng: &mut GameRng) {
    for (grid_pos, room) in level.rooms.placed() {
        for dir in [Direction::Right, Direction::Down] {
            if level.rooms.room_at(grid_pos + dir.vector()).is_none() {
                continue;
            }
            let candidates: Vec<Position> = match dir {
                Direction::Right => {
                    let x = room.to_exclusive.x - 1;
                    (room.from.y + 1..room.to_exclusive.y - 1)
                        .map(|y| Position::new(x, y))
                        .collect()
                }
                Direction::Down => {
                    let y = room.to_exclusive.y - 1;
                    (room.from.x + 1..room.to_exclusive.x - 1)
                        .map(|x| Position::new(x, y))
                        .collect()
                }
                Direction::Up | Direction::Left => unreachable!(),
            };
            if let Some(&door) = rng.choose(&candidates) {
                if let Some(id) = level.level_map.id_at(door) {
                    level
                        .level_map
                        .remove_entity(id)
                        .expect("doorway tile id was just looked up");
                }
            }
        }
    }
}

/// Derive the live arena for a level: clone the terrain into a fresh
/// layered map and seed each room's inhabitants.
pub fn inhabit(level: &Level, factory: &mut EntityFactory, rng: &mut GameRng) -> Arena {
    let mut map = ArenaMap::new(level.level_map.clone());
    for room in level.rooms.all_rooms() {
        populate_room(&mut map, room, ENEMIES_PER_ROOM, factory, rng);
    }
    Arena {
        map,
        rooms: level.rooms.clone(),
    }
}

/// Seed `count` enemies on free tiles of `room`, random kind and facing.
pub fn populate_room(
    map: &mut ArenaMap,
    room: Room,
    count: usize,
    factory: &mut EntityFactory,
    rng: &mut GameRng,
) {
    let mut free: Vec<Position> = room
        .positions()
        .filter(|&pos| map.entity_at(pos).is_none())
        .collect();
    for _ in 0..count {
        if free.is_empty() {
            break;
        }
        let idx = rng.rn2(free.len() as u32) as usize;
        let pos = free.swap_remove(idx);
        let enemy = Entity::Enemy {
            kind: Rps::random(rng),
            facing: Direction::random(rng),
        };
        map.add_entity(factory.next_id(), enemy, pos)
            .expect("spawn tile was just checked free");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn generate(seed: u64) -> Level {
        let mut factory = EntityFactory::new();
        let mut rng = GameRng::new(seed);
        random_level(Dimension::new(7, 5), 8, &mut factory, &mut rng)
    }

    #[test]
    fn test_room_count_honored() {
        for seed in 0..20 {
            let level = generate(seed);
            assert_eq!(level.rooms.all_rooms().len(), 8, "seed {seed}");
        }
    }

    #[test]
    fn test_rooms_fit_level_dimension() {
        for seed in 0..20 {
            let level = generate(seed);
            let dim = level.level_map.dimension();
            for room in level.rooms.all_rooms() {
                for pos in room.positions() {
                    assert!(dim.contains(pos), "seed {seed}: {pos:?} outside {dim:?}");
                }
            }
        }
    }

    #[test]
    fn test_rooms_connected_on_room_grid() {
        for seed in 0..20 {
            let level = generate(seed);
            let placed = level.rooms.placed();
            let cells: HashSet<Position> = placed.iter().map(|&(pos, _)| pos).collect();

            let start = level.rooms.initial_pos();
            let mut seen = HashSet::from([start]);
            let mut frontier = vec![start];
            while let Some(pos) = frontier.pop() {
                for dir in Direction::iter() {
                    let next = pos + dir.vector();
                    if cells.contains(&next) && seen.insert(next) {
                        frontier.push(next);
                    }
                }
            }
            assert_eq!(seen.len(), cells.len(), "seed {seed}: disconnected rooms");
        }
    }

    #[test]
    fn test_adjacent_rooms_share_border() {
        for seed in 0..10 {
            let level = generate(seed);
            for (grid_pos, room) in level.rooms.placed() {
                if let Some(right) = level.rooms.room_at(grid_pos + Position::new(1, 0)) {
                    assert_eq!(room.to_exclusive.x - 1, right.from.x, "seed {seed}");
                }
                if let Some(below) = level.rooms.room_at(grid_pos + Position::new(0, 1)) {
                    assert_eq!(room.to_exclusive.y - 1, below.from.y, "seed {seed}");
                }
            }
        }
    }

    #[test]
    fn test_walls_stamped_on_corners() {
        // Corners are never carved into doorways.
        for seed in 0..10 {
            let level = generate(seed);
            for room in level.rooms.all_rooms() {
                let far = room.to_exclusive - Position::new(1, 1);
                for corner in [
                    room.from,
                    Position::new(far.x, room.from.y),
                    Position::new(room.from.x, far.y),
                    far,
                ] {
                    assert!(
                        matches!(
                            level.level_map.entity_at(corner),
                            Some(Entity::Block { .. })
                        ),
                        "seed {seed}: corner {corner:?} not walled"
                    );
                }
            }
        }
    }

    #[test]
    fn test_doorways_carved_between_neighbors() {
        for seed in 0..10 {
            let level = generate(seed);
            for (grid_pos, room) in level.rooms.placed() {
                if level.rooms.room_at(grid_pos + Position::new(1, 0)).is_some() {
                    let x = room.to_exclusive.x - 1;
                    let open = (room.from.y + 1..room.to_exclusive.y - 1)
                        .any(|y| level.level_map.entity_at(Position::new(x, y)).is_none());
                    assert!(open, "seed {seed}: no doorway to the right of {room:?}");
                }
                if level.rooms.room_at(grid_pos + Position::new(0, 1)).is_some() {
                    let y = room.to_exclusive.y - 1;
                    let open = (room.from.x + 1..room.to_exclusive.x - 1)
                        .any(|x| level.level_map.entity_at(Position::new(x, y)).is_none());
                    assert!(open, "seed {seed}: no doorway below {room:?}");
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_level() {
        assert_eq!(generate(42), generate(42));
    }

    #[test]
    fn test_put_walls_on_seals_every_border_tile() {
        let mut factory = EntityFactory::new();
        let mut rng = GameRng::new(1);
        let mut grid = RoomGrid::new(Dimension::new(1, 1), None);
        let room = Room::new(Position::new(0, 0), Position::new(5, 4));
        grid.set(Position::new(0, 0), Some(room));
        let mut level = Level {
            level_map: EntityGrid::new(Dimension::new(5, 4)),
            rooms: Rooms::new(Position::new(0, 0), grid),
        };

        put_walls_on(&mut level, &mut factory, &mut rng);
        for offset in border_offsets(room.size()) {
            assert!(level.level_map.entity_at(room.from + offset).is_some());
        }
        // Interior stays free.
        assert!(level.level_map.entity_at(Position::new(2, 1)).is_none());
        assert_eq!(level.level_map.len(), 2 * 5 + 2 * 4 - 4);
    }

    #[test]
    fn test_populate_room_spawns_enemies_on_free_tiles() {
        let mut factory = EntityFactory::new();
        let mut rng = GameRng::new(3);
        let mut map = ArenaMap::new(EntityGrid::new(Dimension::new(6, 6)));
        let room = Room::new(Position::new(0, 0), Position::new(6, 6));

        populate_room(&mut map, room, 4, &mut factory, &mut rng);
        let enemies: Vec<_> = map
            .entities()
            .into_iter()
            .filter(|(_, _, entity)| matches!(entity, Entity::Enemy { .. }))
            .collect();
        assert_eq!(enemies.len(), 4);
        let positions: HashSet<Position> = enemies.iter().map(|&(pos, _, _)| pos).collect();
        assert_eq!(positions.len(), 4);
    }

    #[test]
    fn test_inhabit_keeps_terrain() {
        let mut factory = EntityFactory::new();
        let mut rng = GameRng::new(9);
        let level = random_level(Dimension::new(7, 5), 4, &mut factory, &mut rng);
        let arena = inhabit(&level, &mut factory, &mut rng);
        assert_eq!(*arena.map.terrain(), level.level_map);
        assert_eq!(arena.rooms, level.rooms);
    }
}
