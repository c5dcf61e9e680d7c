//! Rooms and the abstract room-grid indexing them.

use serde::{Deserialize, Serialize};

use crate::geometry::{Dimension, Direction, Grid, Position};

/// An axis-aligned rectangle: inclusive origin, exclusive far corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub from: Position,
    pub to_exclusive: Position,
}

impl Room {
    pub fn new(from: Position, to_exclusive: Position) -> Self {
        Self { from, to_exclusive }
    }

    pub fn size(&self) -> Dimension {
        Dimension::new(
            self.to_exclusive.x - self.from.x,
            self.to_exclusive.y - self.from.y,
        )
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.size().contains(pos - self.from)
    }

    /// All contained map positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let from = self.from;
        self.size().positions().map(move |local| local + from)
    }

    /// The room-local position of the geometric center.
    pub fn local_center(&self) -> Position {
        let size = self.size();
        Position::new(size.width() / 2, size.height() / 2)
    }
}

/// Room-grid cells hold rooms by abstract grid coordinates, not pixels.
pub type RoomGrid = Grid<Option<Room>>;

/// The placed rooms of one level plus the designated initial room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rooms {
    initial_pos: Position,
    grid: RoomGrid,
}

impl Rooms {
    /// Panics unless the initial position actually holds a room.
    pub fn new(initial_pos: Position, grid: RoomGrid) -> Self {
        assert!(
            grid.get(initial_pos).is_some(),
            "initial room-grid position holds no room"
        );
        Self { initial_pos, grid }
    }

    pub fn initial_pos(&self) -> Position {
        self.initial_pos
    }

    pub fn initial_room(&self) -> Room {
        self.grid.get(self.initial_pos).unwrap()
    }

    pub fn grid_dimension(&self) -> Dimension {
        self.grid.dimension()
    }

    /// The room at the given room-grid position, if the position is in
    /// bounds and occupied.
    pub fn room_at(&self, grid_pos: Position) -> Option<Room> {
        if self.grid.dimension().contains(grid_pos) {
            *self.grid.get(grid_pos)
        } else {
            None
        }
    }

    /// Every placed room, in row-major room-grid order.
    pub fn all_rooms(&self) -> Vec<Room> {
        self.grid
            .dimension()
            .positions()
            .filter_map(|pos| *self.grid.get(pos))
            .collect()
    }

    /// All (grid position, room) pairs, in row-major room-grid order.
    pub fn placed(&self) -> Vec<(Position, Room)> {
        self.grid
            .dimension()
            .positions()
            .filter_map(|pos| self.grid.get(pos).map(|room| (pos, room)))
            .collect()
    }

    /// The room-grid position of `room`, if it is one of ours.
    pub fn grid_position_of(&self, room: Room) -> Option<Position> {
        self.grid
            .dimension()
            .positions()
            .find(|&pos| *self.grid.get(pos) == Some(room))
    }

    /// The room adjacent to `room` in `direction` on the room-grid.
    pub fn neighbor(&self, room: Room, direction: Direction) -> Option<Room> {
        let grid_pos = self.grid_position_of(room)?;
        self.room_at(grid_pos + direction.vector())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(from: (i32, i32), to: (i32, i32)) -> Room {
        Room::new(Position::new(from.0, from.1), Position::new(to.0, to.1))
    }

    #[test]
    fn test_room_size_and_containment() {
        let r = room((2, 3), (6, 7));
        assert_eq!(r.size(), Dimension::new(4, 4));
        assert!(r.contains(Position::new(2, 3)));
        assert!(r.contains(Position::new(5, 6)));
        assert!(!r.contains(Position::new(6, 3)));
        assert!(!r.contains(Position::new(1, 3)));
    }

    fn two_rooms() -> Rooms {
        let mut grid = RoomGrid::new(Dimension::new(2, 1), None);
        grid.set(Position::new(0, 0), Some(room((0, 0), (5, 5))));
        grid.set(Position::new(1, 0), Some(room((4, 0), (9, 5))));
        Rooms::new(Position::new(0, 0), grid)
    }

    #[test]
    fn test_rooms_lookup() {
        let rooms = two_rooms();
        assert_eq!(rooms.initial_room(), room((0, 0), (5, 5)));
        assert_eq!(rooms.all_rooms().len(), 2);
        assert_eq!(
            rooms.grid_position_of(room((4, 0), (9, 5))),
            Some(Position::new(1, 0))
        );
        assert_eq!(rooms.grid_position_of(room((1, 1), (2, 2))), None);
    }

    #[test]
    fn test_rooms_neighbor() {
        let rooms = two_rooms();
        let left = rooms.initial_room();
        let right = room((4, 0), (9, 5));
        assert_eq!(rooms.neighbor(left, Direction::Right), Some(right));
        assert_eq!(rooms.neighbor(right, Direction::Left), Some(left));
        assert_eq!(rooms.neighbor(left, Direction::Up), None);
        assert_eq!(rooms.neighbor(right, Direction::Right), None);
    }

    #[test]
    #[should_panic(expected = "holds no room")]
    fn test_rooms_require_initial_room() {
        let grid = RoomGrid::new(Dimension::new(2, 2), None);
        Rooms::new(Position::new(0, 0), grid);
    }
}
