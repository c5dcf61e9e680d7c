//! Spatial primitives: positions, dimensions, directions and a dense grid.

use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::rng::GameRng;

/// An integer point on the map (or an integer 2D vector).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, other: Position) -> Position {
        Position::new(self.x + other.x, self.y + other.y)
    }
}

impl Neg for Position {
    type Output = Position;

    fn neg(self) -> Position {
        Position::new(-self.x, -self.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, other: Position) -> Position {
        self + (-other)
    }
}

/// A non-negative width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    width: i32,
    height: i32,
}

impl Dimension {
    /// Panics if either side is negative.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width >= 0, "dimension width must be non-negative");
        assert!(height >= 0, "dimension height must be non-negative");
        Self { width, height }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `pos` lies within `[0,width) x [0,height)`.
    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// All contained positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |y| (0..w).map(move |x| Position::new(x, y)))
    }
}

/// One of the four cardinal movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The unit vector this direction moves by.
    pub fn vector(self) -> Position {
        match self {
            Direction::Up => Position::new(0, -1),
            Direction::Down => Position::new(0, 1),
            Direction::Left => Position::new(-1, 0),
            Direction::Right => Position::new(1, 0),
        }
    }

    /// Uniformly random direction.
    pub fn random(rng: &mut GameRng) -> Self {
        const ALL: [Direction; 4] = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        *rng.choose(&ALL).unwrap()
    }
}

/// A dense rectangular container addressed by `Position`.
///
/// Every cell starts at the supplied default value. Out-of-bounds access
/// is a programmer error and panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    dimension: Dimension,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn new(dimension: Dimension, default: T) -> Self {
        let len = (dimension.width() * dimension.height()) as usize;
        Self {
            dimension,
            cells: vec![default; len],
        }
    }
}

impl<T> Grid<T> {
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    fn index(&self, pos: Position) -> usize {
        assert!(
            self.dimension.contains(pos),
            "position ({}, {}) outside grid {}x{}",
            pos.x,
            pos.y,
            self.dimension.width(),
            self.dimension.height()
        );
        (pos.y * self.dimension.width() + pos.x) as usize
    }

    pub fn get(&self, pos: Position) -> &T {
        &self.cells[self.index(pos)]
    }

    /// Replaces the cell at `pos`, returning the previous value.
    pub fn set(&mut self, pos: Position, value: T) -> T {
        let idx = self.index(pos);
        std::mem::replace(&mut self.cells[idx], value)
    }
}
