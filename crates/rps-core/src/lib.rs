//! rps-core: Core logic for the rock-paper-scissors dungeon crawler
//!
//! This crate contains all game logic with no I/O dependencies.
//! It is designed to be pure and testable: the terminal layer and the
//! save/load layer live in their own crates and talk to the engine
//! through `Game`, the `Actor` trait and `Terrain` snapshots.

pub mod actor;
pub mod dungeon;
pub mod entity;
pub mod game;
pub mod geometry;

mod consts;
mod rng;

pub use consts::*;
pub use game::{Game, MessageLog, PlayField, World};
pub use rng::GameRng;
