//! Entity model: combat kinds, world-object variants and identity handles.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::geometry::Direction;
use crate::rng::GameRng;

/// A combat kind with cyclic dominance: Rock loses to Paper loses to
/// Scissors loses to Rock.
///
/// The relation is intransitive, so there is deliberately no `Ord` impl;
/// `beats` is the comparison surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Rps {
    Rock,
    Paper,
    Scissors,
}

impl Rps {
    /// The kind that strictly dominates this one.
    pub fn stronger(self) -> Rps {
        match self {
            Rps::Rock => Rps::Paper,
            Rps::Paper => Rps::Scissors,
            Rps::Scissors => Rps::Rock,
        }
    }

    /// The kind this one strictly dominates.
    pub fn weaker(self) -> Rps {
        match self {
            Rps::Rock => Rps::Scissors,
            Rps::Paper => Rps::Rock,
            Rps::Scissors => Rps::Paper,
        }
    }

    /// Whether this kind strictly dominates `other`.
    pub fn beats(self, other: Rps) -> bool {
        other == self.weaker()
    }

    /// Uniformly random kind.
    pub fn random(rng: &mut GameRng) -> Rps {
        const ALL: [Rps; 3] = [Rps::Rock, Rps::Paper, Rps::Scissors];
        *rng.choose(&ALL).unwrap()
    }
}

/// A world object.
///
/// Every variant carries a combat kind; only the movable variants carry a
/// facing. Two entities of equal value are still distinct occupants - grid
/// identity is the [`EntityId`] they are tracked under, never the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Entity {
    /// Static terrain. Kind is fixed at creation.
    Block { kind: Rps },
    /// A hostile inhabitant.
    Enemy { kind: Rps, facing: Direction },
    /// The player. Both kind and facing change during play.
    Player { kind: Rps, facing: Direction },
}

impl Entity {
    pub fn kind(&self) -> Rps {
        match self {
            Entity::Block { kind } | Entity::Enemy { kind, .. } | Entity::Player { kind, .. } => {
                *kind
            }
        }
    }

    /// The direction the entity faces, if it has one.
    pub fn facing(&self) -> Option<Direction> {
        match self {
            Entity::Block { .. } => None,
            Entity::Enemy { facing, .. } | Entity::Player { facing, .. } => Some(*facing),
        }
    }

    /// Update the facing. No effect on variants without one.
    pub fn set_facing(&mut self, direction: Direction) {
        match self {
            Entity::Block { .. } => {}
            Entity::Enemy { facing, .. } | Entity::Player { facing, .. } => *facing = direction,
        }
    }

    /// Update the combat kind. Only the player's kind is mutable.
    pub fn set_kind(&mut self, new_kind: Rps) {
        if let Entity::Player { kind, .. } = self {
            *kind = new_kind;
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self, Entity::Player { .. })
    }
}

/// Stable identity handle for a tracked entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

/// Incrementing id allocator.
///
/// Owned by whichever component constructs entities (the `Game` threads it
/// into the generator and inhabiter); there is no global counter.
#[derive(Debug, Default, Clone)]
pub struct EntityFactory {
    next: u64,
}

impl EntityFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}
