//! Entity grids: the position-to-entity spatial index and the layered
//! arena map.

use std::collections::HashMap;

use thiserror::Error;

use crate::entity::{Entity, EntityId};
use crate::geometry::{Dimension, Grid, Position};

/// Failures of the grid operations.
///
/// All four are programmer errors when raised from inside the engine: the
/// turn actor pre-checks occupancy and bounds before committing a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("position ({},{}) is outside the grid", .0.x, .0.y)]
    PointOutOfBounds(Position),

    #[error("tile ({},{}) is already occupied", .0.x, .0.y)]
    TileBusy(Position),

    #[error("entity {0:?} is not tracked by this grid")]
    EntityNotPresent(EntityId),

    #[error("entity {0:?} is already tracked by this grid")]
    EntityAlreadyPresent(EntityId),
}

#[derive(Debug, Clone)]
struct Tracked {
    position: Position,
    entity: Entity,
}

/// A mapping from position to at most one entity, with an inverse index
/// from entity identity to position.
///
/// Invariant: for every tracked id, the cell at its recorded position holds
/// exactly that id and vice versa; neither direction has orphans.
#[derive(Debug, Clone)]
pub struct EntityGrid {
    tiles: Grid<Option<EntityId>>,
    tracked: HashMap<EntityId, Tracked>,
}

impl EntityGrid {
    pub fn new(dimension: Dimension) -> Self {
        Self {
            tiles: Grid::new(dimension, None),
            tracked: HashMap::new(),
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.tiles.dimension()
    }

    /// The id occupying `pos`, if any. `pos` must be in bounds.
    pub fn id_at(&self, pos: Position) -> Option<EntityId> {
        *self.tiles.get(pos)
    }

    /// The entity occupying `pos`, if any. `pos` must be in bounds.
    pub fn entity_at(&self, pos: Position) -> Option<&Entity> {
        self.id_at(pos).map(|id| &self.tracked[&id].entity)
    }

    /// Inverse lookup; `None` if the id is untracked.
    pub fn position_of(&self, id: EntityId) -> Option<Position> {
        self.tracked.get(&id).map(|t| t.position)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.tracked.get(&id).map(|t| &t.entity)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.tracked.get_mut(&id).map(|t| &mut t.entity)
    }

    /// Install `entity` at `pos`, tracking it under `id`.
    ///
    /// Both mapping directions are installed atomically: on any error the
    /// grid is unchanged.
    pub fn add_entity(
        &mut self,
        id: EntityId,
        entity: Entity,
        pos: Position,
    ) -> Result<(), GridError> {
        if !self.dimension().contains(pos) {
            return Err(GridError::PointOutOfBounds(pos));
        }
        if self.id_at(pos).is_some() {
            return Err(GridError::TileBusy(pos));
        }
        if self.tracked.contains_key(&id) {
            return Err(GridError::EntityAlreadyPresent(id));
        }
        self.tiles.set(pos, Some(id));
        self.tracked.insert(
            id,
            Tracked {
                position: pos,
                entity,
            },
        );
        Ok(())
    }

    /// Untrack `id`, clearing both mapping directions. Returns the entity.
    pub fn remove_entity(&mut self, id: EntityId) -> Result<Entity, GridError> {
        let tracked = self
            .tracked
            .remove(&id)
            .ok_or(GridError::EntityNotPresent(id))?;
        self.tiles.set(tracked.position, None);
        Ok(tracked.entity)
    }

    /// Relocate `id` to `pos`.
    ///
    /// All failure conditions are checked before any mutation, so a failed
    /// move leaves the grid exactly as it was.
    pub fn move_entity(&mut self, id: EntityId, pos: Position) -> Result<(), GridError> {
        if !self.dimension().contains(pos) {
            return Err(GridError::PointOutOfBounds(pos));
        }
        if self.id_at(pos).is_some() {
            return Err(GridError::TileBusy(pos));
        }
        if !self.tracked.contains_key(&id) {
            return Err(GridError::EntityNotPresent(id));
        }
        let entity = self.remove_entity(id)?;
        self.add_entity(id, entity, pos)
    }

    /// All (position, id, entity) triples in row-major position order.
    pub fn entities(&self) -> Vec<(Position, EntityId, &Entity)> {
        self.dimension()
            .positions()
            .filter_map(|pos| self.id_at(pos).map(|id| (pos, id, &self.tracked[&id].entity)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }
}

/// Value equality: same dimension and the same entity on every tile.
/// Identity handles are ignored, so a serialized and reloaded grid
/// compares equal to the original.
impl PartialEq for EntityGrid {
    fn eq(&self, other: &Self) -> bool {
        self.dimension() == other.dimension()
            && self
                .dimension()
                .positions()
                .all(|pos| self.entity_at(pos) == other.entity_at(pos))
    }
}

impl Eq for EntityGrid {}

/// The live map of one dungeon floor: a dynamic entity layer over the
/// static terrain layer, both of the same dimension.
///
/// Reads fall through the dynamic layer to the terrain. Writes route to
/// whichever layer tracks the entity, located explicitly rather than by
/// trial and error, so a destroyed wall vacates the terrain layer's own
/// tracking.
#[derive(Debug, Clone)]
pub struct ArenaMap {
    dynamic: EntityGrid,
    terrain: EntityGrid,
}

impl ArenaMap {
    pub fn new(terrain: EntityGrid) -> Self {
        Self {
            dynamic: EntityGrid::new(terrain.dimension()),
            terrain,
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.terrain.dimension()
    }

    pub fn terrain(&self) -> &EntityGrid {
        &self.terrain
    }

    pub fn id_at(&self, pos: Position) -> Option<EntityId> {
        self.dynamic.id_at(pos).or_else(|| self.terrain.id_at(pos))
    }

    pub fn entity_at(&self, pos: Position) -> Option<&Entity> {
        self.dynamic
            .entity_at(pos)
            .or_else(|| self.terrain.entity_at(pos))
    }

    pub fn position_of(&self, id: EntityId) -> Option<Position> {
        self.dynamic
            .position_of(id)
            .or_else(|| self.terrain.position_of(id))
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.dynamic.entity(id).or_else(|| self.terrain.entity(id))
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        if self.dynamic.entity(id).is_some() {
            self.dynamic.entity_mut(id)
        } else {
            self.terrain.entity_mut(id)
        }
    }

    /// Dynamic entities first, then terrain, each in row-major order.
    pub fn entities(&self) -> Vec<(Position, EntityId, &Entity)> {
        let mut all = self.dynamic.entities();
        all.extend(self.terrain.entities());
        all
    }

    /// Add into the dynamic layer. Occupancy is checked against both
    /// layers: a tile with terrain on it is busy.
    pub fn add_entity(
        &mut self,
        id: EntityId,
        entity: Entity,
        pos: Position,
    ) -> Result<(), GridError> {
        if !self.dimension().contains(pos) {
            return Err(GridError::PointOutOfBounds(pos));
        }
        if self.id_at(pos).is_some() {
            return Err(GridError::TileBusy(pos));
        }
        self.dynamic.add_entity(id, entity, pos)
    }

    /// Remove from whichever layer tracks `id`.
    pub fn remove_entity(&mut self, id: EntityId) -> Result<Entity, GridError> {
        if self.dynamic.position_of(id).is_some() {
            self.dynamic.remove_entity(id)
        } else {
            self.terrain.remove_entity(id)
        }
    }

    /// Move within whichever layer tracks `id`; the entity never changes
    /// layer. The destination is busy if either layer occupies it.
    pub fn move_entity(&mut self, id: EntityId, pos: Position) -> Result<(), GridError> {
        if !self.dimension().contains(pos) {
            return Err(GridError::PointOutOfBounds(pos));
        }
        if self.id_at(pos).is_some() {
            return Err(GridError::TileBusy(pos));
        }
        if self.dynamic.position_of(id).is_some() {
            self.dynamic.move_entity(id, pos)
        } else {
            self.terrain.move_entity(id, pos)
        }
    }
}
