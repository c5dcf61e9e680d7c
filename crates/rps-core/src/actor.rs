//! Turn actors: units invoked once per tick against the game.

use std::collections::VecDeque;

use crate::entity::EntityId;
use crate::game::Game;
use crate::geometry::Direction;

/// A unit invoked once per tick, in fixed registration order. Performs
/// exactly one state mutation against the game, or none.
pub trait Actor {
    fn make_turn(&mut self, game: &mut Game);
}

/// An action queued for the player's next turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Go(Direction),
    Hit,
}

/// Reserved extension point for environmental effects. Currently a no-op.
#[derive(Debug, Default)]
pub struct Physics;

impl Actor for Physics {
    fn make_turn(&mut self, _game: &mut Game) {}
}

/// The player's turn actor: consumes one queued action per tick and
/// updates the player entity's position, facing and combat kind.
#[derive(Debug)]
pub struct PlayerActor {
    actions: VecDeque<PlayerAction>,
    player: EntityId,
}

impl PlayerActor {
    pub fn new(player: EntityId) -> Self {
        Self {
            actions: VecDeque::new(),
            player,
        }
    }

    pub fn player(&self) -> EntityId {
        self.player
    }

    /// Queue an action for a coming tick.
    pub fn enqueue(&mut self, action: PlayerAction) {
        self.actions.push_back(action);
    }
}

impl Actor for PlayerActor {
    fn make_turn(&mut self, game: &mut Game) {
        let room = game.current_room();

        // If the player is not in the current room the turn is a no-op:
        // the entity is presumed elsewhere, not missing.
        let position = match game.arena().map.position_of(self.player) {
            Some(pos) if room.contains(pos) => pos,
            _ => return,
        };

        let action = self.actions.pop_front();

        if let Some(PlayerAction::Go(direction)) = action {
            if let Some(entity) = game.arena_mut().map.entity_mut(self.player) {
                entity.set_facing(direction);
            }
        }

        match action {
            Some(PlayerAction::Go(direction)) => {
                let target = position + direction.vector();
                if !game.arena().map.dimension().contains(target) {
                    return;
                }
                if game.arena().map.entity_at(target).is_some() {
                    return;
                }
                if room.contains(target) {
                    game.arena_mut()
                        .map
                        .move_entity(self.player, target)
                        .expect("move target was just checked free");
                } else if let Some(next_room) = game.arena().rooms.neighbor(room, direction) {
                    game.arena_mut()
                        .map
                        .move_entity(self.player, target)
                        .expect("move target was just checked free");
                    game.enter_room(next_room);
                }
                // No neighboring room: the move is rejected, facing keeps
                // the new direction.
            }

            Some(PlayerAction::Hit) => {
                let Some(facing) = game
                    .arena()
                    .map
                    .entity(self.player)
                    .and_then(|entity| entity.facing())
                else {
                    return;
                };
                let target_pos = position + facing.vector();
                if !game.arena().map.dimension().contains(target_pos) {
                    return;
                }
                let Some(target_id) = game.arena().map.id_at(target_pos) else {
                    return;
                };
                let target_kind = game
                    .arena()
                    .map
                    .entity(target_id)
                    .expect("id was just looked up")
                    .kind();
                let player_kind = game
                    .arena()
                    .map
                    .entity(self.player)
                    .expect("player position was just looked up")
                    .kind();

                if player_kind.beats(target_kind) {
                    game.arena_mut()
                        .map
                        .remove_entity(target_id)
                        .expect("target id was just looked up");
                    if let Some(entity) = game.arena_mut().map.entity_mut(self.player) {
                        entity.set_kind(target_kind);
                    }
                    game.message(format!("{target_kind} destroyed"));
                } else if target_kind.beats(player_kind) {
                    game.reset_random();
                    game.message("WASTED");
                }
                // Equal kinds: no effect.
            }

            None => {}
        }
    }
}
