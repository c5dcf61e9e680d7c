//! Input handling - convert key events to player actions.

use crossterm::event::{KeyCode, KeyEvent};

use rps_core::actor::PlayerAction;
use rps_core::geometry::Direction;

/// Convert a key event to a player action.
///
/// Arrows move (and turn) the player; 'z' hits in the facing direction.
/// Keys with UI meaning (quit, command prompt) are handled in app.rs.
pub fn key_to_action(key: KeyEvent) -> Option<PlayerAction> {
    match key.code {
        KeyCode::Up => Some(PlayerAction::Go(Direction::Up)),
        KeyCode::Down => Some(PlayerAction::Go(Direction::Down)),
        KeyCode::Left => Some(PlayerAction::Go(Direction::Left)),
        KeyCode::Right => Some(PlayerAction::Go(Direction::Right)),
        KeyCode::Char('z') => Some(PlayerAction::Hit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_map_to_moves() {
        assert_eq!(
            key_to_action(KeyEvent::from(KeyCode::Up)),
            Some(PlayerAction::Go(Direction::Up))
        );
        assert_eq!(
            key_to_action(KeyEvent::from(KeyCode::Down)),
            Some(PlayerAction::Go(Direction::Down))
        );
        assert_eq!(
            key_to_action(KeyEvent::from(KeyCode::Left)),
            Some(PlayerAction::Go(Direction::Left))
        );
        assert_eq!(
            key_to_action(KeyEvent::from(KeyCode::Right)),
            Some(PlayerAction::Go(Direction::Right))
        );
    }

    #[test]
    fn test_z_hits() {
        assert_eq!(
            key_to_action(KeyEvent::from(KeyCode::Char('z'))),
            Some(PlayerAction::Hit)
        );
    }

    #[test]
    fn test_unbound_keys_ignored() {
        assert_eq!(key_to_action(KeyEvent::from(KeyCode::Char('x'))), None);
        assert_eq!(key_to_action(KeyEvent::from(KeyCode::Enter)), None);
        assert_eq!(key_to_action(KeyEvent::from(KeyCode::Tab)), None);
    }
}
