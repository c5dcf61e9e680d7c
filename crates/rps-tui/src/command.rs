//! Typed command prompt: `save <path>` and `load <path>`.

use std::path::PathBuf;

use rps_core::Game;

/// A parsed prompt command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Save(PathBuf),
    Load(PathBuf),
}

/// Parse a command line. The error is the message to show the player.
pub fn parse(input: &str) -> Result<Command, String> {
    let mut parts = input.split_whitespace();
    match parts.next() {
        Some("save") => match (parts.next(), parts.next()) {
            (Some(path), None) => Ok(Command::Save(PathBuf::from(path))),
            _ => Err("'save' command expects a path argument".to_string()),
        },
        Some("load") => match (parts.next(), parts.next()) {
            (Some(path), None) => Ok(Command::Load(PathBuf::from(path))),
            _ => Err("'load' command expects a path argument".to_string()),
        },
        Some(other) => Err(format!("Unknown command '{other}'")),
        None => Err("Empty command".to_string()),
    }
}

/// Parse and execute a command line against the game. The outcome, good
/// or bad, goes to the message log.
pub fn run(input: &str, game: &mut Game) {
    let outcome = match parse(input) {
        Ok(Command::Save(path)) => match rps_save::save_terrain(game, &path) {
            Ok(()) => "Terrain saved".to_string(),
            Err(err) => format!("Save failed: {err}"),
        },
        Ok(Command::Load(path)) => {
            match rps_save::load_terrain(&path, game.entity_factory_mut()) {
                Ok(terrain) => {
                    game.reset_from_terrain(&terrain);
                    "Terrain loaded, game restarted".to_string()
                }
                Err(err) => format!("Load failed: {err}"),
            }
        }
        Err(message) => message,
    };
    game.message(outcome);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rps_core::entity::{Entity, Rps};
    use rps_core::geometry::{Dimension, Direction};
    use rps_core::GameRng;

    #[test]
    fn test_parse_save_and_load() {
        assert_eq!(
            parse("save /tmp/world.json"),
            Ok(Command::Save(PathBuf::from("/tmp/world.json")))
        );
        assert_eq!(
            parse("  load  world.json "),
            Ok(Command::Load(PathBuf::from("world.json")))
        );
    }

    #[test]
    fn test_parse_missing_argument() {
        assert_eq!(
            parse("save"),
            Err("'save' command expects a path argument".to_string())
        );
        assert_eq!(
            parse("load"),
            Err("'load' command expects a path argument".to_string())
        );
    }

    #[test]
    fn test_parse_surplus_argument() {
        assert_eq!(
            parse("save /tmp/a.json extra"),
            Err("'save' command expects a path argument".to_string())
        );
        assert_eq!(
            parse("load a.json b.json"),
            Err("'load' command expects a path argument".to_string())
        );
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(parse("fly away"), Err("Unknown command 'fly'".to_string()));
    }

    fn game_with_player() -> Game {
        let mut game = Game::random(Dimension::new(7, 5), GameRng::new(77));
        let id = game.entity_factory_mut().next_id();
        game.inject_player(
            id,
            Entity::Player {
                kind: Rps::Rock,
                facing: Direction::Down,
            },
        );
        game
    }

    #[test]
    fn test_run_save_then_load() {
        let path = std::env::temp_dir().join("rps_tui_command_test.json");
        let path_str = path.to_str().unwrap().to_string();
        let mut game = game_with_player();

        run(&format!("save {path_str}"), &mut game);
        assert_eq!(game.log().iter().last(), Some("Terrain saved"));

        let saved = game.terrain_snapshot();
        run(&format!("load {path_str}"), &mut game);
        assert_eq!(
            game.log().iter().last(),
            Some("Terrain loaded, game restarted")
        );
        assert_eq!(game.terrain_snapshot(), saved);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_run_load_missing_file_logs_error() {
        let mut game = game_with_player();
        run("load /nonexistent/terrain.json", &mut game);
        let last = game.log().iter().last().unwrap().to_string();
        assert!(last.starts_with("Load failed:"));
    }

    #[test]
    fn test_run_unknown_command_logs_message() {
        let mut game = game_with_player();
        run("teleport", &mut game);
        assert_eq!(game.log().iter().last(), Some("Unknown command 'teleport'"));
    }
}
