//! Rock-paper-scissors dungeon crawler.
//!
//! Main entry point for the game.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use rps_core::actor::PlayerActor;
use rps_core::entity::{Entity, Rps};
use rps_core::geometry::{Dimension, Direction};
use rps_core::{Game, GameRng};
use rps_tui::App;

/// Rock-paper-scissors dungeon crawler
#[derive(Parser, Debug)]
#[command(name = "rps")]
#[command(author, version, about = "Rock, paper, scissors - fight your way out!", long_about = None)]
struct Args {
    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Room width in tiles
    #[arg(long, default_value_t = 16)]
    room_width: i32,

    /// Room height in tiles
    #[arg(long, default_value_t = 8)]
    room_height: i32,

    /// Terrain file to load at startup
    #[arg(long)]
    load: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    let facing = Direction::random(&mut rng);
    let room_size = Dimension::new(args.room_width.max(3), args.room_height.max(3));

    let mut game = Game::random(room_size, rng);
    if let Some(path) = &args.load {
        let terrain = rps_save::load_terrain(path, game.entity_factory_mut())
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;
        game.reset_from_terrain(&terrain);
    }
    game.message("Game started");

    let player_id = game.entity_factory_mut().next_id();
    game.inject_player(
        player_id,
        Entity::Player {
            kind: Rps::Rock,
            facing,
        },
    );
    let mut app = App::new(game, PlayerActor::new(player_id));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
        }
        app.tick();

        if app.should_quit() {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
