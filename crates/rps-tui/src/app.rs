//! Application state and main UI controller.

use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use rps_core::actor::{Actor, Physics, PlayerActor};
use rps_core::{Game, LOG_CAP};

use crate::command;
use crate::input::key_to_action;
use crate::widgets::{LogWidget, MinimapWidget, RoomWidget};

/// UI mode - what the app is currently displaying/waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiMode {
    /// Normal gameplay.
    Playing,
    /// Typing a prompt command (`:save <path>`, `:load <path>`).
    Command { input: String },
}

/// Application state: the game plus its turn actors and UI mode.
pub struct App {
    game: Game,
    player: PlayerActor,
    physics: Physics,
    mode: UiMode,
    should_quit: bool,
}

impl App {
    pub fn new(game: Game, player: PlayerActor) -> Self {
        Self {
            game,
            player,
            physics: Physics,
            mode: UiMode::Playing,
            should_quit: false,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn mode(&self) -> &UiMode {
        &self.mode
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Feed one terminal event into the UI.
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            match self.mode {
                UiMode::Playing => self.handle_playing_key(key),
                UiMode::Command { .. } => self.handle_command_key(key),
            }
        }
    }

    fn handle_playing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char(':') => {
                self.mode = UiMode::Command {
                    input: String::new(),
                };
            }
            _ => {
                if let Some(action) = key_to_action(key) {
                    self.player.enqueue(action);
                }
            }
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        let UiMode::Command { input } = &mut self.mode else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.mode = UiMode::Playing,
            KeyCode::Enter => {
                let line = std::mem::take(input);
                self.mode = UiMode::Playing;
                if !line.trim().is_empty() {
                    command::run(&line, &mut self.game);
                }
            }
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) => input.push(c),
            _ => {}
        }
    }

    /// Run one turn: every actor acts once, physics before the player.
    pub fn tick(&mut self) {
        self.physics.make_turn(&mut self.game);
        self.player.make_turn(&mut self.game);
    }

    /// Render the UI: room view and minimap on top, log below, and the
    /// command prompt when one is open.
    pub fn render(&self, frame: &mut Frame) {
        let log_height = LOG_CAP as u16 + 2;
        let constraints = match self.mode {
            UiMode::Playing => vec![Constraint::Min(5), Constraint::Length(log_height)],
            UiMode::Command { .. } => vec![
                Constraint::Min(5),
                Constraint::Length(log_height),
                Constraint::Length(3),
            ],
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(frame.area());

        let arena = self.game.arena();
        let minimap_width = arena.rooms.grid_dimension().width() as u16 + 2;
        let upper = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(minimap_width)])
            .split(chunks[0]);

        frame.render_widget(
            RoomWidget::new(&arena.map, self.game.current_room()),
            upper[0],
        );
        frame.render_widget(MinimapWidget::new(&arena.rooms, &arena.map), upper[1]);
        frame.render_widget(LogWidget::new(self.game.log()), chunks[1]);

        if let UiMode::Command { input } = &self.mode {
            let prompt = Paragraph::new(format!(":{input}_"))
                .block(Block::default().borders(Borders::ALL).title(" Command "));
            frame.render_widget(prompt, chunks[2]);
        }
    }
}
