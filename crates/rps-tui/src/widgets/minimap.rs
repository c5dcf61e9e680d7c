//! Minimap widget: one cell per placed room, with a facing marker on
//! the room holding the player.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Widget};

use rps_core::dungeon::{ArenaMap, Room, Rooms};
use rps_core::entity::Entity;
use rps_core::geometry::Direction;

/// Widget for rendering the arena's room-grid as a minimap.
pub struct MinimapWidget<'a> {
    rooms: &'a Rooms,
    map: &'a ArenaMap,
}

impl<'a> MinimapWidget<'a> {
    pub fn new(rooms: &'a Rooms, map: &'a ArenaMap) -> Self {
        Self { rooms, map }
    }

    fn player_facing_in(&self, room: Room) -> Option<Direction> {
        self.map.entities().into_iter().find_map(|(pos, _, entity)| {
            match entity {
                Entity::Player { facing, .. } if room.contains(pos) => Some(*facing),
                _ => None,
            }
        })
    }
}

fn marker(facing: Direction) -> char {
    match facing {
        Direction::Up => '∧',
        Direction::Down => '∨',
        Direction::Left => '<',
        Direction::Right => '>',
    }
}

impl Widget for MinimapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL).title(" Minimap ");
        let inner = block.inner(area);
        block.render(area, buf);

        for (grid_pos, room) in self.rooms.placed() {
            let x = inner.x + grid_pos.x as u16;
            let y = inner.y + grid_pos.y as u16;
            if x >= inner.right() || y >= inner.bottom() {
                continue;
            }
            let (ch, style) = match self.player_facing_in(room) {
                Some(facing) => (marker(facing), Style::default().bg(Color::Green)),
                None => (' ', Style::default().bg(Color::White)),
            };
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(ch);
                cell.set_style(style);
            }
        }
    }
}
