//! Current-room display widget.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Widget};

use rps_core::dungeon::{ArenaMap, Room};
use rps_core::entity::{Entity, Rps};
use rps_core::geometry::Position;

/// The map symbol for a combat kind. Walls, enemies and the player all
/// draw as their kind; color tells them apart.
pub fn glyph(kind: Rps) -> char {
    match kind {
        Rps::Rock => '@',
        Rps::Paper => '#',
        Rps::Scissors => '%',
    }
}

/// Widget for rendering the current room of an arena, centered in its
/// area.
pub struct RoomWidget<'a> {
    map: &'a ArenaMap,
    room: Room,
}

impl<'a> RoomWidget<'a> {
    pub fn new(map: &'a ArenaMap, room: Room) -> Self {
        Self { map, room }
    }

    fn tile_display(&self, pos: Position) -> (char, Style) {
        match self.map.entity_at(pos) {
            None => (' ', Style::default()),
            Some(entity) => {
                let color = match entity {
                    Entity::Player { .. } => Color::Green,
                    Entity::Enemy { .. } => Color::Red,
                    Entity::Block { .. } => Color::Gray,
                };
                (glyph(entity.kind()), Style::default().fg(color))
            }
        }
    }
}

impl Widget for RoomWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL).title(" Arena ");
        let inner = block.inner(area);
        block.render(area, buf);

        let size = self.room.size();
        let x0 = inner.x + inner.width.saturating_sub(size.width() as u16) / 2;
        let y0 = inner.y + inner.height.saturating_sub(size.height() as u16) / 2;

        for local in size.positions() {
            let x = x0 + local.x as u16;
            let y = y0 + local.y as u16;
            if x >= inner.right() || y >= inner.bottom() {
                continue;
            }
            let (ch, style) = self.tile_display(self.room.from + local);
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(ch);
                cell.set_style(style);
            }
        }
    }
}
