//! Message log widget.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use rps_core::MessageLog;

/// Widget for rendering the game's message log, oldest entry first.
pub struct LogWidget<'a> {
    log: &'a MessageLog,
}

impl<'a> LogWidget<'a> {
    pub fn new(log: &'a MessageLog) -> Self {
        Self { log }
    }
}

impl Widget for LogWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = self.log.iter().map(Line::from).collect();
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Log "))
            .style(Style::default().fg(Color::White));
        paragraph.render(area, buf);
    }
}
