use super::{DashApp, layout};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use repodash_core::model::RepoEntity;

pub(super) const LOG_PANEL_HEIGHT: u16 = 7;
const FOOTER_HEIGHT: u16 = 3;

/// Border and text color by priority: out-of-date outranks local changes,
/// which outrank a queued action, which outranks clean.
pub(super) fn entity_color(entity: &RepoEntity) -> Color {
    if entity.out_of_date {
        Color::Red
    } else if entity.has_local_changes {
        Color::Yellow
    } else if entity.pending_check || entity.pending_sync {
        Color::Blue
    } else {
        Color::Green
    }
}

impl DashApp {
    pub(super) fn draw(&self, frame: &mut Frame) {
        self.draw_grid(frame);
        self.draw_log_panel(frame);
        draw_footer(frame);
    }

    fn draw_grid(&self, frame: &mut Frame) {
        let area = frame.size();
        for (index, entity) in self.entities.iter().enumerate() {
            let rect = layout::cell_rect(index).to_rect().intersection(area);
            if rect.width < 2 || rect.height < 2 {
                continue;
            }
            let style = Style::default().fg(entity_color(entity));
            let label = layout::label_text(&entity.name, entity.pending_sync);
            let cell = Paragraph::new(Line::from(label))
                .style(style)
                .block(Block::default().borders(Borders::ALL).border_style(style));
            frame.render_widget(cell, rect);
        }
    }

    fn draw_log_panel(&self, frame: &mut Frame) {
        let area = frame.size();
        if area.height <= LOG_PANEL_HEIGHT + FOOTER_HEIGHT {
            return;
        }
        let panel = Rect::new(
            0,
            area.height - LOG_PANEL_HEIGHT - FOOTER_HEIGHT,
            area.width,
            LOG_PANEL_HEIGHT,
        );
        let max_lines = panel.height.saturating_sub(2) as usize;
        let lines: Vec<Line> = self
            .log_buffer
            .tail(max_lines)
            .iter()
            .map(|entry| Line::from(entry.format_line()))
            .collect();
        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Logs"));
        frame.render_widget(paragraph, panel);
    }
}

fn draw_footer(frame: &mut Frame) {
    let area = frame.size();
    if area.height < FOOTER_HEIGHT {
        return;
    }
    let footer = Rect::new(0, area.height - FOOTER_HEIGHT, area.width, FOOTER_HEIGHT);
    let help = Paragraph::new(footer_text())
        .block(Block::default().borders(Borders::ALL).title("Help"));
    frame.render_widget(help, footer);
}

pub(super) fn footer_text() -> &'static str {
    "click: sync repo | r: reload repo list | Esc Esc: quit"
}
