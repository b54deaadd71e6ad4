//! Stateless UI rendering for the omok board.

use super::app::App;
use crate::sink::StateSnapshot;
use omok_rules::{Position, Square, Stone};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const HELP: &str = "arrows/hjkl move | enter place | n new game | m mode | c model | q quit";

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Status
            Constraint::Min(10),   // Board
            Constraint::Length(6), // Notices
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("Omok (Gomoku)")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let model = app
        .snapshot()
        .map(|s| format!(" model: {} ", s.model))
        .unwrap_or_default();
    let status = Paragraph::new(app.status_line())
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(model));
    frame.render_widget(status, chunks[1]);

    if let Some(snapshot) = app.snapshot() {
        draw_board(frame, chunks[2], snapshot, app.cursor());
    }

    let notices: Vec<Line> = app.notices().map(|n| Line::from(n.to_string())).collect();
    let notices = Paragraph::new(notices)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL).title(" notices "));
    frame.render_widget(notices, chunks[3]);

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

fn draw_board(frame: &mut Frame, area: Rect, snapshot: &StateSnapshot, cursor: Position) {
    let size = snapshot.board.size();
    // Row label (3) + two columns per cell
    let width = (3 + size * 2) as u16;
    let height = (size + 1) as u16;
    let board_area = center_rect(area, width, height);

    let label_style = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::with_capacity(size + 1);

    let header: String = (0..size)
        .map(|col| format!("{} ", Position::new(0, col).column_label()))
        .collect();
    lines.push(Line::from(Span::styled(format!("   {}", header), label_style)));

    for row in 0..size {
        let mut spans = vec![Span::styled(format!("{:>2} ", row + 1), label_style)];
        for col in 0..size {
            let pos = Position::new(row, col);
            spans.push(cell_span(snapshot, pos, pos == cursor));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), board_area);
}

fn cell_span(snapshot: &StateSnapshot, pos: Position, is_cursor: bool) -> Span<'static> {
    let square = snapshot.board.square(pos).unwrap_or_default();
    let (symbol, mut style) = match square {
        Square::Empty => ("· ", Style::default().fg(Color::DarkGray)),
        Square::Occupied(Stone::Black) => ("● ", Style::default().fg(Color::Blue)),
        Square::Occupied(Stone::White) => ("○ ", Style::default().fg(Color::White)),
    };

    if snapshot.last_move == Some(pos) {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }
    if is_cursor {
        style = style.bg(Color::Yellow).fg(Color::Black);
    }

    Span::styled(symbol, style)
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
