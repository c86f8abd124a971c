//! Screen layout

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::app::{App, Mode};

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let title = Paragraph::new(app.title.as_str())
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(title, chunks[0]);

    draw_address_bar(frame, app, chunks[1]);

    match app.progress {
        Some(percent) => {
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(Color::Cyan))
                .percent(u16::from(percent.min(100)));
            frame.render_widget(gauge, chunks[2]);
        }
        None => {
            let status = Paragraph::new(app.status.as_deref().unwrap_or(""))
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(status, chunks[2]);
        }
    }

    let lines: Vec<Line> = app.lines.iter().map(|l| Line::raw(l.as_str())).collect();
    let page = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .scroll((app.scroll, 0));
    frame.render_widget(page, chunks[3]);

    let help = match app.mode {
        Mode::Browse => "g: address  b/←: back  f/→: forward  r: refresh  h: home  ↑↓ PgUp PgDn: scroll  q: quit",
        Mode::EditAddress => "Enter: go  Esc: cancel",
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        chunks[4],
    );
}

fn draw_address_bar(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let (can_back, can_forward) = app.history_hint();
    let arrow = |enabled: bool, glyph: &'static str| {
        let style = if enabled {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(glyph, style)
    };

    let (text, style) = match app.mode {
        Mode::EditAddress => (
            format!("{}_", app.input),
            Style::default().fg(Color::Black).bg(Color::White),
        ),
        Mode::Browse => (app.address.clone(), Style::default().fg(Color::White)),
    };

    let bar = Line::from(vec![
        arrow(can_back, "◀ "),
        arrow(can_forward, "▶ "),
        Span::styled(text, style),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Address")
        .border_style(Style::default().fg(Color::Blue));
    frame.render_widget(Paragraph::new(bar).block(block), area);
}
