use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::data::{Notice, NoticeKind};

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn render_header(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::styled(
            "Welcome To Crypto Devs ICO",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            "You can claim or mint Crypto Dev Tokens Here",
            Style::default().fg(Color::Gray),
        ),
    ];
    let header = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

/// Modal message drawn over everything else until dismissed.
pub fn render_notice(f: &mut Frame, notice: &Notice) {
    let area = centered_rect(60, 25, f.area());
    let (title, color) = match notice.kind {
        NoticeKind::Info => ("Success", Color::Green),
        NoticeKind::Error => ("Error", Color::Red),
    };

    let lines = vec![
        Line::from(notice.message.as_str()),
        Line::from(""),
        Line::styled(
            format!("{} | Esc/Enter: Dismiss", notice.raised_at.format("%H:%M:%S UTC")),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    let popup = Paragraph::new(lines)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title),
        );

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}
