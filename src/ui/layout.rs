use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::config::MAX_TOKEN_SUPPLY;
use crate::utils::format_tokens;
use super::{
    components::{render_header, render_notice},
    view::{ActionView, claim_prompt, select_view},
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4), // Title
            Constraint::Length(4), // Sale progress
            Constraint::Min(5),    // Action panel
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_progress(f, app, chunks[1]);
    render_action(f, app, chunks[2]);
    render_status_bar(f, app, chunks[3]);

    if let Some(ref notice) = app.state.notice {
        render_notice(f, notice);
    }
}

fn render_progress(f: &mut Frame, app: &App, area: Rect) {
    let state = &app.state;
    let lines = if state.connected {
        vec![
            Line::from(format!(
                "You have minted {} Tokens!",
                format_tokens(state.token_balance)
            )),
            Line::from(format!(
                "Overall {}/{MAX_TOKEN_SUPPLY} have been minted!!",
                format_tokens(state.tokens_minted)
            )),
        ]
    } else {
        vec![Line::styled(
            "Connect your wallet to see the sale",
            Style::default().fg(Color::DarkGray),
        )]
    };

    let progress = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Sale"));
    f.render_widget(progress, area);
}

fn render_action(f: &mut Frame, app: &App, area: Rect) {
    let view = select_view(&app.state);

    let mut lines = Vec::new();
    match view {
        ActionView::Claim { tokens } => {
            lines.push(Line::from(claim_prompt(tokens)));
            lines.push(Line::from(""));
        }
        ActionView::Mint { .. } => {
            let input = if app.state.mint_input.is_empty() {
                Span::styled("Amount of Tokens", Style::default().fg(Color::DarkGray))
            } else {
                Span::styled(
                    app.state.mint_input.as_str(),
                    Style::default().fg(Color::Yellow),
                )
            };
            lines.push(Line::from(vec![Span::raw("Amount: "), input, Span::raw("_")]));
            lines.push(Line::from(""));
        }
        _ => {}
    }

    let button_style = if view.is_enabled() {
        Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    lines.push(Line::styled(format!("[ {} ]", view.button_label()), button_style));

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(panel, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let state = &app.state;
    let account = state
        .account
        .map(|a| a.to_string())
        .unwrap_or_else(|| "not connected".to_string());
    let refreshed = state
        .last_refreshed
        .map(|t| t.format("%H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "never".to_string());

    let mut spans = vec![
        Span::styled(app.network_label(), Style::default().fg(Color::Cyan)),
        Span::raw(format!(" | {account} | Updated: {refreshed}")),
    ];
    if let Some(ref error) = state.last_error {
        spans.push(Span::styled(format!(" | {error}"), Style::default().fg(Color::Red)));
    }
    spans.push(Span::raw(" | Enter: Act | c: Connect | r: Refresh | q: Quit"));

    let footer = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
