//! UI rendering for the dashboard.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::features::account::UserStatus;
use crate::portal::Dashboard;
use crate::tui::app::App;

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App<'_>) {
    let dash = app.snapshot();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Timer
            Constraint::Length(3), // Status selector
            Constraint::Min(0),    // History
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, &dash, chunks[0]);
    render_timer(frame, &dash, chunks[1]);
    render_status_selector(frame, &dash, chunks[2]);
    render_history(frame, app, &dash, chunks[3]);
    render_status_bar(frame, app, chunks[4]);
}

const fn status_color(status: UserStatus) -> Color {
    match status {
        UserStatus::Active => Color::Green,
        UserStatus::Offline => Color::DarkGray,
        UserStatus::Busy => Color::Red,
        UserStatus::Away => Color::Yellow,
    }
}

fn render_header(frame: &mut Frame<'_>, dash: &Dashboard, area: Rect) {
    let title = dash.user.as_ref().map_or_else(
        || " staffdesk (not logged in) ".to_string(),
        |u| format!(" Welcome back, {} ", u.first_name()),
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

fn render_timer(frame: &mut Frame<'_>, dash: &Dashboard, area: Rect) {
    let (label, color) = if dash.working {
        ("Clocked in", Color::Green)
    } else {
        ("Clocked out", Color::DarkGray)
    };
    let line = Line::from(vec![
        Span::styled(
            dash.elapsed.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(label, Style::default().fg(color)),
    ]);

    let timer = Paragraph::new(line).block(
        Block::default()
            .title(" Current session ")
            .borders(Borders::ALL),
    );
    frame.render_widget(timer, area);
}

fn render_status_selector(frame: &mut Frame<'_>, dash: &Dashboard, area: Rect) {
    let current = dash.user.as_ref().map(|u| u.status);
    let spans: Vec<Span<'_>> = UserStatus::ALL
        .iter()
        .flat_map(|&status| {
            let mut style = Style::default().fg(status_color(status));
            if current == Some(status) {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            [
                Span::styled(format!(" {status} "), style),
                Span::raw(" "),
            ]
        })
        .collect();

    let selector = Paragraph::new(Line::from(spans))
        .block(Block::default().title(" Status ").borders(Borders::ALL));
    frame.render_widget(selector, area);
}

fn render_history(frame: &mut Frame<'_>, app: &App<'_>, dash: &Dashboard, area: Rect) {
    let rows = App::rows(dash);
    let items: Vec<ListItem<'_>> = rows
        .iter()
        .map(|session| {
            let check_out = session
                .end_local()
                .map_or_else(|| "-".to_string(), |t| t.format("%H:%M").to_string());
            let duration_style = if session.is_open() {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!(
                    "{}  {}  {:<5}  ",
                    session.date.format("%Y-%m-%d"),
                    session.start_local().format("%H:%M"),
                    check_out
                )),
                Span::styled(session.display_duration(), duration_style),
            ]))
        })
        .collect();

    let title = format!(
        " Last {} days ({})  total {} ",
        dash.window_days,
        rows.len(),
        dash.total
    );
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    if !rows.is_empty() {
        state.select(Some(app.selected.min(rows.len() - 1)));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_status_bar(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let text = app
        .notice
        .as_deref()
        .unwrap_or("space:start/stop | a/b/w/o:status | ?:help | q:quit");

    let bar = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(bar, area);
}
