//! UI rendering functions for the TUI.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use super::state::App;
use super::types::Overlay;
use crate::session::{Status, View};
use crate::view::{EpisodeCard, ShowCard};

fn highlight() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

/// Draw the UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    app.clamp_selections();
    let size = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Filter bar
            Constraint::Min(0),    // Listing + details
            Constraint::Length(1), // Status line
            Constraint::Length(3), // Footer
        ])
        .split(size);

    draw_header(frame, app, chunks[0]);
    draw_filter_bar(frame, app, chunks[1]);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[2]);

    match app.session.view() {
        View::ShowsListing => draw_shows(frame, app, content[0], content[1]),
        View::EpisodesListing => draw_episodes(frame, app, content[0], content[1]),
    }

    draw_status(frame, app, chunks[3]);
    draw_footer(frame, app, chunks[4]);

    match app.overlay {
        Overlay::Help => draw_help_modal(frame, app),
        Overlay::ShowPicker => draw_picker(frame, app, "Select show"),
        Overlay::EpisodePicker => draw_picker(frame, app, "Select episode"),
        Overlay::None => {}
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let location = match (app.session.view(), app.session.current_show()) {
        (View::EpisodesListing, Some(show)) => show.name.clone(),
        _ => "All shows".to_string(),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "show-browser",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("[{}]", location), Style::default().fg(Color::Cyan)),
    ]))
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn draw_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.filter_active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let query = app.current_query();
    let text = if query.is_empty() && !app.filter_active {
        "Press '/' to filter..."
    } else {
        query
    };

    let title = match app.session.view() {
        View::ShowsListing => "Search shows",
        View::EpisodesListing => "Search episodes",
    };

    let bar = Paragraph::new(text)
        .style(if app.filter_active {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        );

    frame.render_widget(bar, area);

    if app.filter_active {
        frame.set_cursor_position((cursor_x(area, query), area.y.saturating_add(1)));
    }
}

/// Column just after `query` inside the bordered bar, kept off the right border.
fn cursor_x(area: Rect, query: &str) -> u16 {
    let width = u16::try_from(Line::from(query).width()).unwrap_or(u16::MAX);
    let last = area.right().saturating_sub(2).max(area.x);
    area.x.saturating_add(1).saturating_add(width).min(last)
}

fn draw_shows(frame: &mut Frame, app: &mut App, list_area: Rect, details_area: Rect) {
    let shows = app.session.visible_shows();
    let items: Vec<ListItem> = shows.iter().map(|s| ListItem::new(s.name.clone())).collect();
    let selected = app
        .show_list_state
        .selected()
        .and_then(|i| shows.get(i))
        .map(|s| ShowCard::new(s, app.summary_mode));

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Shows"))
        .highlight_style(highlight())
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, list_area, &mut app.show_list_state);

    let details = match selected {
        Some(card) => vec![
            Line::from(Span::styled(
                card.title,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("Genres: {}", card.genres)),
            Line::from(format!("Status: {}", card.status)),
            Line::from(format!("Rating: {}", card.rating)),
            Line::from(format!("Runtime: {}", card.runtime)),
            Line::from(format!("Image: {}", card.image)),
            Line::from(""),
            Line::from(card.summary),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to view episodes",
                Style::default().fg(Color::DarkGray),
            )),
        ],
        None => vec![Line::from("No shows to display.")],
    };

    let details_widget = Paragraph::new(details)
        .block(Block::default().borders(Borders::ALL).title("Details"))
        .wrap(Wrap { trim: true });

    frame.render_widget(details_widget, details_area);
}

fn draw_episodes(frame: &mut Frame, app: &mut App, list_area: Rect, details_area: Rect) {
    let (items, selected) = match app.session.visible_episodes() {
        Ok(episodes) => {
            let items: Vec<ListItem> = episodes
                .iter()
                .map(|e| ListItem::new(e.to_display()))
                .collect();
            let selected = app
                .episode_list_state
                .selected()
                .and_then(|i| episodes.get(i))
                .map(|e| EpisodeCard::new(e, app.summary_mode));
            (items, selected)
        }
        Err(_) => (Vec::new(), None),
    };

    let title = match app.session.current_show() {
        Some(show) => format!("{} episodes", show.name),
        None => "Episodes".to_string(),
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(highlight())
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, list_area, &mut app.episode_list_state);

    let details = match selected {
        Some(card) => vec![
            Line::from(Span::styled(
                card.heading,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("Image: {}", card.image)),
            Line::from(""),
            Line::from(card.summary),
            Line::from(""),
            Line::from(Span::styled(card.link, Style::default().fg(Color::Blue))),
        ],
        None => vec![Line::from("No episodes to display.")],
    };

    let details_widget = Paragraph::new(details)
        .block(Block::default().borders(Borders::ALL).title("Info"))
        .wrap(Wrap { trim: true });

    frame.render_widget(details_widget, details_area);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let style = match app.session.status() {
        Status::Loading(_) => Style::default().fg(Color::Yellow),
        Status::Error(_) => Style::default().fg(Color::Red),
        Status::Info(_) | Status::Idle => Style::default().fg(Color::Green),
    };

    frame.render_widget(
        Paragraph::new(format!(" {}", app.session.status_message())).style(style),
        area,
    );
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = if app.filter_active {
        "[Enter/Esc] done  [Bksp] delete"
    } else {
        match app.session.view() {
            View::ShowsListing => "[↑↓] navigate  [Enter] episodes  [/] search  [s] pick show  [?] help  [q] quit",
            View::EpisodesListing => "[↑↓] navigate  [/] search  [e] pick episode  [s] pick show  [Esc] back  [?] help  [q] quit",
        }
    };

    let footer = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

fn draw_picker(frame: &mut Frame, app: &mut App, title: &str) {
    let area = centered_rect(50, 60, frame.area());
    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = app.picker_labels().into_iter().map(ListItem::new).collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(highlight())
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.picker_state);
}

fn draw_help_modal(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let (title, content) = get_help_content(app);

    let help_text = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Help - {}", title))
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help_text, area);
}

fn get_help_content(app: &App) -> (&'static str, String) {
    let global_keys = "\
Global Commands
───────────────
  ?           Show/hide this help
  Ctrl+C      Force quit
  /           Filter the current list
  s           Pick a show
  q           Quit

";

    let navigation_keys = "\
Navigation
──────────
  j / ↓       Move down
  k / ↑       Move up
  Enter       Select item

";

    let episode_keys = "\
Episodes
────────
  e           Pick a single episode
  Enter       Show only the highlighted episode
  Esc         Widen the list, then back to shows

";

    match app.session.view() {
        View::ShowsListing => (
            "Shows",
            format!("{}{}Press ? to close", global_keys, navigation_keys),
        ),
        View::EpisodesListing => (
            "Episodes",
            format!(
                "{}{}{}Press ? to close",
                global_keys, navigation_keys, episode_keys
            ),
        ),
    }
}

/// Helper function to create a centered rect.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
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
