// UI rendering logic
use crate::{App, InputMode};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use repodash_core::{language_color, Content, PageView, Repository};

const MUTED: Color = Color::Rgb(156, 134, 119);
const ACCENT: Color = Color::Rgb(134, 103, 83);

pub fn render(frame: &mut Frame, app: &App) {
    let dashboard = &app.dashboard;
    let content = dashboard.content();

    let show_filter = dashboard.has_repositories();
    let show_banner = dashboard.error().is_some() || dashboard.notice().is_some();
    let show_pagination = matches!(&content, Content::Page(page) if page.has_controls())
        && !dashboard.is_loading();

    let mut constraints = vec![
        Constraint::Length(3), // Header
        Constraint::Length(3), // Username input
    ];
    if show_filter {
        constraints.push(Constraint::Length(3));
    }
    if show_banner {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(5)); // Cards
    if show_pagination {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(1)); // Status bar

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    let mut next = 0;
    let mut take = || {
        let area = chunks[next];
        next += 1;
        area
    };

    render_header(frame, app, take());
    render_username_input(frame, app, take());
    if show_filter {
        render_filter_input(frame, app, take());
    }
    if show_banner {
        render_banner(frame, app, take());
    }

    let content_area = take();
    match &content {
        Content::Loading { username } => render_loading(frame, username, content_area),
        Content::NoMatches { term } => render_no_matches(frame, term, content_area),
        Content::Empty => render_empty(frame, content_area),
        Content::Page(page) => render_cards(frame, app, page, content_area),
    }

    if show_pagination {
        if let Content::Page(page) = &content {
            render_pagination(frame, page, take());
        }
    }

    render_status_bar(frame, app, take());
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let search = app.dashboard.search();

    let target = if let Some(pending) = &search.pending {
        Span::styled(
            format!("Loading {}...", pending),
            Style::default().fg(Color::Cyan),
        )
    } else if let Some(user) = &search.last_completed {
        Span::styled(
            format!("Showing {} ({} repositories)", user, app.dashboard.repositories().len()),
            Style::default().fg(MUTED),
        )
    } else {
        Span::raw("")
    };

    let line = Line::from(vec![
        Span::styled(
            "GitHub Repo Dashboard",
            Style::default().fg(Color::White).bg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        target,
    ]);

    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_username_input(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.input_mode == InputMode::EditingUsername;
    let style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let input = Paragraph::new(app.username_input.as_str())
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" GitHub username (/ to edit, ENTER to load) ")
                .border_style(style),
        );
    frame.render_widget(input, area);

    if editing {
        frame.set_cursor_position((
            area.x + app.username_input.chars().count() as u16 + 1,
            area.y + 1,
        ));
    }
}

fn render_filter_input(frame: &mut Frame, app: &App, area: Rect) {
    let filtering = app.input_mode == InputMode::Filtering;
    let style = if filtering {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let term = app.dashboard.filter_term();
    let text = if term.is_empty() && !filtering {
        Span::styled("Type f to filter by name or description...", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(term)
    };

    let title = format!(
        " Filter ({} of {}) ",
        app.dashboard.filtered_len(),
        app.dashboard.repositories().len()
    );

    let input = Paragraph::new(Line::from(text)).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(style),
    );
    frame.render_widget(input, area);

    if filtering {
        frame.set_cursor_position((area.x + term.chars().count() as u16 + 1, area.y + 1));
    }
}

fn render_banner(frame: &mut Frame, app: &App, area: Rect) {
    let (text, color) = if let Some(error) = app.dashboard.error() {
        (format!("⚠ {}", error), Color::Red)
    } else if let Some(notice) = app.dashboard.notice() {
        (format!("ℹ {}", notice), Color::Cyan)
    } else {
        return;
    };

    let banner = Paragraph::new(Span::styled(text, Style::default().fg(color)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(banner, area);
}

fn render_loading(frame: &mut Frame, username: &str, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("🚀 Loading repositories for {}...", username),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" Repositories "))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_no_matches(frame: &mut Frame, term: &str, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("No repositories match \"{}\".", term),
            Style::default().fg(MUTED),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" Repositories "))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new("")
        .block(Block::default().borders(Borders::ALL).title(" Repositories "));
    frame.render_widget(paragraph, area);
}

/// Columns that fit comfortably at this width
fn grid_columns(width: u16) -> usize {
    if width >= 120 {
        3
    } else if width >= 70 {
        2
    } else {
        1
    }
}

fn render_cards(frame: &mut Frame, app: &App, page: &PageView<'_>, area: Rect) {
    let columns = grid_columns(area.width);
    let rows = page.items.len().div_ceil(columns).max(1);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    for (row, row_area) in row_areas.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row_area);

        for (col, cell) in cells.iter().enumerate() {
            let index = row * columns + col;
            if let Some(repo) = page.items.get(index) {
                render_card(frame, repo, index == app.selected_index, *cell);
            }
        }
    }
}

fn render_card(frame: &mut Frame, repo: &Repository, selected: bool, area: Rect) {
    let border_style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title_style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    };

    let mut meta = Vec::new();
    if let Some(language) = &repo.language {
        let dot = language_color(language);
        meta.push(Span::styled("● ", Style::default().fg(Color::Rgb(dot.r, dot.g, dot.b))));
        meta.push(Span::styled(language.as_str(), Style::default().fg(MUTED)));
        meta.push(Span::raw("   "));
    }
    meta.push(Span::styled(
        format!("⭐ {}", repo.stars),
        Style::default().fg(Color::Rgb(255, 215, 0)),
    ));
    meta.push(Span::raw("   "));
    meta.push(Span::styled(
        format!("Forks: {}", repo.forks),
        Style::default().fg(Color::Rgb(100, 149, 237)),
    ));

    let lines = vec![
        Line::from(Span::styled(repo.description_or_default(), Style::default().fg(MUTED))),
        Line::from(""),
        Line::from(meta),
        Line::from(Span::styled(
            format!("Updated {}", repo.updated_date()),
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Right),
    ];

    let card = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(Span::styled(format!(" {} ", repo.name), title_style)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(card, area);
}

fn render_pagination(frame: &mut Frame, page: &PageView<'_>, area: Rect) {
    let enabled = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
    let disabled = Style::default().fg(Color::DarkGray);

    let line = Line::from(vec![
        Span::styled(
            "◀ Prev",
            if page.has_previous() { enabled } else { disabled },
        ),
        Span::raw("   "),
        Span::styled(
            format!("Page {} of {}", page.number, page.total_pages),
            Style::default().fg(MUTED),
        ),
        Span::raw("   "),
        Span::styled("Next ▶", if page.has_next() { enabled } else { disabled }),
    ]);

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = if let Some(message) = &app.status_message {
        Span::styled(message.as_str(), Style::default().fg(Color::Yellow))
    } else {
        match app.input_mode {
            InputMode::EditingUsername => Span::styled(
                "USERNAME | Type a GitHub user | ENTER: load | ESC: cancel",
                Style::default().fg(Color::Yellow),
            ),
            InputMode::Filtering => Span::styled(
                "FILTER | Type to narrow results | DEL: clear | ENTER/ESC: done",
                Style::default().fg(Color::Yellow),
            ),
            InputMode::Normal => Span::raw(
                "/: user | f: filter | n/p: page | j/k: select | ENTER: open | r: reload | q: quit",
            ),
        }
    };

    frame.render_widget(Paragraph::new(Line::from(status)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Action;
    use chrono::{TimeZone, Utc};
    use ratatui::{backend::TestBackend, Terminal};
    use repodash_core::FetchError;

    fn repo(id: u64, language: Option<&str>) -> Repository {
        Repository {
            id,
            name: format!("project-{}", id),
            description: Some(format!("Description {}", id)),
            language: language.map(str::to_string),
            stars: 42,
            forks: 7,
            updated_at: Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
            url: format!("https://github.com/google/project-{}", id),
            is_fork: false,
        }
    }

    fn loaded_app(count: u64) -> App {
        let mut app = App::new("google");
        let Some(Action::Fetch(ticket)) = app.submit_username() else {
            panic!("expected a fetch");
        };
        app.apply_fetch(ticket, Ok((1..=count).map(|i| repo(i, Some("Go"))).collect()));
        app
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(130, 40)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_grid_columns() {
        assert_eq!(grid_columns(40), 1);
        assert_eq!(grid_columns(80), 2);
        assert_eq!(grid_columns(150), 3);
    }

    #[test]
    fn test_renders_first_page_and_pagination() {
        let app = loaded_app(13);
        let screen = draw(&app);

        assert!(screen.contains("project-1"));
        assert!(screen.contains("project-6"));
        assert!(!screen.contains("project-7 "));
        assert!(screen.contains("Page 1 of 3"));
        assert!(screen.contains("Forks: 7"));
        assert!(screen.contains("Showing google (13 repositories)"));
    }

    #[test]
    fn test_single_page_hides_pagination() {
        let app = loaded_app(4);
        let screen = draw(&app);
        assert!(screen.contains("project-4"));
        assert!(!screen.contains("Page 1 of 1"));
    }

    #[test]
    fn test_loading_state() {
        let mut app = App::new("rust-lang");
        app.submit_username();
        let screen = draw(&app);
        assert!(screen.contains("Loading repositories for rust-lang..."));
        assert!(!screen.contains("Filter ("));
    }

    #[test]
    fn test_error_banner() {
        let mut app = App::new("this-user-does-not-exist-xyz");
        let Some(Action::Fetch(ticket)) = app.submit_username() else {
            panic!("expected a fetch");
        };
        app.apply_fetch(
            ticket,
            Err(FetchError::UserNotFound("this-user-does-not-exist-xyz".into())),
        );

        let screen = draw(&app);
        assert!(screen.contains("GitHub user not found"));
        assert!(!screen.contains("Loading"));
    }

    #[test]
    fn test_no_matches_message() {
        let mut app = loaded_app(3);
        app.dashboard.set_filter_term("zzz-no-match");
        let screen = draw(&app);
        assert!(screen.contains("No repositories match \"zzz-no-match\"."));
        assert!(screen.contains("Filter (0 of 3)"));
    }

    #[test]
    fn test_empty_account_notice() {
        let mut app = App::new("empty-user");
        let Some(Action::Fetch(ticket)) = app.submit_username() else {
            panic!("expected a fetch");
        };
        app.apply_fetch(ticket, Ok(Vec::new()));

        let screen = draw(&app);
        assert!(screen.contains("empty-user has no public original repositories."));
    }

    #[test]
    fn test_missing_description_placeholder() {
        let mut app = App::new("google");
        let Some(Action::Fetch(ticket)) = app.submit_username() else {
            panic!("expected a fetch");
        };
        let mut bare = repo(1, None);
        bare.description = None;
        app.apply_fetch(ticket, Ok(vec![bare]));

        let screen = draw(&app);
        assert!(screen.contains("No description"));
    }
}
