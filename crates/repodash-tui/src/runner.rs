// TUI event loop and terminal management
use crate::{app::Action, App};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use repodash_core::{FetchError, FetchTicket, Repository, RepositoryFetcher};
use std::{io, sync::Arc, time::Duration};
use tokio::sync::mpsc;

/// How long to wait for a key before checking on background fetches
const TICK: Duration = Duration::from_millis(100);

type FetchResult = (FetchTicket, Result<Vec<Repository>, FetchError>);

/// Run the dashboard until the user quits.
///
/// Starts by loading whatever username `app` was created with.
pub async fn run_tui(mut app: App, fetcher: RepositoryFetcher) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, Arc::new(fetcher)).await;

    // Restore terminal even if the loop bailed out
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    fetcher: Arc<RepositoryFetcher>,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchResult>();

    if let Some(action) = app.submit_username() {
        perform(app, action, &fetcher, &tx);
    }

    loop {
        while let Ok((ticket, result)) = rx.try_recv() {
            app.apply_fetch(ticket, result);
        }

        terminal.draw(|f| crate::ui::render(f, &*app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = app.handle_key(key) {
                        perform(app, action, &fetcher, &tx);
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn perform(
    app: &mut App,
    action: Action,
    fetcher: &Arc<RepositoryFetcher>,
    tx: &mpsc::UnboundedSender<FetchResult>,
) {
    match action {
        Action::Fetch(ticket) => spawn_fetch(ticket, Arc::clone(fetcher), tx.clone()),
        Action::OpenUrl(url) => {
            tracing::debug!("Opening {}", url);
            if let Err(e) = open::that(&url) {
                app.status_message = Some(format!("Failed to open browser: {}", e));
            }
        }
    }
}

/// Fetch in the background and report back through `tx`.
///
/// Nothing is cancelled; if a newer search starts first, the dashboard
/// drops this result when it arrives.
fn spawn_fetch(
    ticket: FetchTicket,
    fetcher: Arc<RepositoryFetcher>,
    tx: mpsc::UnboundedSender<FetchResult>,
) {
    tokio::spawn(async move {
        let result = fetcher.fetch(ticket.username()).await;
        if tx.send((ticket, result)).is_err() {
            tracing::debug!("Dashboard closed before fetch finished");
        }
    });
}
