// TUI application state and key handling
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use repodash_core::{Dashboard, FetchError, FetchTicket, Repository};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,          // Browsing cards and pages
    EditingUsername, // Typing in the username box
    Filtering,       // Typing in the filter box
}

/// Side effects a key press asks the runner to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Fetch(FetchTicket),
    OpenUrl(String),
}

pub struct App {
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub username_input: String,
    pub dashboard: Dashboard,
    /// Index of the highlighted card within the current page
    pub selected_index: usize,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            username_input: username.into(),
            dashboard: Dashboard::new(),
            selected_index: 0,
            status_message: None,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn enter_username_mode(&mut self) {
        self.input_mode = InputMode::EditingUsername;
    }

    /// The filter box only exists once something has loaded
    pub fn enter_filter_mode(&mut self) -> bool {
        if self.dashboard.has_repositories() {
            self.input_mode = InputMode::Filtering;
            true
        } else {
            false
        }
    }

    /// Start a search for whatever is in the username box
    pub fn submit_username(&mut self) -> Option<Action> {
        self.status_message = None;
        self.selected_index = 0;
        match self.dashboard.begin_fetch(&self.username_input) {
            Ok(ticket) => {
                self.enter_normal_mode();
                Some(Action::Fetch(ticket))
            }
            // the dashboard already holds the error for display
            Err(_) => None,
        }
    }

    /// Fetch the last successfully loaded user again
    pub fn reload(&mut self) -> Option<Action> {
        if let Some(user) = self.dashboard.search().last_completed.clone() {
            self.username_input = user;
        }
        self.submit_username()
    }

    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Repository>, FetchError>,
    ) -> bool {
        let applied = self.dashboard.finish_fetch(ticket, result);
        if applied {
            self.selected_index = 0;
        }
        applied
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.dashboard.push_filter_char(c);
        self.selected_index = 0;
    }

    pub fn pop_filter_char(&mut self) {
        self.dashboard.pop_filter_char();
        self.selected_index = 0;
    }

    pub fn clear_filter(&mut self) {
        self.dashboard.set_filter_term("");
        self.selected_index = 0;
    }

    pub fn next_page(&mut self) {
        if self.dashboard.next_page() {
            self.selected_index = 0;
        }
    }

    pub fn previous_page(&mut self) {
        if self.dashboard.previous_page() {
            self.selected_index = 0;
        }
    }

    pub fn next_item(&mut self) {
        let count = self.dashboard.current_page().items.len();
        if count > 0 {
            self.selected_index = (self.selected_index + 1).min(count - 1);
        }
    }

    pub fn previous_item(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn selected_repository(&self) -> Option<&Repository> {
        self.dashboard
            .current_page()
            .items
            .get(self.selected_index)
            .copied()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return None;
        }

        match self.input_mode {
            InputMode::EditingUsername => match key.code {
                KeyCode::Enter => return self.submit_username(),
                KeyCode::Char(c) => self.username_input.push(c),
                KeyCode::Backspace => {
                    self.username_input.pop();
                }
                KeyCode::Esc => self.enter_normal_mode(),
                _ => {}
            },
            InputMode::Filtering => match key.code {
                KeyCode::Enter | KeyCode::Esc => self.enter_normal_mode(),
                KeyCode::Char(c) => self.push_filter_char(c),
                KeyCode::Backspace => self.pop_filter_char(),
                KeyCode::Delete => self.clear_filter(),
                _ => {}
            },
            InputMode::Normal => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.quit(),
                KeyCode::Char('/') | KeyCode::Char('u') => self.enter_username_mode(),
                KeyCode::Char('f') => {
                    if !self.enter_filter_mode() {
                        self.status_message = Some("Nothing to filter yet".to_string());
                    }
                }
                KeyCode::Char('r') => return self.reload(),
                KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => self.next_page(),
                KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => self.previous_page(),
                KeyCode::Char('j') | KeyCode::Down => self.next_item(),
                KeyCode::Char('k') | KeyCode::Up => self.previous_item(),
                KeyCode::Enter => {
                    return self
                        .selected_repository()
                        .map(|repo| Action::OpenUrl(repo.url.clone()));
                }
                _ => {}
            },
        }

        None
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn repo(id: u64) -> Repository {
        Repository {
            id,
            name: format!("repo-{}", id),
            description: None,
            language: None,
            stars: 0,
            forks: 0,
            updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            url: format!("https://github.com/google/repo-{}", id),
            is_fork: false,
        }
    }

    fn press(app: &mut App, code: KeyCode) -> Option<Action> {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn loaded_app(count: u64) -> App {
        let mut app = App::new("google");
        let Some(Action::Fetch(ticket)) = app.submit_username() else {
            panic!("expected a fetch");
        };
        app.apply_fetch(ticket, Ok((1..=count).map(repo).collect()));
        app
    }

    #[test]
    fn test_submit_username_starts_fetch() {
        let mut app = App::new("");
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.input_mode, InputMode::EditingUsername);

        type_str(&mut app, "octocat");
        let action = press(&mut app, KeyCode::Enter);

        match action {
            Some(Action::Fetch(ticket)) => assert_eq!(ticket.username(), "octocat"),
            other => panic!("expected fetch, got {:?}", other),
        }
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.dashboard.is_loading());
    }

    #[test]
    fn test_blank_username_does_not_fetch() {
        let mut app = App::new("   ");
        press(&mut app, KeyCode::Char('u'));
        assert_eq!(press(&mut app, KeyCode::Enter), None);
        assert_eq!(app.dashboard.error(), Some(&FetchError::EmptyInput));
        assert_eq!(app.input_mode, InputMode::EditingUsername);
    }

    #[test]
    fn test_filter_mode_needs_results() {
        let mut app = App::new("google");
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.status_message.is_some());

        let mut app = loaded_app(3);
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.input_mode, InputMode::Filtering);
    }

    #[test]
    fn test_typing_filter_narrows_and_resets_page() {
        let mut app = loaded_app(13);
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.dashboard.current_page_number(), 2);
        assert_eq!(app.selected_index, 1);

        press(&mut app, KeyCode::Char('f'));
        type_str(&mut app, "repo-1");
        assert_eq!(app.dashboard.filtered_len(), 5);
        assert_eq!(app.dashboard.current_page_number(), 1);
        assert_eq!(app.selected_index, 0);

        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.dashboard.filter_term(), "repo");
        assert_eq!(app.dashboard.filtered_len(), 13);

        press(&mut app, KeyCode::Delete);
        assert_eq!(app.dashboard.filter_term(), "");
    }

    #[test]
    fn test_page_keys_respect_bounds() {
        let mut app = loaded_app(13);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.dashboard.current_page_number(), 1);

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.dashboard.current_page_number(), 3);

        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.dashboard.current_page_number(), 2);
    }

    #[test]
    fn test_item_selection_clamped_to_page() {
        let mut app = loaded_app(13);
        for _ in 0..10 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.selected_index, 5);

        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.selected_repository().map(|r| r.id), Some(13));

        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_enter_opens_selected_repo() {
        let mut app = loaded_app(3);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(
            press(&mut app, KeyCode::Enter),
            Some(Action::OpenUrl("https://github.com/google/repo-2".into()))
        );
    }

    #[test]
    fn test_reload_uses_last_completed_user() {
        let mut app = loaded_app(3);
        app.username_input = "half-typed".to_string();

        match press(&mut app, KeyCode::Char('r')) {
            Some(Action::Fetch(ticket)) => assert_eq!(ticket.username(), "google"),
            other => panic!("expected fetch, got {:?}", other),
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new("google");
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = App::new("google");
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_typing_q_in_username_box_does_not_quit() {
        let mut app = App::new("");
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "q");
        assert!(!app.should_quit);
        assert_eq!(app.username_input, "q");
    }
}
