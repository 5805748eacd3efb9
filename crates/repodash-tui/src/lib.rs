// Terminal UI implementation using ratatui

pub mod app;
pub mod runner;
pub mod ui;

pub use app::{Action, App, InputMode};
pub use runner::run_tui;
