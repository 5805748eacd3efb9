use thiserror::Error;

/// Things that go wrong outside of fetching: config files, IO
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Why a repository fetch ended without a list.
///
/// Every variant is terminal for that fetch. The Display text is what the
/// user sees in the error banner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Please enter a GitHub username")]
    EmptyInput,

    #[error("GitHub user not found: \"{0}\"")]
    UserNotFound(String),

    #[error("GitHub API rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Failed to load repositories: HTTP {}", status_text(.0))]
    HttpError(u16),

    #[error("Connection error, could not fetch repositories: {0}")]
    TransportError(String),
}

fn status_text(status: &u16) -> String {
    match reqwest::StatusCode::from_u16(*status)
        .ok()
        .and_then(|s| s.canonical_reason())
    {
        Some(reason) => format!("{} {}", status, reason),
        None => status.to_string(),
    }
}
