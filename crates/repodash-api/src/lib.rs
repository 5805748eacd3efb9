// API client for the repository host
pub mod github;

pub use github::{GitHubClient, GitHubError, GitHubRepo, GITHUB_API_BASE, MAX_PER_PAGE};
