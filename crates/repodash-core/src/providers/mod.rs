// Provider implementations for repository hosts
pub mod github;

pub use github::GitHubProvider;
