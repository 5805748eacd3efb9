// GitHub provider - bridges the API client with the RepositorySource trait
use async_trait::async_trait;
use repodash_api::{GitHubClient, GitHubError, GitHubRepo};

use crate::{
    config::GitHubConfig, error::FetchError, fetcher::RepositorySource, models::Repository,
    Error, Result,
};

/// Wrapper around GitHubClient that implements RepositorySource
pub struct GitHubProvider {
    client: GitHubClient,
}

impl GitHubProvider {
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let client = GitHubClient::with_base_url(&config.api_url, &config.user_agent)
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RepositorySource for GitHubProvider {
    async fn list_repositories(
        &self,
        username: &str,
    ) -> std::result::Result<Vec<Repository>, FetchError> {
        let repos = self.client.list_user_repos(username).await?;
        Ok(repos.into_iter().map(github_to_repo).collect())
    }
}

impl From<GitHubError> for FetchError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::NotFound(user) => FetchError::UserNotFound(user),
            GitHubError::RateLimitExceeded => FetchError::RateLimited,
            GitHubError::RequestFailed { status, .. } => FetchError::HttpError(status),
            GitHubError::NetworkError(e) => FetchError::TransportError(e.to_string()),
        }
    }
}

/// Convert GitHub API repo to our internal Repository model
fn github_to_repo(gh: GitHubRepo) -> Repository {
    Repository {
        id: gh.id,
        name: gh.name,
        description: gh.description,
        language: gh.language,
        stars: gh.stargazers_count,
        forks: gh.forks_count,
        updated_at: gh.updated_at,
        url: gh.html_url,
        is_fork: gh.fork,
    }
}
