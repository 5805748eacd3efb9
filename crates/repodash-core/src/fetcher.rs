use crate::{error::FetchError, models::Repository};
use tracing::{debug, info};

/// Anything that can list a user's repositories.
///
/// GitHub is the only real implementation; tests swap in a mock so the
/// fetch rules can be checked without a network.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RepositorySource: Send + Sync {
    /// All repositories for `username`, forks included, in provider order
    async fn list_repositories(&self, username: &str) -> Result<Vec<Repository>, FetchError>;
}

/// Runs one search: validates the username, asks the source, drops forks
pub struct RepositoryFetcher {
    source: Box<dyn RepositorySource>,
}

impl RepositoryFetcher {
    pub fn new(source: Box<dyn RepositorySource>) -> Self {
        Self { source }
    }

    /// Fetch the non-fork repositories for `username`.
    ///
    /// Whitespace around the name is ignored. A blank name fails with
    /// `EmptyInput` before any request goes out.
    pub async fn fetch(&self, username: &str) -> Result<Vec<Repository>, FetchError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(FetchError::EmptyInput);
        }

        info!("Fetching repositories for {}", username);

        let repos = self.source.list_repositories(username).await?;

        let total = repos.len();
        let originals: Vec<Repository> = repos.into_iter().filter(|r| !r.is_fork).collect();
        debug!(
            "{}: {} repositories, {} forks dropped",
            username,
            total,
            total - originals.len()
        );

        Ok(originals)
    }
}
