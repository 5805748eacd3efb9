use chrono::{DateTime, Utc};
use reqwest::{header, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Largest page the provider will hand out in one response
pub const MAX_PER_PAGE: u32 = 100;

const DEFAULT_USER_AGENT: &str = concat!("repodash/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("API request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, GitHubError>;

/// Error payload GitHub sends with non-2xx responses
#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(GITHUB_API_BASE, DEFAULT_USER_AGENT)
    }

    /// For GitHub Enterprise, or a local server in tests
    pub fn with_base_url(base_url: &str, user_agent: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List a user's public repositories, most recently updated first.
    ///
    /// Asks for the largest page the API allows so a single round trip
    /// covers nearly every account. Forks are included; callers decide
    /// what to drop.
    pub async fn list_user_repos(&self, username: &str) -> Result<Vec<GitHubRepo>> {
        let url = format!(
            "{}/users/{}/repos",
            self.base_url,
            urlencoding::encode(username)
        );
        let per_page = MAX_PER_PAGE.to_string();
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("sort", "updated"), ("per_page", per_page.as_str())])
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(GitHubError::NotFound(username.to_string()));
        }

        if status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            warn!("GitHub refused request for {}: {}", username, api_message(&body));
            return Err(GitHubError::RateLimitExceeded);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GitHubError::RequestFailed {
                status: status.as_u16(),
                message: api_message(&body),
            });
        }

        let repos: Vec<GitHubRepo> = response.json().await?;
        debug!("Received {} repositories for {}", repos.len(), username);
        Ok(repos)
    }
}

/// Pull `message` out of an error body, falling back to the raw text
fn api_message(body: &str) -> String {
    serde_json::from_str::<ApiMessage>(body)
        .map(|m| m.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    pub updated_at: DateTime<Utc>,
    pub html_url: String,
    #[serde(default)]
    pub fork: bool,
}
