// Core business logic: fetch, filter, paginate, and the state that ties them together
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod languages;
pub mod models;
pub mod pagination;
pub mod providers;

pub use config::Config;
pub use dashboard::{Content, Dashboard, FetchTicket, PageView, SearchState};
pub use error::{Error, FetchError};
pub use fetcher::{RepositoryFetcher, RepositorySource};
pub use filter::filter_repositories;
pub use languages::{language_color, Color};
pub use models::Repository;
pub use pagination::{paginate, total_pages, Page, PageState, PAGE_SIZE};
pub use providers::GitHubProvider;

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
