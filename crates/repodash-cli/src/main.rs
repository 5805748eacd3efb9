use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};

use anyhow::Context;
use clap::Parser;
use repodash_core::{
    paginate, Config, Content, Dashboard, GitHubProvider, Repository, RepositoryFetcher, PAGE_SIZE,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "repodash")]
#[command(version, about = "Terminal dashboard for a GitHub user's repositories", long_about = None)]
struct Cli {
    /// GitHub user to load on start (defaults to ui.default_username)
    #[arg(short, long, env = "REPODASH_USER")]
    user: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print one page of a user's repositories and exit
    List {
        /// GitHub username
        username: String,

        /// Only show repositories whose name or description contains this
        #[arg(short, long)]
        filter: Option<String>,

        /// Page to print, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal, so its logs go to a file
    let log_file = match cli.command {
        None => log_file_path(),
        Some(_) => None,
    };
    init_logging(log_file);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let fetcher = RepositoryFetcher::new(Box::new(GitHubProvider::new(&config.github)?));

    match cli.command {
        Some(Commands::List {
            username,
            filter,
            page,
            json,
        }) => list(&fetcher, &username, filter, page, json).await,
        None => {
            let username = cli.user.unwrap_or(config.ui.default_username);
            tracing::info!("Starting dashboard for {}", username);
            repodash_tui::run_tui(repodash_tui::App::new(username), fetcher).await
        }
    }
}

fn init_logging(log_file: Option<PathBuf>) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "repodash=info".into());

    let registry = tracing_subscriber::registry().with(filter);

    match log_file.and_then(|path| OpenOptions::new().create(true).append(true).open(path).ok()) {
        Some(file) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init(),
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

/// `<cache dir>/repodash/repodash.log`, creating the directory if needed
fn log_file_path() -> Option<PathBuf> {
    let dir = dirs::cache_dir()?.join("repodash");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join("repodash.log"))
}

async fn list(
    fetcher: &RepositoryFetcher,
    username: &str,
    filter: Option<String>,
    page: usize,
    json: bool,
) -> anyhow::Result<()> {
    let mut dashboard = Dashboard::new();
    let ticket = dashboard.begin_fetch(username)?;
    let result = fetcher.fetch(ticket.username()).await;
    dashboard.finish_fetch(ticket, result);

    print!("{}", render_listing(&mut dashboard, filter, page, json)?);
    Ok(())
}

/// Text for `repodash list` once the fetch has been applied to `dashboard`
fn render_listing(
    dashboard: &mut Dashboard,
    filter: Option<String>,
    page: usize,
    json: bool,
) -> anyhow::Result<String> {
    if let Some(err) = dashboard.error() {
        anyhow::bail!("{}", err);
    }
    if let Some(notice) = dashboard.notice() {
        return Ok(format!("{}\n", notice));
    }

    if let Some(term) = filter {
        dashboard.set_filter_term(term);
    }
    if let Content::NoMatches { term } = dashboard.content() {
        return Ok(format!("No repositories match \"{}\".\n", term));
    }

    let filtered = dashboard.filtered();
    let page = paginate(&filtered, page, PAGE_SIZE);

    if json {
        let out = serde_json::to_string_pretty(page.items).context("Failed to encode page")?;
        return Ok(format!("{}\n", out));
    }

    let mut out = String::new();
    for repo in page.items {
        write_repository(&mut out, repo);
    }
    out.push_str(&format!("Page {} of {}\n", page.number, page.total_pages));

    Ok(out)
}

fn write_repository(out: &mut String, repo: &Repository) {
    let language = repo.language.as_deref().unwrap_or("-");
    out.push_str(&format!(
        "{}  ⭐ {}  Forks: {}  [{}]  updated {}\n",
        repo.name,
        repo.stars,
        repo.forks,
        language,
        repo.updated_date()
    ));
    out.push_str(&format!("    {}\n", repo.description_or_default()));
    out.push_str(&format!("    {}\n", repo.url));
}
