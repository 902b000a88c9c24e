mod cli;
mod interactive;
mod logging;
mod view;

use clap::Parser;
use marquee_api::{ApiKey, OmdbClient};
use marquee_core::config::AppConfig;
use marquee_core::route::Route;
use marquee_core::search::SearchDefaults;
use marquee_core::session::Session;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_dir = cli.log_dir.clone().unwrap_or_else(logging::default_log_dir);
    let _log_guard = match logging::init_logging(&log_dir, cli.verbose) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: failed to initialize logging: {e}");
            None
        }
    };

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    let client = OmdbClient::with_options(
        ApiKey::from_env()?,
        config.provider.base_url()?,
        config.provider.timeout(),
    )?;
    tracing::info!(base_url = %client.base_url(), "OMDb client ready");

    match cli.command {
        None => interactive::run(client, &config).await,
        Some(Command::Search {
            query,
            genre,
            pages,
        }) => search(&client, &config, query, genre, pages).await,
        Some(Command::Show { id }) => show(&client, &config, id).await,
    }
}

async fn search(
    client: &OmdbClient,
    config: &AppConfig,
    query: Option<String>,
    genre: Option<String>,
    pages: u32,
) -> anyhow::Result<()> {
    let mut session = Session::new(SearchDefaults::from(&config.provider));
    let mut pending = session.refresh();
    if let Some(query) = query {
        pending = session.set_query(query).unwrap_or(pending);
    }
    if let Some(genre) = genre {
        pending = session.set_genre(genre).unwrap_or(pending);
    }
    session.run(client, pending).await;

    for _ in 1..pages {
        let has_error = session
            .search()
            .is_some_and(|s| s.state().error_message.is_some());
        if has_error {
            break;
        }
        if let Some(next) = session.load_next_page() {
            session.run(client, next).await;
        }
    }

    print!("{}", interactive::render_screen(&session));
    match session.search() {
        Some(search) if search.results().is_empty() => {
            if let Some(error) = &search.state().error_message {
                anyhow::bail!("{error}");
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

async fn show(client: &OmdbClient, config: &AppConfig, id: String) -> anyhow::Result<()> {
    let mut session = Session::new(SearchDefaults::from(&config.provider));
    if let Some(pending) = session.navigate(Route::Movie(id)) {
        session.run(client, pending).await;
    }

    print!("{}", interactive::render_screen(&session));
    if let Some(error) = session.detail().and_then(|d| d.error_message()) {
        anyhow::bail!("{error}");
    }
    Ok(())
}
