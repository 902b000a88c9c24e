//! Line-oriented interactive session.
//!
//! Input and provider responses are multiplexed on one task: a command that
//! triggers a fetch spawns it and returns immediately, and results are applied
//! to the session as they arrive. Responses the session no longer wants are
//! dropped by the session itself.

use std::sync::Arc;

use marquee_api::MovieProvider;
use marquee_core::config::AppConfig;
use marquee_core::route::Route;
use marquee_core::search::SearchDefaults;
use marquee_core::session::{Fetched, Pending, Session};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

use crate::view;

const HELP: &str = "\
Commands:
  search <text>    search titles (empty text shows featured titles)
  genre <name>     filter by genre, `genre all` to clear
  more             load the next page
  open <n>         show result n, or watchlist entry w<n>
  fav [n]          toggle result n in the watchlist (no n: the open title)
  watchlist        list the watchlist
  back             return to the search screen
  retry            reload the current screen
  help             show this help
  quit             exit";

/// Where `open` points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Result(usize),
    Watchlist(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Genre(String),
    More,
    Open(Target),
    Fav(Option<usize>),
    Watchlist,
    Back,
    Retry,
    Help,
    Quit,
}

fn parse_index(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("not a list number: {arg}")),
    }
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        match word {
            "search" | "s" => Ok(Self::Search(rest.to_string())),
            "genre" | "g" => match rest {
                "" => Err("usage: genre <name|all>".into()),
                "all" => Ok(Self::Genre(String::new())),
                name => Ok(Self::Genre(name.to_string())),
            },
            "more" | "m" => Ok(Self::More),
            "open" | "o" => match rest.strip_prefix('w') {
                Some(n) => parse_index(n).map(|n| Self::Open(Target::Watchlist(n))),
                None => parse_index(rest).map(|n| Self::Open(Target::Result(n))),
            },
            "fav" | "f" if rest.is_empty() => Ok(Self::Fav(None)),
            "fav" | "f" => parse_index(rest).map(|n| Self::Fav(Some(n))),
            "watchlist" | "w" => Ok(Self::Watchlist),
            "back" | "b" => Ok(Self::Back),
            "retry" | "r" => Ok(Self::Retry),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            "" => Err(String::new()),
            other => Err(format!("unknown command: {other} (try `help`)")),
        }
    }
}

/// What the loop should do after a command.
#[derive(Debug, Default)]
pub struct Reaction {
    pub pending: Option<Pending>,
    pub output: Option<String>,
}

impl Reaction {
    fn fetch(pending: Option<Pending>) -> Self {
        Self {
            pending,
            output: None,
        }
    }

    fn say(output: impl Into<String>) -> Self {
        Self {
            pending: None,
            output: Some(output.into()),
        }
    }
}

/// Render whichever screen is mounted.
pub fn render_screen(session: &Session) -> String {
    match (session.search(), session.detail()) {
        (Some(search), _) => view::render_results(search, session.watchlist()),
        (None, Some(detail)) => view::render_detail(detail, session.watchlist()),
        (None, None) => String::new(),
    }
}

/// Resolve a genre name against the configured picker options.
fn pick_genre(genres: &[String], name: &str) -> Option<String> {
    if name.is_empty() {
        return Some(String::new());
    }
    genres.iter().find(|g| g.eq_ignore_ascii_case(name)).cloned()
}

pub fn handle(session: &mut Session, config: &AppConfig, command: Command) -> Reaction {
    match command {
        Command::Search(text) => match session.set_query(text) {
            Some(pending) => Reaction::fetch(Some(pending)),
            None => Reaction::say("Go `back` to the search screen first."),
        },
        Command::Genre(name) => match pick_genre(&config.search.genres, &name) {
            Some(genre) => match session.set_genre(genre) {
                Some(pending) => Reaction::fetch(Some(pending)),
                None => Reaction::say("Go `back` to the search screen first."),
            },
            None => Reaction::say(format!(
                "Unknown genre {name}. Options: all, {}",
                config.search.genres.join(", ")
            )),
        },
        Command::More => match session.load_next_page() {
            Some(pending) => Reaction::fetch(Some(pending)),
            None => Reaction::say("Nothing to page on this screen."),
        },
        Command::Open(target) => {
            let movie = match target {
                Target::Result(n) => session
                    .search()
                    .and_then(|s| s.results().get(n - 1))
                    .cloned(),
                Target::Watchlist(n) => session.watchlist().get(n - 1).cloned(),
            };
            match movie {
                Some(movie) => Reaction::fetch(session.navigate(Route::for_movie(&movie))),
                None => Reaction::say("No such entry."),
            }
        }
        Command::Fav(index) => {
            let movie = match index {
                Some(n) => session
                    .search()
                    .and_then(|s| s.results().get(n - 1))
                    .cloned(),
                None => session
                    .detail()
                    .and_then(|d| d.detail())
                    .map(|d| d.summary()),
            };
            match movie {
                Some(movie) => Reaction::say(session.toggle_watchlist(&movie).to_string()),
                None => Reaction::say("No such entry."),
            }
        }
        Command::Watchlist => Reaction::say(view::render_watchlist(session.watchlist())),
        Command::Back => Reaction::fetch(session.navigate(Route::Search)),
        Command::Retry => Reaction::fetch(Some(session.refresh())),
        Command::Help => Reaction::say(HELP),
        Command::Quit => Reaction::default(),
    }
}

fn spawn<P>(tasks: &mut JoinSet<Fetched<P::Error>>, provider: &Arc<P>, pending: Pending)
where
    P: MovieProvider + 'static,
{
    let provider = Arc::clone(provider);
    tasks.spawn(async move { pending.run(provider.as_ref()).await });
}

pub async fn run<P>(provider: P, config: &AppConfig) -> anyhow::Result<()>
where
    P: MovieProvider + 'static,
{
    let provider = Arc::new(provider);
    let mut session = Session::new(SearchDefaults::from(&config.provider));
    let mut tasks = JoinSet::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}\n");
    spawn(&mut tasks, &provider, session.refresh());
    print!("{}", render_screen(&session));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let command = match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => command,
                    Err(message) => {
                        if !message.is_empty() {
                            println!("{message}");
                        }
                        continue;
                    }
                };
                tracing::debug!(?command, "Command");
                let reaction = handle(&mut session, config, command);
                if let Some(output) = reaction.output {
                    println!("{}", output.trim_end());
                }
                if let Some(pending) = reaction.pending {
                    spawn(&mut tasks, &provider, pending);
                    print!("{}", render_screen(&session));
                }
            }
            Some(joined) = tasks.join_next() => {
                if session.apply(joined?).is_applied() {
                    print!("{}", render_screen(&session));
                }
            }
        }
    }

    tasks.abort_all();
    tracing::info!(watchlist = session.watchlist().len(), "Session ended");
    Ok(())
}
