//! Plain-text rendering of the session state. Pure functions of the state.

use std::fmt::Write;

use marquee_api::MovieDetail;
use marquee_core::detail::{display_field, DetailFetcher, DetailView};
use marquee_core::route::Route;
use marquee_core::search::SearchController;
use marquee_core::watchlist::Watchlist;

const ALL_GENRES: &str = "All Genres";

fn heart(watchlist: &Watchlist, id: &str) -> &'static str {
    if watchlist.contains(id) {
        "[*]"
    } else {
        "[ ]"
    }
}

pub fn render_results(search: &SearchController, watchlist: &Watchlist) -> String {
    let state = search.state();
    let mut out = String::new();

    let query = if state.query_text.trim().is_empty() {
        "(featured)"
    } else {
        state.query_text.as_str()
    };
    let genre = if state.genre_filter.is_empty() {
        ALL_GENRES
    } else {
        state.genre_filter.as_str()
    };
    let _ = writeln!(out, "Search: {query} | Genre: {genre} | Page {}", state.page_cursor);

    for (i, movie) in search.results().iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {} {} ({})  {}",
            i + 1,
            heart(watchlist, &movie.id),
            movie.title,
            movie.year,
            Route::for_movie(movie)
        );
    }

    if state.loading {
        out.push_str("Loading...\n");
    } else if let Some(error) = &state.error_message {
        let _ = writeln!(out, "{error}");
    } else if search.results().is_empty() && !state.genre_filter.is_empty() {
        out.push_str("No movies match this genre on the pages loaded so far.\n");
    }
    if !state.loading && search.has_more() {
        let _ = writeln!(out, "Type `more` to load page {}.", state.page_cursor + 1);
    }
    out
}

fn render_movie(out: &mut String, detail: &MovieDetail, watchlist: &Watchlist) {
    let _ = writeln!(out, "{} {}", heart(watchlist, &detail.id), detail.title);
    let fields = [
        ("Year", detail.year.as_deref()),
        ("Rated", detail.rated.as_deref()),
        ("Runtime", detail.runtime.as_deref()),
        ("Genre", detail.genre.as_deref()),
        ("Director", detail.director.as_deref()),
        ("Writer", detail.writer.as_deref()),
        ("Actors", detail.actors.as_deref()),
        ("Plot", detail.plot.as_deref()),
        ("Language", detail.language.as_deref()),
        ("Country", detail.country.as_deref()),
        ("Awards", detail.awards.as_deref()),
        ("IMDB Rating", detail.imdb_rating.as_deref()),
        ("Rotten Tomatoes", detail.rotten_tomatoes()),
        ("Metacritic", detail.metacritic()),
        ("Box Office", detail.box_office.as_deref()),
        ("Production", detail.production.as_deref()),
        ("Website", detail.website.as_deref()),
        ("Poster", detail.poster_url.as_deref()),
    ];
    for (label, value) in fields {
        let _ = writeln!(out, "  {label}: {}", display_field(value));
    }
}

pub fn render_detail(fetcher: &DetailFetcher, watchlist: &Watchlist) -> String {
    let mut out = String::new();
    match fetcher.view() {
        DetailView::Empty => {}
        DetailView::Loading => out.push_str("Loading...\n"),
        DetailView::Failed(message) => {
            let _ = writeln!(out, "Error: {message}");
        }
        DetailView::Loaded(detail) => render_movie(&mut out, detail, watchlist),
    }
    out
}

pub fn render_watchlist(watchlist: &Watchlist) -> String {
    if watchlist.is_empty() {
        return "Your watchlist is empty.\n".to_string();
    }
    let mut out = format!("Watchlist ({})\n", watchlist.len());
    for (i, movie) in watchlist.iter().enumerate() {
        let _ = writeln!(out, "  w{}. {} ({})", i + 1, movie.title, movie.year);
    }
    out
}
