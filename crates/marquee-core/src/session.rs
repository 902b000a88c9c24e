//! Application session: the watchlist plus whichever screen is mounted.
//!
//! The session sits above both views. The watchlist lives as long as the
//! session does; a search or detail controller lives only while its screen is
//! mounted and is rebuilt on navigation. Every request the session hands out
//! is tagged with the mount it belongs to, so a response that arrives after
//! its screen was replaced is dropped.

use marquee_api::{MovieDetail, MovieProvider, MovieSummary, ProviderError, SearchPage};

use crate::detail::{DetailFetcher, DetailRequest};
use crate::route::Route;
use crate::search::{PageRequest, SearchController, SearchDefaults};
use crate::watchlist::{Watchlist, WatchlistEvent};
use crate::Completion;

#[derive(Debug)]
enum Screen {
    Search(SearchController),
    Detail(DetailFetcher),
}

/// A request issued by the mounted screen, not yet executed.
#[derive(Debug, Clone)]
pub enum Pending {
    Page { mount: u64, request: PageRequest },
    Detail { mount: u64, request: DetailRequest },
}

/// A provider result, ready to hand back to [`Session::apply`].
#[derive(Debug)]
pub enum Fetched<E> {
    Page {
        mount: u64,
        request: PageRequest,
        result: Result<SearchPage, E>,
    },
    Detail {
        mount: u64,
        request: DetailRequest,
        result: Result<MovieDetail, E>,
    },
}

impl Pending {
    /// Execute against `provider`. Needs no access to the session, so it can
    /// run on a separate task while the session keeps handling input.
    pub async fn run<P: MovieProvider>(self, provider: &P) -> Fetched<P::Error> {
        match self {
            Self::Page { mount, request } => {
                let result = provider.search(&request.query).await;
                Fetched::Page {
                    mount,
                    request,
                    result,
                }
            }
            Self::Detail { mount, request } => {
                let result = provider.get_movie(&request.id).await;
                Fetched::Detail {
                    mount,
                    request,
                    result,
                }
            }
        }
    }
}

#[derive(Debug)]
pub struct Session {
    defaults: SearchDefaults,
    watchlist: Watchlist,
    route: Route,
    screen: Screen,
    mount: u64,
}

impl Session {
    /// A session showing the search screen. Call [`Session::refresh`] to load it.
    pub fn new(defaults: SearchDefaults) -> Self {
        Self {
            screen: Screen::Search(SearchController::new(defaults.clone())),
            defaults,
            watchlist: Watchlist::new(),
            route: Route::Search,
            mount: 1,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    /// Toggle watchlist membership from either screen.
    pub fn toggle_watchlist(&mut self, movie: &MovieSummary) -> WatchlistEvent {
        self.watchlist.toggle(movie)
    }

    /// The search controller, when the search screen is mounted.
    pub fn search(&self) -> Option<&SearchController> {
        match &self.screen {
            Screen::Search(search) => Some(search),
            Screen::Detail(_) => None,
        }
    }

    /// The detail fetcher, when a detail screen is mounted.
    pub fn detail(&self) -> Option<&DetailFetcher> {
        match &self.screen {
            Screen::Detail(detail) => Some(detail),
            Screen::Search(_) => None,
        }
    }

    /// Move to `route`, mounting a fresh screen when the kind of screen changes.
    ///
    /// Navigating between detail routes reuses the mounted fetcher, which only
    /// refetches if the id differs.
    pub fn navigate(&mut self, route: Route) -> Option<Pending> {
        tracing::debug!(from = %self.route, to = %route, "Navigate");
        let mount = self.mount;
        let pending = match &route {
            Route::Search if matches!(self.screen, Screen::Search(_)) => None,
            Route::Search => Some(self.mount_search()),
            Route::Movie(id) => match &mut self.screen {
                Screen::Detail(fetcher) => fetcher
                    .on_route(id)
                    .map(|request| Pending::Detail { mount, request }),
                Screen::Search(_) => Some(self.mount_detail(id)),
            },
        };
        self.route = route;
        pending
    }

    fn mount_search(&mut self) -> Pending {
        let mut search = SearchController::new(self.defaults.clone());
        let request = search.refresh();
        self.mount += 1;
        self.screen = Screen::Search(search);
        Pending::Page {
            mount: self.mount,
            request,
        }
    }

    fn mount_detail(&mut self, id: &str) -> Pending {
        let mut fetcher = DetailFetcher::new();
        let request = fetcher.fetch_by_id(id);
        self.mount += 1;
        self.screen = Screen::Detail(fetcher);
        Pending::Detail {
            mount: self.mount,
            request,
        }
    }

    /// Reload the mounted screen from scratch. Also the manual retry path.
    pub fn refresh(&mut self) -> Pending {
        let mount = self.mount;
        match &mut self.screen {
            Screen::Search(search) => Pending::Page {
                mount,
                request: search.refresh(),
            },
            Screen::Detail(fetcher) => {
                let id = fetcher.id().unwrap_or_default().to_string();
                Pending::Detail {
                    mount,
                    request: fetcher.fetch_by_id(id),
                }
            }
        }
    }

    pub fn set_query(&mut self, text: impl Into<String>) -> Option<Pending> {
        self.with_search(|search| search.set_query(text))
    }

    pub fn set_genre(&mut self, genre: impl Into<String>) -> Option<Pending> {
        self.with_search(|search| search.set_genre(genre))
    }

    pub fn load_next_page(&mut self) -> Option<Pending> {
        self.with_search(SearchController::load_next_page)
    }

    fn with_search(
        &mut self,
        f: impl FnOnce(&mut SearchController) -> PageRequest,
    ) -> Option<Pending> {
        let mount = self.mount;
        match &mut self.screen {
            Screen::Search(search) => Some(Pending::Page {
                mount,
                request: f(search),
            }),
            Screen::Detail(_) => None,
        }
    }

    /// Hand a provider result to the screen that requested it, if it is
    /// still mounted.
    pub fn apply<E: ProviderError>(&mut self, fetched: Fetched<E>) -> Completion {
        match (fetched, &mut self.screen) {
            (
                Fetched::Page {
                    mount,
                    request,
                    result,
                },
                Screen::Search(search),
            ) if mount == self.mount => search.complete(&request, result),
            (
                Fetched::Detail {
                    mount,
                    request,
                    result,
                },
                Screen::Detail(fetcher),
            ) if mount == self.mount => fetcher.complete(&request, result),
            _ => {
                tracing::debug!("Dropping response for an unmounted screen");
                Completion::Stale
            }
        }
    }

    pub async fn run<P: MovieProvider>(&mut self, provider: &P, pending: Pending) -> Completion {
        let fetched = pending.run(provider).await;
        self.apply(fetched)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SearchDefaults::default())
    }
}
