use tui_textarea::TextArea;

use super::form::LoginForm;
use super::theme::ThemeState;
use crate::api::Horse;
use crate::notify::{NoticeBoard, Notifier};
use crate::router::{resolve_chain, Route};
use crate::session::SharedSession;
use crate::utils::ApiError;

/// Outcome of a spawned request, delivered back to the event loop.
///
/// `nav_gen` is the navigation generation at dispatch time; completions
/// from an abandoned view carry a stale generation and are discarded.
#[derive(Debug)]
pub enum Completion {
    Horses {
        nav_gen: u64,
        result: Result<Vec<Horse>, ApiError>,
    },
    Horse {
        nav_gen: u64,
        result: Result<Horse, ApiError>,
    },
    Login {
        nav_gen: u64,
        result: Result<String, ApiError>,
    },
}

/// Which part of the catalog page has the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFocus {
    Search,
    Breed,
    Table,
}

/// Catalog page state: the full list loaded once on entry, then filtered
/// and sliced client-side
pub struct ListView {
    pub horses: Vec<Horse>,
    pub loading: bool,
    pub search: TextArea<'static>,
    pub breed: TextArea<'static>,
    /// 1-indexed, like the page indicator shows it
    pub page: usize,
    /// Row index within the current page
    pub selected: usize,
    pub focus: ListFocus,
    per_page: usize,
}

impl ListView {
    pub fn new(per_page: usize) -> Self {
        Self {
            horses: Vec::new(),
            loading: true,
            search: TextArea::default(),
            breed: TextArea::default(),
            page: 1,
            selected: 0,
            focus: ListFocus::Table,
            // A zero page size from a bad config would make page math divide by zero
            per_page: per_page.max(1),
        }
    }

    pub fn search_term(&self) -> String {
        self.search.lines().join("")
    }

    pub fn breed_term(&self) -> String {
        self.breed.lines().join("")
    }

    pub fn filtered(&self) -> Vec<&Horse> {
        filter_horses(&self.horses, &self.search_term(), &self.breed_term())
    }

    pub fn page_count(&self) -> usize {
        self.filtered().len().div_ceil(self.per_page).max(1)
    }

    /// The rows visible on the current page
    pub fn page_rows(&self) -> Vec<&Horse> {
        let filtered = self.filtered();
        let start = (self.page - 1) * self.per_page;
        filtered.into_iter().skip(start).take(self.per_page).collect()
    }

    pub fn selected_horse(&self) -> Option<&Horse> {
        self.page_rows().get(self.selected).copied()
    }

    pub fn next_page(&mut self) {
        if self.page < self.page_count() {
            self.page += 1;
            self.selected = 0;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
            self.selected = 0;
        }
    }

    pub fn select_next(&mut self) {
        let rows = self.page_rows().len();
        if rows > 0 && self.selected < rows - 1 {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Changing either filter jumps back to the first page
    pub fn on_filter_changed(&mut self) {
        self.page = 1;
        self.selected = 0;
    }
}

/// Case-insensitive substring match on name and breed
pub fn filter_horses<'a>(horses: &'a [Horse], search: &str, breed: &str) -> Vec<&'a Horse> {
    let search = search.to_lowercase();
    let breed = breed.to_lowercase();

    horses
        .iter()
        .filter(|horse| {
            let match_name = horse.name.to_lowercase().contains(&search);
            let match_breed = breed.is_empty()
                || horse
                    .breed
                    .as_deref()
                    .unwrap_or("")
                    .to_lowercase()
                    .contains(&breed);
            match_name && match_breed
        })
        .collect()
}

/// Detail page state
pub struct DetailView {
    pub horse: Option<Horse>,
    pub loading: bool,
    pub scroll: u16,
}

impl DetailView {
    pub fn loading() -> Self {
        Self {
            horse: None,
            loading: true,
            scroll: 0,
        }
    }
}

/// Application state driven by the single event loop
pub struct App {
    pub route: Route,
    /// Bumped on every navigation; spawned requests carry the value current
    /// at dispatch so stale completions can be recognized
    pub nav_gen: u64,
    pub running: bool,
    pub session: SharedSession,
    pub theme: ThemeState,
    pub notices: NoticeBoard,
    pub login: LoginForm,
    pub list: ListView,
    pub detail: DetailView,
    per_page: usize,
}

impl App {
    pub fn new(
        session: SharedSession,
        theme: ThemeState,
        notices: NoticeBoard,
        per_page: usize,
    ) -> Self {
        Self {
            route: Route::Root,
            nav_gen: 0,
            running: true,
            session,
            theme,
            notices,
            login: LoginForm::new(),
            list: ListView::new(per_page),
            detail: DetailView::loading(),
            per_page,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Navigate to a destination, re-running the guard on this hop.
    ///
    /// Returns the route that will actually render; the caller dispatches
    /// whatever fetch that page needs.
    pub fn navigate(&mut self, destination: Route) -> Route {
        // The logout route performs its effect, then falls through to login
        let destination = if destination == Route::Logout && self.session.is_authenticated() {
            self.session.logout();
            Route::Login
        } else {
            destination
        };

        let target = resolve_chain(destination, self.session.is_authenticated());
        self.nav_gen += 1;
        self.route = target;

        // Page-entry state, the way a remounted view starts over
        match target {
            Route::Login => self.login = LoginForm::new(),
            Route::Horses => self.list = ListView::new(self.per_page),
            Route::HorseDetails(_) => self.detail = DetailView::loading(),
            _ => {}
        }

        target
    }

    /// Apply a request completion. Stale generations are dropped without
    /// touching any state; the return value is a follow-up navigation the
    /// caller must perform.
    pub fn apply(&mut self, completion: Completion) -> Option<Route> {
        match completion {
            Completion::Horses { nav_gen, result } => {
                if nav_gen != self.nav_gen {
                    return None;
                }
                self.list.loading = false;
                if let Ok(horses) = result {
                    self.list.horses = horses;
                }
                None
            }
            Completion::Horse { nav_gen, result } => {
                if nav_gen != self.nav_gen {
                    return None;
                }
                self.detail.loading = false;
                match result {
                    Ok(horse) => {
                        self.detail.horse = Some(horse);
                        None
                    }
                    // A dead-end detail page helps nobody; go back to the list
                    Err(ApiError::NotFound) => Some(Route::Horses),
                    Err(_) => None,
                }
            }
            Completion::Login { nav_gen, result } => {
                if nav_gen != self.nav_gen {
                    return None;
                }
                self.login.submitting = false;
                match result {
                    Ok(token) => {
                        self.session.login(&token);
                        self.notices.success("Login successful!");
                        Some(Route::Horses)
                    }
                    // The gateway already reported the failure
                    Err(_) => None,
                }
            }
        }
    }
}
