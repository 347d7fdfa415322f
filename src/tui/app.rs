//! Application state for the TUI.
//!
//! Contains the main App struct and related types for managing UI state.

use super::widgets::spinner::Spinner;
use crate::pages::{ChartData, PageId};
use std::time::Duration;

/// View state of a single page.
#[derive(Debug, Clone, Default)]
pub enum PageView {
    /// Nothing fetched yet.
    #[default]
    Idle,
    /// A query is in flight.
    Running,
    /// Chart built from the last successful query.
    Chart {
        data: ChartData,
        rows: usize,
        took: Duration,
    },
    /// The last attempt produced nothing to chart.
    NoResult,
}

/// What the event loop should do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing to do.
    None,
    /// Run the given page's query in the background.
    RunQuery(PageId),
}

/// Main application state.
pub struct App {
    /// Whether the application is still running.
    pub running: bool,
    /// Index of the active page in `PageId::ALL`.
    pub active: usize,
    /// View state per page, indexed like `PageId::ALL`.
    pub views: Vec<PageView>,
    /// Spinner shown while a query is in flight.
    pub busy: Option<Spinner>,
    /// Database connection info for display.
    pub connection_info: Option<String>,
    /// Whether a database driver was resolved at startup.
    pub connected: bool,
    /// Cached HIVE-per-MVEST factor from the first page that needed it.
    pub hive_per_mvest: Option<f64>,
}

impl App {
    /// Creates a new App instance with all pages idle.
    pub fn new(connection_info: Option<String>, connected: bool) -> Self {
        Self {
            running: true,
            active: 0,
            views: vec![PageView::Idle; PageId::ALL.len()],
            busy: None,
            connection_info,
            connected,
            hive_per_mvest: None,
        }
    }

    /// The currently displayed page.
    pub fn active_page(&self) -> PageId {
        PageId::ALL[self.active]
    }

    /// View state for the given page.
    pub fn view(&self, page: PageId) -> &PageView {
        &self.views[page.index()]
    }

    /// True while a query is in flight.
    ///
    /// One query at a time; triggers are ignored until the running one
    /// reports back.
    pub fn is_busy(&self) -> bool {
        self.busy.is_some()
    }

    /// Marks the given page as running and starts the busy spinner.
    pub fn begin_query(&mut self, page: PageId) {
        let label = format!("Loading {}", page.spec().title.to_lowercase());
        self.busy = Some(Spinner::new(label));
        self.views[page.index()] = PageView::Running;
    }

    /// Stores the finished view for the given page and stops the spinner.
    pub fn finish_query(&mut self, page: PageId, view: PageView) {
        self.views[page.index()] = view;
        self.busy = None;
    }

    /// Switches to the next page, wrapping around.
    pub fn select_next(&mut self) {
        self.active = (self.active + 1) % PageId::ALL.len();
    }

    /// Switches to the previous page, wrapping around.
    pub fn select_prev(&mut self) {
        self.active = (self.active + PageId::ALL.len() - 1) % PageId::ALL.len();
    }

    /// Switches to the page at `index`, ignoring out-of-range values.
    pub fn select(&mut self, index: usize) {
        if index < PageId::ALL.len() {
            self.active = index;
        }
    }

    /// Handles an event and returns what the event loop should do next.
    pub fn handle_event(&mut self, event: super::Event) -> Action {
        use super::Event;
        use crossterm::event::{KeyCode, KeyModifiers};

        match event {
            Event::Key(key) => match key.code {
                // Exit commands
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.running = false;
                    Action::None
                }
                KeyCode::Char('q') => {
                    self.running = false;
                    Action::None
                }

                // Page switching
                KeyCode::Tab | KeyCode::Right => {
                    self.select_next();
                    Action::None
                }
                KeyCode::BackTab | KeyCode::Left => {
                    self.select_prev();
                    Action::None
                }
                KeyCode::Char(c @ '1'..='9') => {
                    self.select(c as usize - '1' as usize);
                    Action::None
                }

                // Query trigger
                KeyCode::Enter | KeyCode::Char('r') => {
                    if self.is_busy() {
                        Action::None
                    } else {
                        Action::RunQuery(self.active_page())
                    }
                }

                _ => Action::None,
            },
            Event::Resize(_, _) => {
                // Terminal resize is handled automatically by ratatui
                Action::None
            }
            Event::Tick => {
                // Each tick redraws, which advances the spinner
                Action::None
            }
        }
    }
}
