//! Terminal User Interface for hivedash.
//!
//! Provides the main TUI application loop using ratatui and crossterm.

pub mod app;
mod events;
mod ui;
pub mod widgets;

pub use app::App;
pub use events::{Event, EventHandler};

use crate::error::{HivedashError, Result};
use crate::hive::HiveRpcClient;
use crate::pages::PageId;
use crate::query::{QueryExecutor, QueryOutcome};
use app::{Action, PageView};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error};

/// Messages sent from background query tasks to the main loop.
#[derive(Debug)]
pub enum AsyncMessage {
    /// A page query finished, successfully or not.
    QueryDone {
        page: PageId,
        view: PageView,
        /// Chain factor fetched along the way, for caching.
        hive_per_mvest: Option<f64>,
    },
}

/// The main TUI application runner.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_handler: EventHandler,
}

impl Tui {
    /// Creates a new TUI instance, initializing the terminal.
    pub fn new() -> Result<Self> {
        let terminal = Self::setup_terminal()?;
        let event_handler = EventHandler::new();

        Ok(Self {
            terminal,
            event_handler,
        })
    }

    /// Sets up the terminal for TUI rendering.
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()
            .map_err(|e| HivedashError::internal(format!("Failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|e| {
            HivedashError::internal(format!("Failed to enter alternate screen: {e}"))
        })?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)
            .map_err(|e| HivedashError::internal(format!("Failed to create terminal: {e}")))?;

        Ok(terminal)
    }

    /// Restores the terminal to its original state.
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()
            .map_err(|e| HivedashError::internal(format!("Failed to disable raw mode: {e}")))?;

        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .map_err(|e| HivedashError::internal(format!("Failed to leave alternate screen: {e}")))?;

        self.terminal
            .show_cursor()
            .map_err(|e| HivedashError::internal(format!("Failed to show cursor: {e}")))?;

        Ok(())
    }

    /// Runs the main TUI event loop.
    pub async fn run(
        &mut self,
        app: &mut App,
        executor: Arc<QueryExecutor>,
        rpc: Arc<HiveRpcClient>,
    ) -> Result<()> {
        // Set up panic hook to restore terminal on panic
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        // Channel for async messages
        let (tx, mut rx) = mpsc::channel::<AsyncMessage>(8);

        let result = self.run_event_loop(app, executor, rpc, tx, &mut rx).await;

        // Restore panic hook
        let _ = panic::take_hook();

        result
    }

    /// The main event loop, separated for cleaner error handling.
    async fn run_event_loop(
        &mut self,
        app: &mut App,
        executor: Arc<QueryExecutor>,
        rpc: Arc<HiveRpcClient>,
        tx: mpsc::Sender<AsyncMessage>,
        rx: &mut mpsc::Receiver<AsyncMessage>,
    ) -> Result<()> {
        loop {
            // Draw the UI
            self.terminal
                .draw(|frame| ui::render(frame, app))
                .map_err(|e| HivedashError::internal(format!("Failed to draw: {e}")))?;

            if !app.running {
                break;
            }

            // Handle both terminal events and async messages
            tokio::select! {
                event_result = tokio::task::spawn_blocking({
                    let events = self.event_handler;
                    move || events.next()
                }) => {
                    let event = event_result
                        .map_err(|e| HivedashError::internal(format!("Event task failed: {e}")))??;
                    if let Action::RunQuery(page) = app.handle_event(event) {
                        app.begin_query(page);
                        spawn_page_query(
                            page,
                            Arc::clone(&executor),
                            Arc::clone(&rpc),
                            app.hive_per_mvest,
                            tx.clone(),
                        );
                    }
                }

                Some(msg) = rx.recv() => {
                    handle_async_message(msg, app);
                }
            }
        }

        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Applies a background task message to the application state.
fn handle_async_message(msg: AsyncMessage, app: &mut App) {
    match msg {
        AsyncMessage::QueryDone {
            page,
            view,
            hive_per_mvest,
        } => {
            if hive_per_mvest.is_some() {
                app.hive_per_mvest = hive_per_mvest;
            }
            app.finish_query(page, view);
        }
    }
}

/// Spawns a background task that runs the page's query.
fn spawn_page_query(
    page: PageId,
    executor: Arc<QueryExecutor>,
    rpc: Arc<HiveRpcClient>,
    cached_factor: Option<f64>,
    tx: mpsc::Sender<AsyncMessage>,
) {
    tokio::spawn(async move {
        let (view, hive_per_mvest) = run_page_query(page, &executor, &rpc, cached_factor).await;
        let message = AsyncMessage::QueryDone {
            page,
            view,
            hive_per_mvest,
        };
        if tx.send(message).await.is_err() {
            debug!(
                "UI loop closed before the {} query finished",
                page.spec().title
            );
        }
    });
}

/// Executes a page's query and builds its chart.
///
/// Returns the resulting view together with the chain factor, so a
/// freshly fetched factor can be cached for later pages.
async fn run_page_query(
    page: PageId,
    executor: &QueryExecutor,
    rpc: &HiveRpcClient,
    cached_factor: Option<f64>,
) -> (PageView, Option<f64>) {
    let spec = page.spec();

    let table = match executor.execute(spec.query, &[]).await {
        QueryOutcome::Rows(table) => table,
        QueryOutcome::Empty(_) => {
            error!("No query result");
            return (PageView::NoResult, cached_factor);
        }
        // Execution failures are logged by the executor
        QueryOutcome::Failed(_) => return (PageView::NoResult, cached_factor),
    };

    let mut factor = cached_factor;
    if page.needs_hive_per_mvest() && factor.is_none() {
        match rpc.get_hive_per_mvest().await {
            Ok(value) => factor = Some(value),
            Err(e) => {
                error!("{e}");
                return (PageView::NoResult, cached_factor);
            }
        }
    }

    let rows = table.row_count();
    let took = table.execution_time;
    match page.build_chart(&table, factor) {
        Ok(data) => (PageView::Chart { data, rows, took }, factor),
        Err(e) => {
            error!("{e}");
            (PageView::NoResult, factor)
        }
    }
}

/// Runs the dashboard until the user quits.
pub async fn run(
    executor: QueryExecutor,
    rpc: HiveRpcClient,
    connection_info: Option<String>,
) -> Result<()> {
    let connected = executor.is_connected();
    let mut app = App::new(connection_info, connected);
    let mut tui = Tui::new()?;
    tui.run(&mut app, Arc::new(executor), Arc::new(rpc)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hive::HiveRpcConfig;

    #[tokio::test]
    async fn test_failed_query_yields_no_result() {
        let executor = QueryExecutor::new(None);
        let rpc = HiveRpcClient::new(HiveRpcConfig::new("http://127.0.0.1:1")).unwrap();

        let (view, factor) = run_page_query(PageId::TopAccounts, &executor, &rpc, None).await;
        assert!(matches!(view, PageView::NoResult));
        assert!(factor.is_none());
    }

    #[test]
    fn test_async_message_caches_chain_factor() {
        let mut app = App::new(None, true);
        app.begin_query(PageId::CommunityPower);
        handle_async_message(
            AsyncMessage::QueryDone {
                page: PageId::CommunityPower,
                view: PageView::NoResult,
                hive_per_mvest: Some(600.0),
            },
            &mut app,
        );
        assert_eq!(app.hive_per_mvest, Some(600.0));
        assert!(!app.is_busy());

        // A later result without a factor keeps the cached one
        app.begin_query(PageId::TopAccounts);
        handle_async_message(
            AsyncMessage::QueryDone {
                page: PageId::TopAccounts,
                view: PageView::NoResult,
                hive_per_mvest: None,
            },
            &mut app,
        );
        assert_eq!(app.hive_per_mvest, Some(600.0));
    }
}
