use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use activity_journal_core::errors::CoreError;
use activity_journal_core::models::activity::Activity;
use activity_journal_core::models::filter::FilterQuery;
use activity_journal_core::models::notice::NoticeKind;
use activity_journal_core::providers::traits::SuggestionProvider;
use anyhow::Result;
use chrono::Utc;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::app::{App, Effect};
use crate::{keys, links, ui};

type FetchResult = Result<Activity, CoreError>;

/// Take over the terminal, run the UI until the user quits, then restore it.
/// Must be called from inside the tokio runtime: fetches are spawned onto it.
/// Errors from the loop (a failed save, a terminal failure) are returned after
/// the terminal is back to normal.
pub(crate) fn run(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    install_panic_hook();

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Put the terminal back before the default hook prints the panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchResult>();
    let tick_rate = Duration::from_millis(100);

    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        // Short poll so finished fetches show up without waiting for a key.
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = keys::map_key(key, app.filters_open) {
                        if let Some(effect) = app.handle_action(action, Utc::now())? {
                            perform(effect, app, &tx)?;
                        }
                    }
                }
            }
        }

        while let Ok(result) = rx.try_recv() {
            app.on_fetch_result(result, Utc::now())?;
        }
        app.tick(Utc::now());
    }

    info!("Quit requested");
    Ok(())
}

fn perform(effect: Effect, app: &mut App, tx: &UnboundedSender<FetchResult>) -> Result<()> {
    match effect {
        Effect::Fetch(query) => {
            spawn_fetch(app.controller.provider(), query, tx.clone());
        }
        Effect::OpenLink(url) => {
            if let Err(e) = links::open(&url) {
                warn!(error = %e, "Failed to open link");
                app.controller
                    .raise_notice(NoticeKind::Info, format!("Could not open link: {e}"), Utc::now());
            }
        }
        Effect::Bell => {
            execute!(io::stdout(), Print('\u{7}'))?;
        }
    }
    Ok(())
}

/// Run one fetch in the background. Exactly one result is sent back, even if
/// the request task panics or is cancelled, so the controller always leaves
/// the fetching state.
fn spawn_fetch(
    provider: Arc<dyn SuggestionProvider>,
    query: FilterQuery,
    tx: UnboundedSender<FetchResult>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let request = tokio::spawn(async move { provider.fetch(&query).await });
        let result = match request.await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "Fetch task died");
                Err(CoreError::Unavailable(format!("Fetch task failed: {e}")))
            }
        };
        // The receiver only goes away when the UI is shutting down.
        let _ = tx.send(result);
    })
}
