//! Terminal UI: page controllers, rendering, and the async event loop.

/// Router and global key handling.
pub mod app;
/// Login and registration pages.
pub mod auth;
/// Backend commands and their outcomes.
pub mod command;
/// Dashboard page.
pub mod dashboard;
/// Movie detail page.
pub mod detail;
/// Home page.
pub mod home;
/// Search box input.
pub mod search;
/// Table cursor helpers.
pub mod selection;
/// Featured slider timer and index.
pub mod slider;
/// Shared presentation helpers.
pub mod widgets;

use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use movierec_api::{MovieApi, RecordingNavigator, SessionContext};

use self::app::App;
use self::command::{AppEvent, Effect};
use crate::config::UiConfig;

/// Delay between loop iterations.
const TICK: Duration = Duration::from_millis(50);

/// Everything the event loop needs to carry out effects.
struct Shell<A> {
    api: Arc<A>,
    session: SessionContext,
    navigator: RecordingNavigator,
    events: UnboundedSender<AppEvent>,
}

impl<A> Shell<A>
where
    A: MovieApi + Sync + 'static,
{
    /// Carries out effects; navigation may yield further effects.
    fn dispatch(&self, app: &mut App, effects: Vec<Effect>) {
        let mut queue: VecDeque<Effect> = effects.into();
        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Run(command) => {
                    command::spawn(&self.api, &self.session, command, &self.events);
                }
                Effect::Navigate(route) => queue.extend(app.navigate(route)),
                Effect::OpenUrl(url) => {
                    tracing::debug!(url, "opening in browser");
                    if let Err(e) = open::that(&url) {
                        tracing::warn!(error = %e, url, "failed to open browser");
                    }
                }
            }
        }
    }
}

/// Runs the TUI until the user quits.
///
/// `navigator` must be the one the client was built with, so a 401 from any
/// request lands on the login page.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
#[allow(clippy::module_name_repetitions)]
pub async fn run_tui<A>(
    api: Arc<A>,
    session: SessionContext,
    navigator: RecordingNavigator,
    ui: UiConfig,
) -> Result<()>
where
    A: MovieApi + Sync + 'static,
{
    let (events, rx) = mpsc::unbounded_channel();
    let shell = Shell {
        api,
        session: session.clone(),
        navigator,
        events: events.clone(),
    };
    let (mut app, effects) = App::new(session, ui, events);

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    shell.dispatch(&mut app, effects);
    let result = run_event_loop(&mut terminal, &mut app, &shell, rx).await;

    // Both cleanup steps run even when one fails; the first error wins.
    let raw = disable_raw_mode().context("failed to disable raw mode");
    let screen = crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen");

    first_error([result, raw, screen])
}

/// Returns the first error in `results`, or `Ok(())`.
fn first_error<const N: usize>(results: [Result<()>; N]) -> Result<()> {
    results.into_iter().find(Result::is_err).unwrap_or(Ok(()))
}

/// Main event loop.
async fn run_event_loop<A>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    shell: &Shell<A>,
    mut rx: UnboundedReceiver<AppEvent>,
) -> Result<()>
where
    A: MovieApi + Sync + 'static,
{
    loop {
        terminal
            .draw(|frame| app.draw(frame))
            .context("failed to draw TUI")?;

        while event::poll(Duration::ZERO).context("failed to poll events")? {
            if let Event::Key(key) = event::read().context("failed to read event")?
                && key.kind == KeyEventKind::Press
            {
                let effects = app.handle_key(key);
                shell.dispatch(app, effects);
            }
        }
        if app.should_quit {
            return Ok(());
        }

        while let Ok(event) = rx.try_recv() {
            let effects = app.handle_event(event);
            shell.dispatch(app, effects);
        }

        if let Some(route) = shell.navigator.take() {
            let effects = app.session_expired(route);
            shell.dispatch(app, effects);
        }

        tokio::time::sleep(TICK).await;
    }
}
