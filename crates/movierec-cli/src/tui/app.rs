//! Router: the current route, its page, and global key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use movierec_api::{Route, SessionContext};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tokio::sync::mpsc::UnboundedSender;

use super::auth::state::{AuthMode, AuthState};
use super::command::{AppEvent, Command, Effect, Outcome};
use super::dashboard::state::DashboardState;
use super::detail::state::DetailState;
use super::home::state::HomeState;
use super::slider::SliderTimer;
use super::{auth, dashboard, detail, home, widgets};
use crate::config::UiConfig;

/// Routes kept for `Esc`.
const MAX_HISTORY: usize = 32;

/// Shown after the backend rejected the session.
pub const SESSION_EXPIRED: &str = "Session expired. Please log in again.";

/// The mounted page. Dropping it unmounts the page.
#[derive(Debug)]
pub enum Page {
    /// Home page with its slider timer.
    Home {
        /// Page state.
        state: Box<HomeState>,
        /// Auto-advance timer, released with the page.
        slider: SliderTimer,
    },
    /// Dashboard.
    Dashboard(Box<DashboardState>),
    /// Movie detail.
    Detail(Box<DetailState>),
    /// Login or registration form.
    Auth(Box<AuthState>),
}

/// Application state for the TUI shell.
#[derive(Debug)]
pub struct App {
    route: Route,
    page: Page,
    history: Vec<Route>,
    session: SessionContext,
    ui: UiConfig,
    events: UnboundedSender<AppEvent>,
    notice: Option<String>,
    /// Whether a session existed as of the last login, logout, or 401.
    signed_in: bool,
    /// Set when the user asked to quit.
    pub should_quit: bool,
}

impl App {
    /// Creates the app on the home page. Must be called within a tokio
    /// runtime (the home page starts its slider timer).
    ///
    /// Returns the effects of mounting the home page.
    #[must_use]
    pub fn new(
        session: SessionContext,
        ui: UiConfig,
        events: UnboundedSender<AppEvent>,
    ) -> (Self, Vec<Effect>) {
        let (page, effects) = mount(Route::Home, &session, ui, &events);
        let signed_in = session.is_authenticated();
        let app = Self {
            route: Route::Home,
            page,
            history: Vec::new(),
            session,
            ui,
            events,
            notice: None,
            signed_in,
            should_quit: false,
        };
        (app, effects)
    }

    /// Current route.
    #[must_use]
    pub const fn route(&self) -> Route {
        self.route
    }

    /// Mounted page.
    #[must_use]
    pub const fn page(&self) -> &Page {
        &self.page
    }

    /// Whether the home slider timer is running (`None` off the home page).
    #[must_use]
    pub fn slider_running(&self) -> Option<bool> {
        match &self.page {
            Page::Home { slider, .. } => Some(slider.is_running()),
            _ => None,
        }
    }

    /// Switches to `route`, remembering the current one for `Esc`.
    ///
    /// Routes that need a session go to login instead when signed out.
    pub fn navigate(&mut self, route: Route) -> Vec<Effect> {
        let route = if route.requires_auth() && !self.session.is_authenticated() {
            tracing::debug!(%route, "signed out, redirecting to login");
            Route::Login
        } else {
            route
        };
        if route == self.route {
            return Vec::new();
        }
        self.history.push(self.route);
        if self.history.len() > MAX_HISTORY {
            self.history.remove(0);
        }
        self.switch_to(route)
    }

    /// Returns to the previous route, if any.
    pub fn back(&mut self) -> Vec<Effect> {
        let Some(route) = self.history.pop() else {
            return Vec::new();
        };
        if route.requires_auth() && !self.session.is_authenticated() {
            return self.back();
        }
        self.switch_to(route)
    }

    /// Called when the client reported a 401.
    ///
    /// The notice is only shown when a session existed; a rejected login
    /// also answers 401 and keeps its own form error.
    pub fn session_expired(&mut self, route: Route) -> Vec<Effect> {
        if self.signed_in {
            tracing::warn!(%route, from = %self.route, "session rejected by backend");
            self.notice = Some(String::from(SESSION_EXPIRED));
        } else {
            tracing::debug!(%route, from = %self.route, "401 without a session");
        }
        self.signed_in = false;
        self.navigate(route)
    }

    fn switch_to(&mut self, route: Route) -> Vec<Effect> {
        tracing::debug!(from = %self.route, to = %route, "navigating");
        let (page, effects) = mount(route, &self.session, self.ui, &self.events);
        self.route = route;
        self.page = page;
        effects
    }

    /// Routes a key press: the page first, then global shortcuts.
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Vec::new();
        }

        let authenticated = self.session.is_authenticated();
        let handled = match &mut self.page {
            Page::Home { state, .. } => home::handle_key(state, key),
            Page::Dashboard(state) => dashboard::handle_key(state, key),
            Page::Detail(state) => detail::handle_key(state, key, authenticated),
            Page::Auth(state) => auth::handle_key(state, key),
        };
        if let Some(effects) = handled {
            return effects;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                Vec::new()
            }
            KeyCode::Char('h') => self.navigate(Route::Home),
            KeyCode::Char('d') => self.navigate(Route::Dashboard),
            KeyCode::Char('l') if authenticated => vec![Effect::Run(Command::Logout)],
            KeyCode::Char('l') => self.navigate(Route::Login),
            KeyCode::Esc => self.back(),
            _ => Vec::new(),
        }
    }

    /// Routes a background event to the mounted page.
    pub fn handle_event(&mut self, event: AppEvent) -> Vec<Effect> {
        match event {
            AppEvent::SliderTick => {
                if let Page::Home { state, .. } = &mut self.page {
                    state.slider_tick();
                }
                Vec::new()
            }
            AppEvent::Outcome(outcome) => self.apply(*outcome),
        }
    }

    fn apply(&mut self, outcome: Outcome) -> Vec<Effect> {
        if let Outcome::LoggedOut(result) = outcome {
            if let Err(e) = result {
                tracing::warn!(error = %e, "logout failed, session cleared locally");
            }
            self.notice = Some(String::from("Logged out."));
            self.signed_in = false;
            self.history.clear();
            return if self.route == Route::Home {
                self.switch_to(Route::Home)
            } else {
                vec![Effect::Navigate(Route::Home)]
            };
        }
        if matches!(outcome, Outcome::LoggedIn(Ok(_)) | Outcome::Registered(Ok(_))) {
            self.notice = None;
            self.signed_in = true;
        }

        let authenticated = self.session.is_authenticated();
        match &mut self.page {
            Page::Home { state, .. } => state.apply(outcome),
            Page::Dashboard(state) => state.apply(outcome),
            Page::Detail(state) => state.apply(outcome, authenticated),
            Page::Auth(state) => state.apply(outcome),
        }
    }

    /// Draws the navigation bar, the page, and the key help line.
    #[allow(clippy::indexing_slicing)]
    pub fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // nav
                Constraint::Min(10),   // page
                Constraint::Length(1), // help
            ])
            .split(frame.area());

        let user = self.session.user();
        frame.render_widget(widgets::nav_bar(&self.route, user.as_ref()), chunks[0]);

        match &mut self.page {
            Page::Home { state, .. } => {
                home::ui::draw(frame, chunks[1], state, self.ui.description_limit);
            }
            Page::Dashboard(state) => dashboard::ui::draw(frame, chunks[1], state),
            Page::Detail(state) => detail::ui::draw(frame, chunks[1], state),
            Page::Auth(state) => auth::ui::draw(frame, chunks[1], state),
        }

        let help = match self.route {
            Route::Home => "/ search  g genre  f featured  \u{2190}\u{2192} page  Enter open  q quit",
            Route::Dashboard => "\u{2190}\u{2192} tab  / search  x remove  Enter open  Esc back  q quit",
            Route::Movie(_) => "w watchlist  r rate  o poster  Enter open  Esc back  q quit",
            Route::Login | Route::Register => "Tab next  Enter submit  ^r switch  Esc back  ^c quit",
        };
        let mut spans = vec![Span::styled(help, Style::default().fg(Color::DarkGray))];
        if self.slider_running() == Some(true) {
            spans.push(Span::styled(
                "  \u{25b6} auto",
                Style::default().fg(Color::DarkGray),
            ));
        }
        if let Some(notice) = &self.notice {
            spans.push(Span::styled(
                format!("   {notice}"),
                Style::default().fg(Color::Yellow),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[2]);
    }
}

/// Builds the page for `route` and returns its mount effects.
fn mount(
    route: Route,
    session: &SessionContext,
    ui: UiConfig,
    events: &UnboundedSender<AppEvent>,
) -> (Page, Vec<Effect>) {
    let authenticated = session.is_authenticated();
    match route {
        Route::Home => {
            let mut state = Box::new(HomeState::new());
            let effects = state.mount();
            let slider = SliderTimer::start(ui.slider_interval(), events.clone());
            (Page::Home { state, slider }, effects)
        }
        Route::Dashboard => {
            let mut state = Box::new(DashboardState::new());
            let effects = state.mount(authenticated);
            (Page::Dashboard(state), effects)
        }
        Route::Movie(id) => {
            let mut state = Box::new(DetailState::new(id));
            let effects = state.mount();
            (Page::Detail(state), effects)
        }
        Route::Login | Route::Register => {
            let mode = if route == Route::Login {
                AuthMode::Login
            } else {
                AuthMode::Register
            };
            let state = Box::new(AuthState::new(mode));
            let effects = state.mount(authenticated);
            (Page::Auth(state), effects)
        }
    }
}
