//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Loading
//!
//! Sources are fetched on tokio tasks that report back through an
//! `std::sync::mpsc` channel of `Action`s. The reducer decides the order:
//! `StartLoading` yields `Effect::FetchLocal`, and the local result yields
//! `Effect::FetchRemote`, so the remote request is only spawned once the
//! local list is on screen.
//!
//! ## Redraw Strategy
//!
//! The loop polls with a short timeout while loads are in flight so their
//! results show up promptly, and sleeps up to 500ms once settled. It only
//! redraws after an event or an incoming action.

mod component;
mod components;
mod event;
mod format;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::country::Country;
use crate::core::load::fetch_countries;
use crate::core::prefs::PreferenceStore;
use crate::core::state::{App, View};
use crate::data::{CountrySource, LocalFileSource, RestCountriesSource, SourceError};
use crate::tui::component::EventHandler;
use crate::tui::components::{CountryDetailState, CountryListEvent, CountryListState, DetailEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub country_list: CountryListState,
    pub detail: CountryDetailState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            country_list: CountryListState::new(),
            detail: CountryDetailState::new(),
        }
    }

    /// Clamp both cursors to what the app currently shows.
    fn sync(&mut self, app: &App) {
        self.country_list.sync(app.filtered().len());
        self.detail.sync(app.selected().map_or(0, |c| c.borders.len()));
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Harmlessly ignored by terminals without the kitty protocol
        execute!(
            stdout(),
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
    }
}

/// Everything an `Effect` may need to touch outside the `App`.
struct Runtime {
    tx: mpsc::Sender<Action>,
    local: Arc<dyn CountrySource>,
    remote: Arc<dyn CountrySource>,
    prefs: Option<PreferenceStore>,
}

impl Runtime {
    /// Applies `effect`. Returns true when the app should quit.
    fn apply(&self, app: &mut App, effect: Effect) -> bool {
        match effect {
            Effect::None => {}
            Effect::Quit => return true,
            Effect::FetchLocal => {
                spawn_fetch(self.local.clone(), self.tx.clone(), Action::LocalLoaded)
            }
            Effect::FetchRemote => {
                // Mark the request before spawning so its result is expected.
                update(app, Action::RemoteRequested);
                spawn_fetch(self.remote.clone(), self.tx.clone(), Action::RemoteLoaded);
            }
            Effect::SaveFilters => {
                if let Some(prefs) = &self.prefs {
                    prefs.save_filters(app.search_input(), app.region());
                }
            }
            Effect::SaveTheme => {
                if let Some(prefs) = &self.prefs {
                    prefs.save_theme(app.theme());
                }
            }
        }
        false
    }
}

/// Builds the initial `App`: theme and last search restored from preferences.
fn initial_app(config: &ResolvedConfig, prefs: Option<&PreferenceStore>) -> App {
    let saved_theme = prefs.and_then(PreferenceStore::load_theme);
    let mut app = App::new(config.initial_theme(saved_theme));
    if let Some(filters) = prefs.and_then(PreferenceStore::load_filters) {
        debug!("Restoring saved filters: {:?}", filters);
        app.restore_filters(filters);
    }
    app
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let prefs = config.prefs_file.clone().map(PreferenceStore::new);
    let mut app = initial_app(&config, prefs.as_ref());
    let mut tui = TuiState::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let runtime = Runtime {
        tx,
        local: Arc::new(LocalFileSource::new(config.data_file.clone())),
        remote: Arc::new(RestCountriesSource::new(Some(config.api_url.clone()))),
        prefs,
    };

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let effect = update(&mut app, Action::StartLoading);
    runtime.apply(&mut app, effect);

    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    while !should_quit {
        if needs_redraw {
            tui.sync(&app);
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if app.phase().is_settled() {
            Duration::from_millis(500)
        } else {
            Duration::from_millis(80)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = translate_event(&event, &app, &mut tui) else {
                continue;
            };
            let effect = dispatch(&mut app, &mut tui, action);
            if runtime.apply(&mut app, effect) {
                should_quit = true;
                break;
            }
        }

        // Handle background task actions (load results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = dispatch(&mut app, &mut tui, action);
            if runtime.apply(&mut app, effect) {
                should_quit = true;
            }
        }
    }

    info!("Terra shutting down");
    ratatui::restore();
    Ok(())
}

/// Runs the reducer and keeps the presentation state in step with it.
fn dispatch(app: &mut App, tui: &mut TuiState, action: Action) -> Effect {
    let filter_changed = matches!(action, Action::SearchChanged(_) | Action::CycleRegion);
    let selected_before = app.selected().map(|c| c.code.clone());

    let effect = update(app, action);

    if filter_changed {
        tui.country_list.reset();
    }
    if app.selected().map(|c| c.code.clone()) != selected_before {
        tui.detail.reset();
    }
    tui.sync(app);
    effect
}

/// Maps a terminal event to an `Action`, routing navigation keys to the
/// component that owns the current view.
fn translate_event(event: &TuiEvent, app: &App, tui: &mut TuiState) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::ToggleTheme => return Some(Action::ToggleTheme),
        TuiEvent::Resize => return None,
        _ => {}
    }

    match app.view() {
        View::List => match event {
            TuiEvent::InputChar(c) => {
                let mut input = app.search_input().to_string();
                input.push(*c);
                Some(Action::SearchChanged(input))
            }
            TuiEvent::Backspace => {
                let mut input = app.search_input().to_string();
                input.pop()?;
                Some(Action::SearchChanged(input))
            }
            TuiEvent::ClearInput => Some(Action::SearchChanged(String::new())),
            TuiEvent::CycleRegion => Some(Action::CycleRegion),
            _ => match tui.country_list.handle_event(event)? {
                CountryListEvent::Open(index) => Some(Action::OpenFiltered(index)),
            },
        },
        View::Detail => match tui.detail.handle_event(event)? {
            DetailEvent::Back => Some(Action::BackToList),
            DetailEvent::Follow(index) => {
                let country: &Country = app.selected()?;
                let code = country.borders.get(index)?;
                Some(Action::FollowBorder(code.clone()))
            }
        },
    }
}

/// Fetches one source on a tokio task and sends the normalized result back
/// wrapped in `wrap`.
fn spawn_fetch<F>(source: Arc<dyn CountrySource>, tx: mpsc::Sender<Action>, wrap: F)
where
    F: FnOnce(Result<Vec<Country>, SourceError>) -> Action + Send + 'static,
{
    info!("Spawning fetch from source '{}'", source.name());
    tokio::spawn(async move {
        let result = fetch_countries(source.as_ref()).await;
        if tx.send(wrap(result)).is_err() {
            warn!("Failed to send load result from '{}': receiver dropped", source.name());
        }
    });
}
