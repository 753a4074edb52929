//! # Actions
//!
//! Everything that can happen in Terra becomes an `Action`.
//! User types into the search box? That's `Action::SearchChanged(text)`.
//! The API responds? That's `Action::RemoteLoaded(result)`.
//!
//! `update()` applies an action to the state and returns the `Effect` the
//! event loop should carry out (spawn a fetch, persist a preference).
//! No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{info, warn};

use crate::core::country::Country;
use crate::core::load::{
    self, LoadPhase, LocalOutcome, RemoteOutcome, STATUS_LOCAL_FALLBACK, STATUS_LOCAL_LOADING,
    STATUS_LOCAL_SUCCESS, STATUS_REMOTE_FAILED, STATUS_REMOTE_SUCCESS,
};
use crate::core::state::App;
use crate::data::SourceError;

#[derive(Debug)]
pub enum Action {
    /// Startup: begin the local stage.
    StartLoading,
    /// Result of the local stage.
    LocalLoaded(Result<Vec<Country>, SourceError>),
    /// The remote request has been spawned.
    RemoteRequested,
    /// Result of the remote stage.
    RemoteLoaded(Result<Vec<Country>, SourceError>),
    SearchChanged(String),
    CycleRegion,
    /// Open the detail view for the n-th visible country.
    OpenFiltered(usize),
    /// Open the detail view for a border code.
    FollowBorder(String),
    BackToList,
    ToggleTheme,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    FetchLocal,
    FetchRemote,
    SaveFilters,
    SaveTheme,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::StartLoading => {
            if app.phase() != LoadPhase::Empty {
                warn!("StartLoading ignored in phase {:?}", app.phase());
                return Effect::None;
            }
            app.set_phase(LoadPhase::LocalLoading);
            app.set_status(STATUS_LOCAL_LOADING);
            Effect::FetchLocal
        }
        Action::LocalLoaded(result) => {
            if app.phase() != LoadPhase::LocalLoading {
                warn!("Local result ignored in phase {:?}", app.phase());
                return Effect::None;
            }
            match result {
                Ok(countries) => {
                    info!("Local stage loaded {} countries", countries.len());
                    app.set_countries(countries);
                    app.set_phase(LoadPhase::LocalLoaded(LocalOutcome::Success));
                    app.set_status(STATUS_LOCAL_SUCCESS);
                }
                Err(e) => {
                    warn!("Local stage failed, using fallback seed: {}", e);
                    app.set_countries(load::fallback_seed());
                    app.set_phase(LoadPhase::LocalLoaded(LocalOutcome::Fallback));
                    app.set_status(STATUS_LOCAL_FALLBACK);
                }
            }
            // Success or fallback alike, the remote stage starts right away.
            Effect::FetchRemote
        }
        Action::RemoteRequested => {
            if !matches!(app.phase(), LoadPhase::LocalLoaded(_)) {
                warn!("RemoteRequested ignored in phase {:?}", app.phase());
                return Effect::None;
            }
            app.set_phase(LoadPhase::RemoteLoading);
            Effect::None
        }
        Action::RemoteLoaded(result) => {
            if app.phase() != LoadPhase::RemoteLoading {
                warn!("Remote result ignored in phase {:?}", app.phase());
                return Effect::None;
            }
            match result {
                Ok(countries) => {
                    info!("Remote stage loaded {} countries", countries.len());
                    app.set_countries(countries);
                    app.set_phase(LoadPhase::RemoteLoaded(RemoteOutcome::Success));
                    app.set_status(STATUS_REMOTE_SUCCESS);
                }
                Err(e) => {
                    warn!("Remote stage failed, keeping local data: {}", e);
                    app.set_phase(LoadPhase::RemoteLoaded(RemoteOutcome::KeepLocal));
                    app.set_status(STATUS_REMOTE_FAILED);
                }
            }
            Effect::None
        }
        Action::SearchChanged(input) => match app.set_search_input(input) {
            Ok(()) => Effect::SaveFilters,
            Err(_) => Effect::None,
        },
        Action::CycleRegion => match app.cycle_region() {
            Ok(()) => Effect::SaveFilters,
            Err(_) => Effect::None,
        },
        Action::OpenFiltered(index) => {
            app.select_filtered(index);
            Effect::None
        }
        Action::FollowBorder(code) => {
            app.select_code(&code);
            Effect::None
        }
        Action::BackToList => {
            app.show_list();
            Effect::None
        }
        Action::ToggleTheme => {
            app.set_theme(app.theme().toggled());
            Effect::SaveTheme
        }
        Action::Quit => Effect::Quit,
    }
}
