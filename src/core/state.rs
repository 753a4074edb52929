//! # Application State
//!
//! Core business state for Terra. Domain data only; presentation state
//! (cursor positions, list scroll) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── countries: Vec<Country>        // canonical list, replaced wholesale
//! ├── filtered: Vec<Country>         // visible subset, recomputed on change
//! ├── selected: Option<Country>      // detail view target
//! ├── view: View                     // list or detail
//! ├── search_input: String           // raw text as typed
//! ├── region: String                 // "" = all regions
//! ├── search_error: Option<...>      // rejected search, if any
//! ├── theme: Theme
//! ├── phase: LoadPhase
//! └── status_message: String
//! ```
//!
//! Fields are private: every change goes through a setter that keeps
//! `filtered` consistent with `countries`, `search_input` and `region`.
//! The event loop redraws after every handled event.

use log::debug;

use crate::Theme;
use crate::core::country::{BorderLink, Country};
use crate::core::filter::{self, FilterError};
use crate::core::load::LoadPhase;
use crate::core::prefs::SavedFilters;
use crate::core::resolve::{resolve_borders, resolve_by_code};

/// Region choices offered by the region selector. `""` means all regions.
pub const REGIONS: [&str; 6] = ["", "Africa", "Americas", "Asia", "Europe", "Oceania"];

pub fn region_label(region: &str) -> &str {
    if region.is_empty() { "All regions" } else { region }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    List,
    Detail,
}

pub struct App {
    countries: Vec<Country>,
    filtered: Vec<Country>,
    selected: Option<Country>,
    view: View,
    search_input: String,
    region: String,
    search_error: Option<FilterError>,
    theme: Theme,
    phase: LoadPhase,
    status_message: String,
}

impl App {
    pub fn new(theme: Theme) -> Self {
        Self {
            countries: Vec::new(),
            filtered: Vec::new(),
            selected: None,
            view: View::List,
            search_input: String::new(),
            region: String::new(),
            search_error: None,
            theme,
            phase: LoadPhase::Empty,
            status_message: String::new(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn filtered(&self) -> &[Country] {
        &self.filtered
    }

    pub fn selected(&self) -> Option<&Country> {
        self.selected.as_ref()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn search_error(&self) -> Option<&FilterError> {
        self.search_error.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Border links for the current selection, labelled from the full list.
    pub fn selected_borders(&self) -> Vec<BorderLink> {
        self.selected
            .as_ref()
            .map(|c| resolve_borders(&self.countries, &c.borders))
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Setters
    // ------------------------------------------------------------------

    /// Replaces the canonical list and re-filters.
    ///
    /// The selection is re-resolved by code against the new list; if it is
    /// no longer present it is cleared and the view falls back to the list.
    pub fn set_countries(&mut self, countries: Vec<Country>) {
        self.countries = countries;
        let _ = self.refilter();

        if let Some(previous) = self.selected.take() {
            self.selected = resolve_by_code(&self.countries, &previous.code).cloned();
            if self.selected.is_none() {
                debug!("Selection {} not in new list, clearing", previous.code);
                self.view = View::List;
            }
        }
    }

    /// Stores the raw search text and re-filters.
    pub fn set_search_input(&mut self, input: String) -> Result<(), FilterError> {
        self.search_input = input;
        self.refilter()
    }

    pub fn set_region(&mut self, region: String) -> Result<(), FilterError> {
        self.region = region;
        self.refilter()
    }

    /// Advances to the next entry of [`REGIONS`]. Unknown regions restart
    /// at "all regions".
    pub fn cycle_region(&mut self) -> Result<(), FilterError> {
        let next = REGIONS
            .iter()
            .position(|r| *r == self.region)
            .map(|i| REGIONS[(i + 1) % REGIONS.len()])
            .unwrap_or(REGIONS[0]);
        self.set_region(next.to_string())
    }

    /// Recomputes `filtered`. On a rejected search the previous result is
    /// left exactly as it was.
    pub fn refilter(&mut self) -> Result<(), FilterError> {
        match filter::search(&self.countries, &self.search_input, &self.region) {
            Ok(matches) => {
                self.filtered = matches.into_iter().cloned().collect();
                self.search_error = None;
                Ok(())
            }
            Err(e) => {
                debug!("Search rejected: {:?}", e);
                self.search_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Applies a saved search. A term that no longer validates and a region
    /// outside [`REGIONS`] are dropped.
    pub fn restore_filters(&mut self, saved: SavedFilters) {
        if let Some(region) = saved.region {
            if REGIONS.contains(&region.as_str()) {
                self.region = region;
            } else {
                debug!("Ignoring saved region {:?}", region);
            }
        }
        if let Some(term) = saved.term {
            self.search_input = term;
        }
        if self.refilter().is_err() {
            debug!("Ignoring saved search term that is too long");
            self.search_input.clear();
            let _ = self.refilter();
        }
    }

    /// Opens the detail view for the country with `code`.
    /// Unknown codes leave the state unchanged.
    pub fn select_code(&mut self, code: &str) -> bool {
        match resolve_by_code(&self.countries, code) {
            Some(country) => {
                self.selected = Some(country.clone());
                self.view = View::Detail;
                true
            }
            None => {
                debug!("No country with code {:?}", code);
                false
            }
        }
    }

    /// Opens the detail view for the `index`-th visible country.
    pub fn select_filtered(&mut self, index: usize) -> bool {
        match self.filtered.get(index) {
            Some(country) => {
                self.selected = Some(country.clone());
                self.view = View::Detail;
                true
            }
            None => false,
        }
    }

    pub fn show_list(&mut self) {
        self.view = View::List;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn set_phase(&mut self, phase: LoadPhase) {
        self.phase = phase;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }
}
