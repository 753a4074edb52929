//! # Load Sequencing
//!
//! Local first, remote enhances, remote failure is non-fatal.
//!
//! ```text
//! Empty ──▶ LocalLoading ──┬─▶ LocalLoaded(Success)  ──┐
//!                          └─▶ LocalLoaded(Fallback) ──┴─▶ RemoteLoading ──┬─▶ RemoteLoaded(Success)
//!                                                                          └─▶ RemoteLoaded(KeepLocal)
//! ```
//!
//! Transitions are applied by `update()` in action.rs; this module holds
//! the phase type, the status strings and the fetch-then-normalize step the
//! background tasks run.

use log::{info, warn};

use crate::core::country::Country;
use crate::core::normalize::normalize_all;
use crate::data::{CountrySource, SourceError};

pub const STATUS_LOCAL_LOADING: &str = "Loading local data.";
pub const STATUS_LOCAL_SUCCESS: &str = "Loaded local data while updating from API.";
pub const STATUS_LOCAL_FALLBACK: &str = "Using built-in sample data.";
pub const STATUS_REMOTE_SUCCESS: &str = "Loaded from API.";
pub const STATUS_REMOTE_FAILED: &str = "API unavailable; showing local data.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalOutcome {
    Success,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOutcome {
    Success,
    KeepLocal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Empty,
    LocalLoading,
    LocalLoaded(LocalOutcome),
    RemoteLoading,
    RemoteLoaded(RemoteOutcome),
}

impl LoadPhase {
    /// True once both stages have settled.
    pub fn is_settled(&self) -> bool {
        matches!(self, LoadPhase::RemoteLoaded(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoadPhase::Empty => "empty",
            LoadPhase::LocalLoading => "loading local",
            LoadPhase::LocalLoaded(LocalOutcome::Success) => "local",
            LoadPhase::LocalLoaded(LocalOutcome::Fallback) => "sample",
            LoadPhase::RemoteLoading => "updating",
            LoadPhase::RemoteLoaded(RemoteOutcome::Success) => "live",
            LoadPhase::RemoteLoaded(RemoteOutcome::KeepLocal) => "offline",
        }
    }
}

/// The placeholder list used when the local file is missing or unreadable,
/// so the list is never empty after startup.
pub fn fallback_seed() -> Vec<Country> {
    vec![Country {
        code: "FAL".to_string(),
        name: "Fallback Country".to_string(),
        population: 1_000_000,
        region: "Nowhere".to_string(),
        capital: "Example City".to_string(),
        flag_alt: "Placeholder flag".to_string(),
        ..Default::default()
    }]
}

/// Fetches one payload from `source` and normalizes it.
pub async fn fetch_countries(source: &dyn CountrySource) -> Result<Vec<Country>, SourceError> {
    match source.fetch().await {
        Ok(records) => {
            let total = records.len();
            let countries = normalize_all(records);
            info!(
                "Source '{}' yielded {} countries ({} records)",
                source.name(),
                countries.len(),
                total
            );
            Ok(countries)
        }
        Err(e) => {
            warn!("Source '{}' failed: {}", source.name(), e);
            Err(e)
        }
    }
}
