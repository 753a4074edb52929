//! # Core Application Logic
//!
//! This module contains Terra's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!   data::sources ──► normalize ──► Vec<Country>
//!                                       │
//!                                       ▼
//!   Action ──► update() ──► App { countries, filtered, selected, ... }
//!                │                 │
//!                ▼                 └── filter / resolve
//!             Effect
//!   (fetch, persist a preference)
//! ```
//!
//! ## Modules
//!
//! - [`country`]: The canonical `Country` record
//! - [`normalize`]: Raw source records → `Country`
//! - [`filter`]: Search term + region → visible subset
//! - [`resolve`]: Code → country, border codes → links
//! - [`load`]: Load phases, status messages, fallback seed
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`prefs`]: Theme and filter persistence
//! - [`config`]: Config file, env and CLI resolution

pub mod action;
pub mod config;
pub mod country;
pub mod filter;
pub mod load;
pub mod normalize;
pub mod prefs;
pub mod resolve;
pub mod state;
