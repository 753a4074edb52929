//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as props:
//! - `TitleBar`: App name, load status or search error, theme
//! - `SearchBar`: Search text and active region
//!
//! ### Stateful Components (Event-Driven)
//!
//! Persistent state lives in `TuiState`; a transient wrapper borrows it
//! each frame:
//! - `CountryListState` / `CountryList`: cursor over the visible countries
//! - `CountryDetailState` / `CountryDetail`: cursor over the border links
//!
//! Components receive external data as props, never the whole `App`:
//!
//! ```rust,ignore
//! CountryList::new(&mut tui.country_list, app.filtered(), palette).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── theme.rs           (dark / light palettes)
//! ├── title_bar.rs       (top status bar)
//! ├── search_bar.rs      (search input + region)
//! ├── country_list.rs    (list view)
//! └── country_detail.rs  (detail view with border links)
//! ```

pub mod country_detail;
pub mod country_list;
pub mod search_bar;
pub mod theme;
mod title_bar;

pub use country_detail::{CountryDetail, CountryDetailState, DetailEvent};
pub use country_list::{CountryList, CountryListEvent, CountryListState};
pub use search_bar::SearchBar;
pub use theme::Palette;
pub use title_bar::TitleBar;
