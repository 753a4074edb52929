//! # Country List Component
//!
//! Scrollable table-like list of the visible countries: name, region,
//! capital and population per row.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CountryListState` lives in `TuiState`
//! - `CountryList` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use crate::core::country::Country;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::theme::Palette;
use crate::tui::event::TuiEvent;
use crate::tui::format::{format_population, name_or_unknown, or_dash, pad_str, truncate_str};

const REGION_WIDTH: usize = 10;
const CAPITAL_WIDTH: usize = 18;
const POPULATION_WIDTH: usize = 15;

/// Persistent state for the country list.
pub struct CountryListState {
    pub list_state: ListState,
    len: usize,
    /// Rows visible in the last render, used for PageUp/PageDown.
    page: usize,
}

impl Default for CountryListState {
    fn default() -> Self {
        Self::new()
    }
}

impl CountryListState {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default(),
            len: 0,
            page: 10,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Tells the list how many rows exist, clamping the cursor.
    pub fn sync(&mut self, len: usize) {
        self.len = len;
        match (len, self.list_state.selected()) {
            (0, _) => self.list_state.select(None),
            (_, None) => self.list_state.select(Some(0)),
            (_, Some(i)) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }

    /// Back to the top, e.g. after the filter changed.
    pub fn reset(&mut self) {
        self.list_state = ListState::default();
        self.sync(self.len);
    }

    fn move_to(&mut self, index: usize) {
        if self.len > 0 {
            self.list_state.select(Some(index.min(self.len - 1)));
        }
    }
}

/// Events emitted by the country list.
#[derive(Debug, PartialEq, Eq)]
pub enum CountryListEvent {
    Open(usize),
}

impl EventHandler for CountryListState {
    type Event = CountryListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<CountryListEvent> {
        let current = self.selected().unwrap_or(0);
        match event {
            TuiEvent::CursorUp => self.move_to(current.saturating_sub(1)),
            TuiEvent::CursorDown => self.move_to(current + 1),
            TuiEvent::PageUp => self.move_to(current.saturating_sub(self.page)),
            TuiEvent::PageDown => self.move_to(current + self.page),
            TuiEvent::Home => self.move_to(0),
            TuiEvent::End => self.move_to(self.len.saturating_sub(1)),
            TuiEvent::Submit => return self.list_state.selected().map(CountryListEvent::Open),
            _ => {}
        }
        None
    }
}

/// Transient render wrapper for the country list.
pub struct CountryList<'a> {
    state: &'a mut CountryListState,
    countries: &'a [Country],
    palette: Palette,
}

impl<'a> CountryList<'a> {
    pub fn new(
        state: &'a mut CountryListState,
        countries: &'a [Country],
        palette: Palette,
    ) -> Self {
        Self {
            state,
            countries,
            palette,
        }
    }

    fn row(&self, country: &Country, inner_width: usize) -> Line<'static> {
        let fixed = REGION_WIDTH + CAPITAL_WIDTH + POPULATION_WIDTH + 3;
        let name_width = inner_width.saturating_sub(fixed).max(8);
        let name = truncate_str(name_or_unknown(&country.name), name_width);
        let region = truncate_str(or_dash(&country.region), REGION_WIDTH);
        let capital = truncate_str(or_dash(&country.capital), CAPITAL_WIDTH);

        Line::from(vec![
            Span::styled(format!("{} ", pad_str(&name, name_width)), self.palette.label()),
            Span::styled(format!("{} ", pad_str(&region, REGION_WIDTH)), self.palette.dim()),
            Span::raw(format!("{} ", pad_str(&capital, CAPITAL_WIDTH))),
            Span::raw(format!(
                "{:>width$}",
                format_population(country.population),
                width = POPULATION_WIDTH
            )),
        ])
    }
}

impl Component for CountryList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.dim())
            .title(format!(" Countries ({}) ", self.countries.len()))
            .title_bottom(Line::from(" Enter Details ").centered())
            .padding(Padding::horizontal(1));

        if self.countries.is_empty() {
            let empty = Paragraph::new("No countries found.")
                .style(self.palette.dim())
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let inner = block.inner(area);
        self.state.page = (inner.height as usize).max(1);
        self.state.sync(self.countries.len());

        let items: Vec<ListItem> = self
            .countries
            .iter()
            .map(|c| ListItem::new(self.row(c, inner.width as usize)))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(self.palette.highlight());

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
