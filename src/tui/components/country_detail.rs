//! # Country Detail Component
//!
//! Full record of the selected country plus a row of border links. The
//! highlighted link is followed with Enter.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CountryDetailState` lives in `TuiState` (which link is highlighted)
//! - `CountryDetail` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::core::country::{BorderLink, Country};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::theme::Palette;
use crate::tui::event::TuiEvent;
use crate::tui::format::{format_population, join_or_dash, name_or_unknown, or_dash};

/// Persistent state for the detail view.
#[derive(Debug, Default)]
pub struct CountryDetailState {
    cursor: usize,
    link_count: usize,
}

impl CountryDetailState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Tells the view how many border links exist, clamping the cursor.
    pub fn sync(&mut self, link_count: usize) {
        self.link_count = link_count;
        if self.cursor >= link_count {
            self.cursor = link_count.saturating_sub(1);
        }
    }

    /// Highlight the first link, e.g. when a new country is opened.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

/// Events emitted by the detail view.
#[derive(Debug, PartialEq, Eq)]
pub enum DetailEvent {
    /// Follow the border link at this index.
    Follow(usize),
    Back,
}

impl EventHandler for CountryDetailState {
    type Event = DetailEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<DetailEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::Backspace => Some(DetailEvent::Back),
            TuiEvent::CursorLeft | TuiEvent::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            TuiEvent::CursorRight | TuiEvent::CursorDown => {
                if self.cursor + 1 < self.link_count {
                    self.cursor += 1;
                }
                None
            }
            TuiEvent::NextLink => {
                if self.link_count > 0 {
                    self.cursor = (self.cursor + 1) % self.link_count;
                }
                None
            }
            TuiEvent::Submit if self.link_count > 0 => Some(DetailEvent::Follow(self.cursor)),
            _ => None,
        }
    }
}

/// Transient render wrapper for the detail view.
pub struct CountryDetail<'a> {
    state: &'a CountryDetailState,
    country: &'a Country,
    borders: &'a [BorderLink],
    palette: Palette,
}

impl<'a> CountryDetail<'a> {
    pub fn new(
        state: &'a CountryDetailState,
        country: &'a Country,
        borders: &'a [BorderLink],
        palette: Palette,
    ) -> Self {
        Self {
            state,
            country,
            borders,
            palette,
        }
    }

    fn field(&self, label: &str, value: String) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{label}: "), self.palette.label()),
            Span::raw(value),
        ])
    }

    fn border_line(&self) -> Line<'static> {
        let mut spans = vec![Span::styled("Border Countries: ", self.palette.label())];
        if self.borders.is_empty() {
            spans.push(Span::raw("None"));
            return Line::from(spans);
        }
        for (i, link) in self.borders.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            let style = if i == self.state.cursor() {
                self.palette.highlight()
            } else {
                self.palette.base().fg(self.palette.accent)
            };
            spans.push(Span::styled(format!("[{}]", link.name), style));
        }
        Line::from(spans)
    }

    fn flag_text(&self) -> String {
        let c = self.country;
        match (c.flag_alt.is_empty(), c.flag.is_empty()) {
            (false, _) => c.flag_alt.clone(),
            (true, false) => c.flag.clone(),
            (true, true) => "-".to_string(),
        }
    }
}

impl Component for CountryDetail<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let c = self.country;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.dim())
            .title(format!(" {} ", name_or_unknown(&c.name)))
            .title_bottom(Line::from(" ←/→ Tab Borders  Enter Open  Esc Back ").centered())
            .padding(Padding::new(2, 2, 1, 0));

        let lines = vec![
            self.field("Native Name", or_dash(&c.native_name).to_string()),
            self.field("Population", format_population(c.population)),
            self.field("Region", or_dash(&c.region).to_string()),
            self.field("Sub Region", or_dash(&c.subregion).to_string()),
            self.field("Capital", or_dash(&c.capital).to_string()),
            Line::default(),
            self.field("Top Level Domain", join_or_dash(&c.tld)),
            self.field("Currencies", join_or_dash(&c.currencies)),
            self.field("Languages", join_or_dash(&c.languages)),
            self.field("Flag", self.flag_text()),
            Line::default(),
            self.border_line(),
        ];

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
