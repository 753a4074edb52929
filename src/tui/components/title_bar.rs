//! # TitleBar Component
//!
//! Top status bar: app name, where the data came from, the current load
//! status or search error, and the active theme.
//!
//! Purely presentational. All data arrives as props, so the bar can be
//! rendered and tested without an `App`:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(status, None, "live", Theme::Dark);
//! title_bar.render(frame, title_area);
//! ```
//!
//! A search error takes priority over the status message, since it is the
//! only feedback that the last keystroke was rejected.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::Theme;
use crate::tui::component::Component;
use crate::tui::components::theme::Palette;

pub struct TitleBar {
    pub status_message: String,
    pub error: Option<String>,
    /// Short load phase label, e.g. "live" or "offline".
    pub data_label: &'static str,
    pub theme: Theme,
}

impl TitleBar {
    pub fn new(
        status_message: String,
        error: Option<String>,
        data_label: &'static str,
        theme: Theme,
    ) -> Self {
        Self {
            status_message,
            error,
            data_label,
            theme,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let palette = Palette::for_theme(self.theme);
        let mut spans = vec![
            Span::styled("Terra", palette.label()),
            Span::styled(format!(" [{}]", self.data_label), Style::default().fg(palette.accent)),
        ];

        if let Some(error) = &self.error {
            spans.push(Span::styled(" | ", palette.dim()));
            spans.push(Span::styled(error.clone(), Style::default().fg(palette.error)));
        } else if !self.status_message.is_empty() {
            spans.push(Span::styled(" | ", palette.dim()));
            spans.push(Span::raw(self.status_message.clone()));
        }

        spans.push(Span::styled(format!(" | {}", self.theme.as_str()), palette.dim()));
        frame.render_widget(Line::from(spans), area);
    }
}
