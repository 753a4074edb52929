//! # SearchBar Component
//!
//! Bordered input line showing the raw search text, with the active region
//! on the right. Editing happens in the event loop; this only renders.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::state::region_label;
use crate::tui::component::Component;
use crate::tui::components::theme::Palette;

pub struct SearchBar<'a> {
    pub input: &'a str,
    pub region: &'a str,
    pub palette: Palette,
    /// Whether the search box has focus (list view).
    pub focused: bool,
}

impl Component for SearchBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            self.palette.base().fg(self.palette.accent)
        } else {
            self.palette.dim()
        };
        let block = Block::bordered()
            .title(" Search ")
            .title_bottom(Line::from(" Ctrl+R region ").right_aligned())
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let label = format!("Region: {}", region_label(self.region));
        let label_width = label.width() as u16 + 1;
        let [input_area, region_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(label_width)]).areas(inner);

        let input_line = if self.input.is_empty() && !self.focused {
            Line::from(Span::styled("Search for a country...", self.palette.dim()))
        } else {
            Line::from(self.input)
        };
        frame.render_widget(Paragraph::new(input_line), input_area);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(label, self.palette.label())).right_aligned()),
            region_area,
        );

        if self.focused {
            let cursor_x = input_area.x + (self.input.width() as u16).min(input_area.width);
            frame.set_cursor_position(Position::new(cursor_x, input_area.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(input: &str, region: &str, focused: bool) -> String {
        let backend = TestBackend::new(60, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut bar = SearchBar {
            input,
            region,
            palette: Palette::for_theme(Theme::Dark),
            focused,
        };
        terminal
            .draw(|f| {
                bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_shows_input_and_region() {
        let text = render_text("fra", "Europe", true);
        assert!(text.contains("Search"));
        assert!(text.contains("fra"));
        assert!(text.contains("Region: Europe"));
    }

    #[test]
    fn test_empty_region_reads_all() {
        let text = render_text("", "", true);
        assert!(text.contains("Region: All regions"));
    }

    #[test]
    fn test_placeholder_when_unfocused_and_empty() {
        let text = render_text("", "", false);
        assert!(text.contains("Search for a country..."));
    }
}
