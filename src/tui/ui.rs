use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::text::Line;
use ratatui::widgets::Block;

use crate::core::state::{App, View};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{CountryDetail, CountryList, Palette, SearchBar, TitleBar};

const LIST_HELP: &str =
    "Type to search  Ctrl+U Clear  Ctrl+R Region  ↑/↓ Move  Enter Open  Ctrl+T Theme  Ctrl+Q Quit";
const DETAIL_HELP: &str = "←/→ Tab Borders  Enter Open  Esc Back  Ctrl+T Theme  Ctrl+Q Quit";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(3), Min(0), Length(1)]);
    let [title_area, search_area, body_area, help_area] = layout.areas(frame.area());

    let palette = Palette::for_theme(app.theme());
    frame.render_widget(Block::new().style(palette.base()), frame.area());

    let error = app.search_error().map(|e| e.to_string());
    TitleBar::new(
        app.status_message().to_string(),
        error,
        app.phase().label(),
        app.theme(),
    )
    .render(frame, title_area);

    SearchBar {
        input: app.search_input(),
        region: app.region(),
        palette,
        focused: app.view() == View::List,
    }
    .render(frame, search_area);

    let help = match (app.view(), app.selected()) {
        (View::Detail, Some(country)) => {
            let borders = app.selected_borders();
            tui.detail.sync(borders.len());
            CountryDetail::new(&tui.detail, country, &borders, palette).render(frame, body_area);
            DETAIL_HELP
        }
        _ => {
            CountryList::new(&mut tui.country_list, app.filtered(), palette)
                .render(frame, body_area);
            LIST_HELP
        }
    };

    frame.render_widget(Line::styled(help, palette.dim()), help_area);
}
