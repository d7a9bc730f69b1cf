pub mod effects;
pub mod layout;
pub mod obstacle;
pub mod overlay;
pub mod particles;
pub mod sunshine;
pub mod surface;
pub mod theme;
pub mod widgets;

use ratatui::{
    Frame,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
    app::state::AppState,
    ui::{
        layout::{MIN_VIEWPORT_HEIGHT, MIN_VIEWPORT_WIDTH, card_rect},
        theme::theme_for,
        widgets::overlay::OverlayLayer,
    },
};

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let theme = theme_for(state.category());

    frame.render_widget(OverlayLayer::new(&state.canvas, &theme), area);

    match card_rect(area) {
        Some(card) => widgets::card::render(frame, card, state, &theme),
        None => {
            let warning = Paragraph::new(format!(
                "Terminal too small. Resize to at least {MIN_VIEWPORT_WIDTH}x{MIN_VIEWPORT_HEIGHT}."
            ))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("weather-overlay"));
            frame.render_widget(warning, area);
        }
    }
}
