use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph},
};

use crate::{
    app::state::{AppState, CategorySource},
    domain::weather::WeatherCategory,
    ui::theme::Theme,
};

const GRID_COLUMN_WIDTH: usize = 16;
const HINTS: &str = "←/→ cycle · d detect · q quit";

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let lines = card_lines(state.category(), state.source)
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let style = match i {
                0 => Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
                1 => Style::default().fg(theme.muted_text),
                _ if text == HINTS => Style::default().fg(theme.muted_text),
                _ => Style::default().fg(theme.text),
            };
            Line::styled(text, style)
        })
        .collect::<Vec<_>>();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title(" weather overlay ")
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(theme.card));

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Text rows of the card: heading, where the category came from, the
/// selector grid and key hints.
#[must_use]
pub fn card_lines(category: WeatherCategory, source: CategorySource) -> Vec<String> {
    let mut lines = vec![
        format!("{} {}", category.icon(), category.label()),
        source_text(source).to_string(),
        String::new(),
    ];

    let entries = WeatherCategory::ALL
        .iter()
        .map(|candidate| {
            let marker = if *candidate == category { '●' } else { '○' };
            format!("{marker} {} {}", candidate.index() + 1, candidate.label())
        })
        .collect::<Vec<_>>();
    for pair in entries.chunks(2) {
        match pair {
            [left, right] => lines.push(format!("{left:<GRID_COLUMN_WIDTH$}{right}")),
            [single] => lines.push(single.clone()),
            _ => {}
        }
    }

    lines.push(HINTS.to_string());
    lines
}

fn source_text(source: CategorySource) -> &'static str {
    match source {
        CategorySource::Detecting => "detecting local weather…",
        CategorySource::Detected => "detected from local forecast",
        CategorySource::Manual => "selected manually",
    }
}
