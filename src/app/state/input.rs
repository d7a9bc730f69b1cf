use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::weather::WeatherCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyAction {
    Select(WeatherCategory),
    Cycle(isize),
    Detect,
    Quit,
}

pub(crate) fn key_action(key: KeyEvent) -> Option<KeyAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&'c'))
    {
        return Some(KeyAction::Quit);
    }
    match key.code {
        KeyCode::Esc => Some(KeyAction::Quit),
        KeyCode::Left => Some(KeyAction::Cycle(-1)),
        KeyCode::Right => Some(KeyAction::Cycle(1)),
        _ => command_char(key).and_then(char_action),
    }
}

fn command_char(key: KeyEvent) -> Option<char> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
    {
        return None;
    }
    if let KeyCode::Char(ch) = key.code {
        Some(ch.to_ascii_lowercase())
    } else {
        None
    }
}

fn char_action(ch: char) -> Option<KeyAction> {
    match ch {
        'q' => Some(KeyAction::Quit),
        'd' => Some(KeyAction::Detect),
        '1'..='7' => ch
            .to_digit(10)
            .and_then(|digit| WeatherCategory::from_index(digit as usize - 1))
            .map(KeyAction::Select),
        _ => None,
    }
}
