use ratatui::layout::Rect;

pub const MIN_VIEWPORT_WIDTH: u16 = 30;
pub const MIN_VIEWPORT_HEIGHT: u16 = 12;
pub const CARD_MAX_WIDTH: u16 = 46;
pub const CARD_HEIGHT: u16 = 10;

/// Where the utility card sits: horizontally centred, a little below the
/// middle so precipitation has room to fall before reaching it.
#[must_use]
pub fn card_rect(area: Rect) -> Option<Rect> {
    if area.width < MIN_VIEWPORT_WIDTH || area.height < MIN_VIEWPORT_HEIGHT {
        return None;
    }
    let width = CARD_MAX_WIDTH.min(area.width - 4);
    let height = CARD_HEIGHT.min(area.height - 2);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) * 3 / 5;
    Some(Rect::new(x, y, width, height))
}
