use ratatui::layout::Rect;

use crate::ui::{
    layout::card_rect,
    surface::{CELL_HEIGHT_PX, CELL_WIDTH_PX},
};

/// Snapshot of the collidable element's bounds in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleRect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
}

impl ObstacleRect {
    /// Bounds of a terminal-cell rectangle. The top edge sits half a cell above
    /// the border row so settled flakes rest visibly on the card.
    #[must_use]
    pub fn from_cells(area: Rect) -> Self {
        Self {
            left: f32::from(area.x) * CELL_WIDTH_PX,
            right: f32::from(area.right()) * CELL_WIDTH_PX,
            top: (f32::from(area.y) - 0.5) * CELL_HEIGHT_PX,
        }
    }
}

/// Live source of the obstacle bounds, polled once per tick.
pub trait ObstacleSource {
    fn current_rect(&self) -> Option<ObstacleRect>;
}

impl ObstacleSource for Option<ObstacleRect> {
    fn current_rect(&self) -> Option<ObstacleRect> {
        *self
    }
}

/// Tracks where the utility card is laid out in the current viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardTracker {
    viewport: Rect,
}

impl CardTracker {
    #[must_use]
    pub fn new(viewport: Rect) -> Self {
        Self { viewport }
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    #[must_use]
    pub fn card_area(&self) -> Option<Rect> {
        card_rect(self.viewport)
    }
}

impl ObstacleSource for CardTracker {
    fn current_rect(&self) -> Option<ObstacleRect> {
        self.card_area().map(ObstacleRect::from_cells)
    }
}
