#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::ui::{
    surface::{PixelCanvas, Rgba},
    theme::Theme,
};

/// Paints the sky gradient and the overlay canvas on top of it using
/// half-block cells: the glyph carries the upper pixel, the background the lower.
pub struct OverlayLayer<'a> {
    pub canvas: &'a PixelCanvas,
    pub top: Color,
    pub bottom: Color,
}

impl<'a> OverlayLayer<'a> {
    #[must_use]
    pub fn new(canvas: &'a PixelCanvas, theme: &Theme) -> Self {
        Self {
            canvas,
            top: theme.top,
            bottom: theme.bottom,
        }
    }
}

impl Widget for OverlayLayer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let sky_top = color_to_rgb(self.top);
        let sky_bottom = color_to_rgb(self.bottom);
        let raster_rows = usize::from(area.height) * 2;

        for y in area.top()..area.bottom() {
            let upper_row = usize::from(y - area.top()) * 2;
            let lower_row = upper_row + 1;
            let upper_sky = lerp_rgb(sky_top, sky_bottom, gradient_ratio(upper_row, raster_rows));
            let lower_sky = lerp_rgb(sky_top, sky_bottom, gradient_ratio(lower_row, raster_rows));

            for x in area.left()..area.right() {
                let column = usize::from(x - area.left());
                let upper = composite(self.canvas.pixel(column, upper_row), upper_sky);
                let lower = composite(self.canvas.pixel(column, lower_row), lower_sky);
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char('▀').set_fg(upper).set_bg(lower);
                }
            }
        }
    }
}

fn gradient_ratio(row: usize, rows: usize) -> f32 {
    if rows <= 1 {
        0.0
    } else {
        row as f32 / (rows - 1) as f32
    }
}

fn color_to_rgb(c: Color) -> (f32, f32, f32) {
    match c {
        Color::Rgb(r, g, b) => (f32::from(r), f32::from(g), f32::from(b)),
        Color::White => (255., 255., 255.),
        Color::Gray => (170., 170., 170.),
        Color::DarkGray => (85., 85., 85.),
        _ => (0., 0., 0.),
    }
}

fn lerp_rgb(a: (f32, f32, f32), b: (f32, f32, f32), t: f32) -> (f32, f32, f32) {
    (
        a.0 + (b.0 - a.0) * t,
        a.1 + (b.1 - a.1) * t,
        a.2 + (b.2 - a.2) * t,
    )
}

/// Source-over of an overlay pixel onto an opaque sky colour.
fn composite(px: Rgba, sky: (f32, f32, f32)) -> Color {
    let a = px.a.clamp(0.0, 1.0);
    let mix = |s: u8, d: f32| (f32::from(s) * a + d * (1.0 - a)).round().clamp(0.0, 255.0) as u8;
    Color::Rgb(mix(px.r, sky.0), mix(px.g, sky.1), mix(px.b, sky.2))
}
