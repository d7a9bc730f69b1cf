#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

//! Drawing surface the overlay paints into.
//!
//! Coordinates are logical pixels. A terminal cell covers
//! [`CELL_WIDTH_PX`]×[`CELL_HEIGHT_PX`] of them; [`PixelCanvas`] keeps one raster
//! pixel per cell column and two per cell row so the result can be shown with
//! half-block glyphs.

pub const CELL_WIDTH_PX: f32 = 8.0;
pub const CELL_HEIGHT_PX: f32 = 16.0;
const RASTER_PX_WIDTH: f32 = CELL_WIDTH_PX;
const RASTER_PX_HEIGHT: f32 = CELL_HEIGHT_PX / 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

#[must_use]
pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Rgba {
    Rgba { r, g, b, a }
}

impl Rgba {
    pub const TRANSPARENT: Self = rgba(0, 0, 0, 0.0);

    #[must_use]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    fn lerp(self, other: Self, t: f32) -> Self {
        let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[must_use]
pub const fn point(x: f32, y: f32) -> Point {
    Point { x, y }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    /// Logical size of a terminal viewport measured in cells.
    #[must_use]
    pub fn from_cells(columns: u16, rows: u16) -> Self {
        Self {
            width: f32::from(columns) * CELL_WIDTH_PX,
            height: f32::from(rows) * CELL_HEIGHT_PX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

#[must_use]
pub const fn stop(offset: f32, color: Rgba) -> ColorStop {
    ColorStop { offset, color }
}

/// Samples a gradient at `t`; stops must be sorted by offset.
#[must_use]
pub fn sample_gradient(stops: &[ColorStop], t: f32) -> Rgba {
    let Some(first) = stops.first() else {
        return Rgba::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        if t <= to.offset {
            let span = (to.offset - from.offset).max(f32::EPSILON);
            return from.color.lerp(to.color, (t - from.offset) / span);
        }
    }
    stops.last().map_or(Rgba::TRANSPARENT, |last| last.color)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientClip {
    /// Paint every pixel of the surface, continuing the last stop outside the radius.
    Surface,
    /// Paint only inside the gradient radius.
    Disc,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    FillRect {
        origin: Point,
        width: f32,
        height: f32,
        color: Rgba,
    },
    Circle {
        center: Point,
        radius: f32,
        color: Rgba,
    },
    Stroke {
        from: Point,
        to: Point,
        width: f32,
        color: Rgba,
    },
    Ellipse {
        center: Point,
        radius_x: f32,
        radius_y: f32,
        rotation: f32,
        color: Rgba,
    },
    RadialGradient {
        center: Point,
        radius: f32,
        stops: Vec<ColorStop>,
        clip: GradientClip,
    },
    /// Tapered quad rotated about `origin`, filled by a gradient along its length.
    Ray {
        origin: Point,
        angle: f32,
        length: f32,
        near_half_width: f32,
        far_half_width: f32,
        stops: Vec<ColorStop>,
    },
}

pub trait Surface {
    fn size(&self) -> SurfaceSize;
    fn resize(&mut self, size: SurfaceSize);
    fn draw(&mut self, op: DrawOp);
}

#[derive(Debug, Clone)]
pub struct PixelCanvas {
    size: SurfaceSize,
    columns: usize,
    rows: usize,
    pixels: Vec<Rgba>,
}

impl PixelCanvas {
    #[must_use]
    pub fn new(size: SurfaceSize) -> Self {
        let mut canvas = Self {
            size: SurfaceSize::default(),
            columns: 0,
            rows: 0,
            pixels: Vec::new(),
        };
        canvas.resize(size);
        canvas
    }

    /// Raster dimensions as (columns, rows).
    #[must_use]
    pub fn raster_size(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    #[must_use]
    pub fn pixel(&self, column: usize, row: usize) -> Rgba {
        if column >= self.columns || row >= self.rows {
            return Rgba::TRANSPARENT;
        }
        self.pixels[row * self.columns + column]
    }

    /// Number of raster pixels with any coverage.
    #[must_use]
    pub fn painted_pixels(&self) -> usize {
        self.pixels.iter().filter(|px| px.a > 0.0).count()
    }

    fn pixel_center(column: usize, row: usize) -> Point {
        point(
            (column as f32 + 0.5) * RASTER_PX_WIDTH,
            (row as f32 + 0.5) * RASTER_PX_HEIGHT,
        )
    }

    fn raster_index(&self, p: Point) -> Option<(usize, usize)> {
        if p.x < 0.0 || p.y < 0.0 {
            return None;
        }
        let column = (p.x / RASTER_PX_WIDTH) as usize;
        let row = (p.y / RASTER_PX_HEIGHT) as usize;
        (column < self.columns && row < self.rows).then_some((column, row))
    }

    /// Inclusive raster bounds covering the logical box, clamped to the canvas.
    fn raster_span(&self, min: Point, max: Point) -> Option<(usize, usize, usize, usize)> {
        if self.columns == 0 || self.rows == 0 {
            return None;
        }
        let last_col = (self.columns - 1) as f32;
        let last_row = (self.rows - 1) as f32;
        let x0 = (min.x / RASTER_PX_WIDTH).floor();
        let x1 = (max.x / RASTER_PX_WIDTH).floor();
        let y0 = (min.y / RASTER_PX_HEIGHT).floor();
        let y1 = (max.y / RASTER_PX_HEIGHT).floor();
        if x1 < 0.0 || y1 < 0.0 || x0 > last_col || y0 > last_row {
            return None;
        }
        Some((
            x0.max(0.0) as usize,
            x1.min(last_col) as usize,
            y0.max(0.0) as usize,
            y1.min(last_row) as usize,
        ))
    }

    fn blend(&mut self, column: usize, row: usize, src: Rgba) {
        let alpha = src.a.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let index = row * self.columns + column;
        let dst = self.pixels[index];
        let out_a = alpha + dst.a * (1.0 - alpha);
        let channel = |s: u8, d: u8| {
            let value = (f32::from(s) * alpha + f32::from(d) * dst.a * (1.0 - alpha)) / out_a;
            value.round().clamp(0.0, 255.0) as u8
        };
        self.pixels[index] = Rgba {
            r: channel(src.r, dst.r),
            g: channel(src.g, dst.g),
            b: channel(src.b, dst.b),
            a: out_a,
        };
    }

    /// Fills every raster pixel whose centre passes `inside`; when none do,
    /// the pixel under `anchor` is painted so sub-pixel shapes stay visible.
    fn fill_shape(
        &mut self,
        min: Point,
        max: Point,
        anchor: Point,
        color: Rgba,
        inside: impl Fn(Point) -> bool,
    ) {
        let mut painted = false;
        if let Some((x0, x1, y0, y1)) = self.raster_span(min, max) {
            for row in y0..=y1 {
                for column in x0..=x1 {
                    if inside(Self::pixel_center(column, row)) {
                        self.blend(column, row, color);
                        painted = true;
                    }
                }
            }
        }
        if !painted && let Some((column, row)) = self.raster_index(anchor) {
            self.blend(column, row, color);
        }
    }

    fn fill_rect(&mut self, origin: Point, width: f32, height: f32, color: Rgba) {
        let max = point(origin.x + width, origin.y + height);
        let Some((x0, x1, y0, y1)) = self.raster_span(origin, max) else {
            return;
        };
        for row in y0..=y1 {
            for column in x0..=x1 {
                let c = Self::pixel_center(column, row);
                if c.x >= origin.x && c.x < max.x && c.y >= origin.y && c.y < max.y {
                    self.blend(column, row, color);
                }
            }
        }
    }

    fn stroke(&mut self, from: Point, to: Point, width: f32, color: Rgba) {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let length = dx.hypot(dy);
        let step = RASTER_PX_WIDTH.min(RASTER_PX_HEIGHT) * 0.5;
        let samples = (length / step).ceil().max(1.0) as usize;
        let half = width * 0.5;
        let mut last = None;
        for i in 0..=samples {
            let t = i as f32 / samples as f32;
            let p = point(from.x + dx * t, from.y + dy * t);
            if half > RASTER_PX_WIDTH.min(RASTER_PX_HEIGHT) {
                let hit = |c: Point| (c.x - p.x).hypot(c.y - p.y) <= half;
                let corner = point(half, half);
                self.fill_shape(
                    point(p.x - corner.x, p.y - corner.y),
                    point(p.x + corner.x, p.y + corner.y),
                    p,
                    color,
                    hit,
                );
                continue;
            }
            let cell = self.raster_index(p);
            if let Some((column, row)) = cell
                && cell != last
            {
                self.blend(column, row, color);
                last = cell;
            }
        }
    }

    fn radial_gradient(&mut self, center: Point, radius: f32, stops: &[ColorStop], clip: GradientClip) {
        if radius <= 0.0 {
            return;
        }
        let (min, max) = match clip {
            GradientClip::Surface => (point(0.0, 0.0), point(self.size.width, self.size.height)),
            GradientClip::Disc => (
                point(center.x - radius, center.y - radius),
                point(center.x + radius, center.y + radius),
            ),
        };
        let Some((x0, x1, y0, y1)) = self.raster_span(min, max) else {
            return;
        };
        for row in y0..=y1 {
            for column in x0..=x1 {
                let c = Self::pixel_center(column, row);
                let t = (c.x - center.x).hypot(c.y - center.y) / radius;
                if clip == GradientClip::Disc && t > 1.0 {
                    continue;
                }
                self.blend(column, row, sample_gradient(stops, t.min(1.0)));
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn ray(
        &mut self,
        origin: Point,
        angle: f32,
        length: f32,
        near_half_width: f32,
        far_half_width: f32,
        stops: &[ColorStop],
    ) {
        if length <= 0.0 {
            return;
        }
        let (sin, cos) = angle.sin_cos();
        let reach = length.hypot(far_half_width.max(near_half_width));
        let min = point(origin.x - reach, origin.y - reach);
        let max = point(origin.x + reach, origin.y + reach);
        let Some((x0, x1, y0, y1)) = self.raster_span(min, max) else {
            return;
        };
        for row in y0..=y1 {
            for column in x0..=x1 {
                let c = Self::pixel_center(column, row);
                let (dx, dy) = (c.x - origin.x, c.y - origin.y);
                let along = dx * cos + dy * sin;
                let across = -dx * sin + dy * cos;
                if !(0.0..=length).contains(&along) {
                    continue;
                }
                let t = along / length;
                let half = near_half_width + (far_half_width - near_half_width) * t;
                if across.abs() <= half {
                    self.blend(column, row, sample_gradient(stops, t));
                }
            }
        }
    }
}

impl Surface for PixelCanvas {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.columns = (size.width.max(0.0) / RASTER_PX_WIDTH).ceil() as usize;
        self.rows = (size.height.max(0.0) / RASTER_PX_HEIGHT).ceil() as usize;
        self.pixels = vec![Rgba::TRANSPARENT; self.columns * self.rows];
    }

    fn draw(&mut self, op: DrawOp) {
        match op {
            DrawOp::Clear => self.pixels.fill(Rgba::TRANSPARENT),
            DrawOp::FillRect {
                origin,
                width,
                height,
                color,
            } => self.fill_rect(origin, width, height, color),
            DrawOp::Circle {
                center,
                radius,
                color,
            } => {
                let r = radius.max(0.0);
                self.fill_shape(
                    point(center.x - r, center.y - r),
                    point(center.x + r, center.y + r),
                    center,
                    color,
                    |c| (c.x - center.x).hypot(c.y - center.y) <= r,
                );
            }
            DrawOp::Stroke {
                from,
                to,
                width,
                color,
            } => self.stroke(from, to, width, color),
            DrawOp::Ellipse {
                center,
                radius_x,
                radius_y,
                rotation,
                color,
            } => {
                if radius_x <= 0.0 || radius_y <= 0.0 {
                    return;
                }
                let (sin, cos) = rotation.sin_cos();
                let reach = radius_x.max(radius_y);
                self.fill_shape(
                    point(center.x - reach, center.y - reach),
                    point(center.x + reach, center.y + reach),
                    center,
                    color,
                    |c| {
                        let (dx, dy) = (c.x - center.x, c.y - center.y);
                        let u = (dx * cos + dy * sin) / radius_x;
                        let v = (-dx * sin + dy * cos) / radius_y;
                        u * u + v * v <= 1.0
                    },
                );
            }
            DrawOp::RadialGradient {
                center,
                radius,
                stops,
                clip,
            } => self.radial_gradient(center, radius, &stops, clip),
            DrawOp::Ray {
                origin,
                angle,
                length,
                near_half_width,
                far_half_width,
                stops,
            } => self.ray(
                origin,
                angle,
                length,
                near_half_width,
                far_half_width,
                &stops,
            ),
        }
    }
}
