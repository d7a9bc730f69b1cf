use std::f32::consts::PI;

use rand::Rng;

use crate::{
    domain::weather::WeatherCategory,
    ui::{
        obstacle::ObstacleRect,
        surface::{DrawOp, Rgba, Surface, SurfaceSize, point, rgba},
    },
};

/// Horizontal inset excluding the card's rounded corners from collisions.
pub const CORNER_INSET_PX: f32 = 42.0;
/// Distance past a side edge after which a particle re-enters opposite.
pub const WRAP_MARGIN_PX: f32 = 50.0;
const WRAP_REENTRY_PX: f32 = 40.0;
/// Off-surface band new falling particles start in.
pub const SPAWN_BAND: Span = span(-250.0, -50.0);
const MOTE_LOOP_PX: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

#[must_use]
pub const fn span(min: f32, max: f32) -> Span {
    Span { min, max }
}

impl Span {
    pub fn sample(self, rng: &mut impl Rng) -> f32 {
        if self.min >= self.max {
            self.min
        } else {
            rng.random_range(self.min..=self.max)
        }
    }

    #[must_use]
    pub fn contains(self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// Anywhere on the surface.
    Anywhere,
    /// Inside [`SPAWN_BAND`], above the visible top edge.
    AboveTop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalExit {
    /// Drifting above the top re-enters at the bottom.
    LoopToBottom,
    /// Falling past the bottom respawns above the top.
    Respawn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    Passes,
    Settles,
    Splashes,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleStyle {
    Hidden,
    Dot(Rgba),
    Streak(Rgba),
    Gust(Rgba),
}

/// Everything that distinguishes one category's particles from another's.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub size: Span,
    pub fall: Span,
    pub drift: Span,
    pub opacity: Span,
    pub entry: Entry,
    pub exit: VerticalExit,
    pub landing: Landing,
    pub style: ParticleStyle,
}

const DEFAULT_OPACITY: Span = span(0.1, 0.4);
const WHITE: Rgba = rgba(255, 255, 255, 1.0);

const SNOW: Kinematics = Kinematics {
    size: span(2.0, 6.0),
    fall: span(4.0, 10.0),
    drift: span(2.0, 7.0),
    opacity: span(0.2, 0.8),
    entry: Entry::AboveTop,
    exit: VerticalExit::Respawn,
    landing: Landing::Settles,
    style: ParticleStyle::Dot(WHITE),
};

const LIGHT_SNOW: Kinematics = Kinematics {
    size: span(1.0, 3.5),
    fall: span(0.5, 2.0),
    drift: span(-0.5, 0.5),
    opacity: DEFAULT_OPACITY,
    entry: Entry::AboveTop,
    exit: VerticalExit::Respawn,
    landing: Landing::Settles,
    style: ParticleStyle::Dot(WHITE),
};

const RAIN: Kinematics = Kinematics {
    size: span(0.5, 1.5),
    fall: span(15.0, 25.0),
    drift: span(-1.0, -1.0),
    opacity: DEFAULT_OPACITY,
    entry: Entry::AboveTop,
    exit: VerticalExit::Respawn,
    landing: Landing::Splashes,
    style: ParticleStyle::Streak(rgba(180, 200, 240, 1.0)),
};

const STORM: Kinematics = Kinematics {
    size: span(0.5, 1.5),
    fall: span(22.0, 40.0),
    drift: span(-2.0, -2.0),
    opacity: DEFAULT_OPACITY,
    entry: Entry::AboveTop,
    exit: VerticalExit::Respawn,
    landing: Landing::Splashes,
    style: ParticleStyle::Streak(rgba(210, 210, 255, 1.0)),
};

const WIND: Kinematics = Kinematics {
    size: span(0.5, 2.5),
    fall: span(0.1, 0.3),
    drift: span(6.0, 14.0),
    opacity: DEFAULT_OPACITY,
    entry: Entry::AboveTop,
    exit: VerticalExit::Respawn,
    landing: Landing::Passes,
    style: ParticleStyle::Gust(rgba(200, 255, 255, 1.0)),
};

const CLEAR: Kinematics = Kinematics {
    size: span(0.4, 1.6),
    fall: span(-0.12, -0.02),
    drift: span(-0.05, 0.05),
    opacity: span(0.05, 0.15),
    entry: Entry::Anywhere,
    exit: VerticalExit::LoopToBottom,
    landing: Landing::Passes,
    style: ParticleStyle::Dot(WHITE),
};

const INERT: Kinematics = Kinematics {
    size: span(0.0, 0.0),
    fall: span(0.0, 0.0),
    drift: span(0.0, 0.0),
    opacity: DEFAULT_OPACITY,
    entry: Entry::AboveTop,
    exit: VerticalExit::Respawn,
    landing: Landing::Passes,
    style: ParticleStyle::Hidden,
};

#[must_use]
pub fn kinematics(category: WeatherCategory) -> &'static Kinematics {
    match category {
        WeatherCategory::Snow => &SNOW,
        WeatherCategory::LightSnow => &LIGHT_SNOW,
        WeatherCategory::Rain => &RAIN,
        WeatherCategory::Storm => &STORM,
        WeatherCategory::Wind => &WIND,
        WeatherCategory::Clear => &CLEAR,
        WeatherCategory::Cloudy => &INERT,
    }
}

#[must_use]
pub fn pool_size(category: WeatherCategory) -> usize {
    match category {
        WeatherCategory::Clear => 25,
        WeatherCategory::Storm => 140,
        WeatherCategory::LightSnow => 150,
        WeatherCategory::Rain => 200,
        WeatherCategory::Snow => 850,
        WeatherCategory::Wind | WeatherCategory::Cloudy => 90,
    }
}

/// A particle meeting the obstacle's top surface this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Impact {
    Settle {
        x: f32,
        top: f32,
        size: f32,
        opacity: f32,
    },
    Splash {
        x: f32,
        top: f32,
        opacity: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed_x: f32,
    pub speed_y: f32,
    pub opacity: f32,
}

impl Particle {
    pub fn spawn(category: WeatherCategory, surface: SurfaceSize, rng: &mut impl Rng) -> Self {
        let mut particle = Self {
            x: 0.0,
            y: 0.0,
            size: 0.0,
            speed_x: 0.0,
            speed_y: 0.0,
            opacity: 0.0,
        };
        particle.reset(category, surface, rng);
        particle
    }

    pub fn reset(&mut self, category: WeatherCategory, surface: SurfaceSize, rng: &mut impl Rng) {
        let k = kinematics(category);
        self.x = span(0.0, surface.width).sample(rng);
        self.y = match k.entry {
            Entry::Anywhere => span(0.0, surface.height).sample(rng),
            Entry::AboveTop => SPAWN_BAND.sample(rng),
        };
        self.size = k.size.sample(rng);
        self.speed_y = k.fall.sample(rng);
        self.speed_x = k.drift.sample(rng);
        self.opacity = k.opacity.sample(rng).clamp(0.0, 1.0);
    }

    /// Advances one tick. A particle that lands on the obstacle is recycled
    /// in place and the landing is reported back for the effect pools.
    pub fn update(
        &mut self,
        category: WeatherCategory,
        surface: SurfaceSize,
        obstacle: Option<ObstacleRect>,
        rng: &mut impl Rng,
    ) -> Option<Impact> {
        self.y += self.speed_y;
        self.x += self.speed_x;

        let k = kinematics(category);
        let impact = obstacle
            .filter(|rect| k.landing != Landing::Passes && self.crosses_top_of(rect))
            .map(|rect| match k.landing {
                Landing::Settles => Impact::Settle {
                    x: self.x,
                    top: rect.top,
                    size: self.size,
                    opacity: self.opacity,
                },
                Landing::Splashes | Landing::Passes => Impact::Splash {
                    x: self.x,
                    top: rect.top,
                    opacity: self.opacity,
                },
            });
        if impact.is_some() {
            self.reset(category, surface, rng);
        }

        match k.exit {
            VerticalExit::LoopToBottom => {
                if self.y < -MOTE_LOOP_PX {
                    self.y = surface.height + MOTE_LOOP_PX;
                }
            }
            VerticalExit::Respawn => {
                if self.y > surface.height {
                    self.reset(category, surface, rng);
                }
            }
        }

        if self.x > surface.width + WRAP_MARGIN_PX || self.x < -WRAP_MARGIN_PX {
            self.x = if self.speed_x > 0.0 {
                -WRAP_REENTRY_PX
            } else {
                surface.width + WRAP_REENTRY_PX
            };
        }

        impact
    }

    /// Captured only on the tick it passes the top edge, within one tick's
    /// fall distance, away from the rounded corners.
    fn crosses_top_of(&self, rect: &ObstacleRect) -> bool {
        self.x > rect.left + CORNER_INSET_PX
            && self.x < rect.right - CORNER_INSET_PX
            && self.y > rect.top
            && self.y < rect.top + self.speed_y
    }

    pub fn draw(&self, category: WeatherCategory, surface: &mut impl Surface) {
        let center = point(self.x, self.y);
        match kinematics(category).style {
            ParticleStyle::Hidden => {}
            ParticleStyle::Dot(color) => surface.draw(DrawOp::Circle {
                center,
                radius: self.size,
                color: color.with_alpha(self.opacity),
            }),
            ParticleStyle::Streak(color) => surface.draw(DrawOp::Stroke {
                from: center,
                to: point(
                    self.x + self.speed_x * 0.5,
                    self.y + self.speed_y * 0.5,
                ),
                width: 1.0,
                color: color.with_alpha(self.opacity),
            }),
            ParticleStyle::Gust(color) => surface.draw(DrawOp::Ellipse {
                center,
                radius_x: self.size * 5.0,
                radius_y: self.size * 0.5,
                rotation: PI / 12.0,
                color: color.with_alpha(self.opacity * 0.15),
            }),
        }
    }
}
