use rand::Rng;

use crate::ui::{
    particles::Impact,
    surface::{DrawOp, Surface, point, rgba},
};

/// Downward slide of settled snow per tick.
pub const LANDED_SLIDE_PX: f32 = 0.25;
/// Landed flakes fade over roughly their last this-many frames.
pub const LANDED_FADE_FRAMES: f32 = 50.0;
/// Splashes fade over roughly their last this-many frames.
pub const SPLASH_FADE_FRAMES: f32 = 20.0;
pub const SPLASHES_PER_DROP: usize = 3;
const SPLASH_GRAVITY: f32 = 0.2;
const SPLASH_RADIUS: f32 = 0.8;

#[derive(Debug, Clone, PartialEq)]
pub struct LandedParticle {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub opacity: f32,
    pub life: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Splash {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub life: f32,
    pub opacity: f32,
}

/// Short-lived marks left behind by collisions. Members are appended on
/// impact and only ever removed once their life runs out.
#[derive(Debug, Default)]
pub struct EffectPools {
    landed: Vec<LandedParticle>,
    splashes: Vec<Splash>,
}

impl EffectPools {
    #[must_use]
    pub fn landed(&self) -> &[LandedParticle] {
        &self.landed
    }

    #[must_use]
    pub fn splashes(&self) -> &[Splash] {
        &self.splashes
    }

    pub fn clear(&mut self) {
        self.landed.clear();
        self.splashes.clear();
    }

    pub fn absorb(&mut self, impact: Impact, rng: &mut impl Rng) {
        match impact {
            Impact::Settle {
                x,
                top,
                size,
                opacity,
            } => self.landed.push(LandedParticle {
                x,
                y: top + rng.random_range(0.0..=3.0),
                size,
                opacity,
                life: rng.random_range(150.0..=400.0),
            }),
            Impact::Splash { x, top, opacity } => {
                for _ in 0..SPLASHES_PER_DROP {
                    self.splashes.push(Splash {
                        x,
                        y: top,
                        vx: rng.random_range(-2.0..=2.0),
                        vy: -rng.random_range(0.0..=3.0),
                        life: rng.random_range(15.0..=25.0),
                        opacity,
                    });
                }
            }
        }
    }

    /// Draws every member at its current state, then ages it by one tick.
    pub fn step(&mut self, surface: &mut impl Surface) {
        self.landed.retain_mut(|flake| {
            flake.y += LANDED_SLIDE_PX;
            surface.draw(DrawOp::Circle {
                center: point(flake.x, flake.y),
                radius: flake.size,
                color: rgba(255, 255, 255, flake.opacity * fade(flake.life, LANDED_FADE_FRAMES)),
            });
            flake.life -= 1.0;
            flake.life > 0.0
        });

        self.splashes.retain_mut(|splash| {
            surface.draw(DrawOp::Circle {
                center: point(splash.x, splash.y),
                radius: SPLASH_RADIUS,
                color: rgba(200, 220, 255, splash.opacity * fade(splash.life, SPLASH_FADE_FRAMES)),
            });
            splash.x += splash.vx;
            splash.y += splash.vy;
            splash.vy += SPLASH_GRAVITY;
            splash.life -= 1.0;
            splash.life > 0.0
        });
    }
}

fn fade(life: f32, window: f32) -> f32 {
    (life / window).clamp(0.0, 1.0)
}

pub const FLASH_INTERVAL_TICKS: u64 = 240;
pub const FLASH_CHANCE: f64 = 0.06;
const FLASH_ALPHA: f32 = 0.08;

/// Lightning gate for the storm tick numbered `tick` (counted from 1 since
/// the engine was configured). A flash is rolled only on multiples of
/// [`FLASH_INTERVAL_TICKS`]; returns whether one was painted.
pub fn storm_flash(tick: u64, surface: &mut impl Surface, rng: &mut impl Rng) -> bool {
    if tick == 0 || !tick.is_multiple_of(FLASH_INTERVAL_TICKS) || !rng.random_bool(FLASH_CHANCE) {
        return false;
    }
    let size = surface.size();
    surface.draw(DrawOp::FillRect {
        origin: point(0.0, 0.0),
        width: size.width,
        height: size.height,
        color: rgba(255, 255, 255, FLASH_ALPHA),
    });
    true
}
