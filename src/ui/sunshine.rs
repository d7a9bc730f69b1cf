use std::f32::consts::{PI, TAU};

use rand::Rng;

use crate::ui::surface::{DrawOp, GradientClip, Surface, point, rgba, stop};

pub const RAY_COUNT: usize = 12;
const RAY_LENGTH: f32 = 1.5;
const FLARE_RADIUS: f32 = 200.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Ray {
    pub angle: f32,
    pub width: f32,
    /// Multiple of the surface width.
    pub length: f32,
    pub opacity: f32,
    /// Radians per millisecond.
    pub speed: f32,
    pub offset: f32,
}

/// Sun glare, light rays and lens flare shown under clear skies.
///
/// Rays are rolled once and then animated purely from elapsed time, so the
/// shimmer is smooth and independent of the particle simulation.
#[derive(Debug, Clone)]
pub struct Sunshine {
    rays: Vec<Ray>,
}

impl Sunshine {
    pub fn new(rng: &mut impl Rng) -> Self {
        let rays = (0..RAY_COUNT)
            .map(|i| Ray {
                angle: PI * 0.3 + i as f32 * (PI * 0.7) / RAY_COUNT as f32,
                width: rng.random_range(100.0..=250.0),
                length: RAY_LENGTH,
                opacity: rng.random_range(0.05..=0.15),
                speed: rng.random_range(0.0001..=0.0003),
                offset: rng.random_range(0.0..=TAU),
            })
            .collect();
        Self { rays }
    }

    #[must_use]
    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    pub fn draw(&self, surface: &mut impl Surface, elapsed_ms: f32) {
        let size = surface.size();
        let source = point(size.width * 0.95, -size.height * 0.1);

        let breathe = (elapsed_ms * 0.0005).sin() * 0.05;
        surface.draw(DrawOp::RadialGradient {
            center: source,
            radius: size.width * 0.9,
            stops: vec![
                stop(0.0, rgba(255, 255, 230, 0.4 + breathe)),
                stop(0.2, rgba(255, 250, 200, 0.15 + breathe)),
                stop(0.5, rgba(255, 245, 180, 0.05)),
                stop(1.0, rgba(255, 255, 255, 0.0)),
            ],
            clip: GradientClip::Surface,
        });

        for ray in &self.rays {
            let sway = (elapsed_ms * ray.speed + ray.offset).sin() * 0.05;
            let pulse = ((elapsed_ms * ray.speed * 2.0 + ray.offset).sin() + 1.0) / 2.0;
            let opacity = ray.opacity * (0.8 + pulse * 0.4);
            surface.draw(DrawOp::Ray {
                origin: source,
                angle: ray.angle + sway,
                length: size.width * ray.length,
                near_half_width: ray.width / 2.0,
                far_half_width: ray.width,
                stops: vec![
                    stop(0.0, rgba(255, 255, 255, opacity)),
                    stop(0.3, rgba(255, 255, 255, opacity * 0.3)),
                    stop(1.0, rgba(255, 255, 255, 0.0)),
                ],
            });
        }

        surface.draw(DrawOp::RadialGradient {
            center: point(size.width * 0.3, size.height * 0.7),
            radius: FLARE_RADIUS,
            stops: vec![
                stop(0.0, rgba(255, 230, 255, 0.03)),
                stop(0.5, rgba(230, 240, 255, 0.02)),
                stop(1.0, rgba(255, 255, 255, 0.0)),
            ],
            clip: GradientClip::Disc,
        });
    }
}
