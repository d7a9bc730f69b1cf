use std::time::Duration;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    domain::weather::WeatherCategory,
    ui::{
        effects::{EffectPools, storm_flash},
        obstacle::ObstacleSource,
        particles::{Particle, pool_size},
        sunshine::Sunshine,
        surface::{DrawOp, Surface, SurfaceSize},
    },
};

/// Owns the whole weather simulation for one overlay instance.
///
/// `configure` is the entry into the running state; each `tick` simulates and
/// renders one frame into the supplied surface.
#[derive(Debug)]
pub struct OverlayEngine {
    category: WeatherCategory,
    surface: SurfaceSize,
    particles: Vec<Particle>,
    effects: EffectPools,
    sunshine: Sunshine,
    flash_enabled: bool,
    ticks: u64,
    rng: StdRng,
}

impl OverlayEngine {
    #[must_use]
    pub fn new(category: WeatherCategory, surface: SurfaceSize) -> Self {
        Self::with_rng(category, surface, StdRng::from_rng(&mut rand::rng()))
    }

    #[must_use]
    pub fn seeded(category: WeatherCategory, surface: SurfaceSize, seed: u64) -> Self {
        Self::with_rng(category, surface, StdRng::seed_from_u64(seed))
    }

    fn with_rng(category: WeatherCategory, surface: SurfaceSize, mut rng: StdRng) -> Self {
        let sunshine = Sunshine::new(&mut rng);
        let mut engine = Self {
            category,
            surface,
            particles: Vec::new(),
            effects: EffectPools::default(),
            sunshine,
            flash_enabled: true,
            ticks: 0,
            rng,
        };
        engine.configure(category, surface);
        engine
    }

    #[must_use]
    pub fn with_flash(mut self, enabled: bool) -> Self {
        self.flash_enabled = enabled;
        self
    }

    /// Rebuilds the particle pool for `category` and drops every effect left
    /// over from the previous configuration. Sun rays are kept.
    pub fn configure(&mut self, category: WeatherCategory, surface: SurfaceSize) {
        self.category = category;
        self.surface = surface;
        self.effects.clear();
        self.ticks = 0;
        let rng = &mut self.rng;
        self.particles = (0..pool_size(category))
            .map(|_| {
                let mut particle = Particle::spawn(category, surface, rng);
                particle.y = rng.random_range(0.0..=surface.height.max(0.0));
                particle
            })
            .collect();
    }

    /// Applies new surface dimensions without disturbing particle state.
    pub fn resize(&mut self, surface: SurfaceSize) {
        self.surface = surface;
    }

    #[must_use]
    pub fn category(&self) -> WeatherCategory {
        self.category
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub fn effects(&self) -> &EffectPools {
        &self.effects
    }

    #[must_use]
    pub fn sunshine(&self) -> &Sunshine {
        &self.sunshine
    }

    /// Ticks since the last `configure`; also drives the storm flash gate.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// One frame: clear, ambient light, storm flash, effect pools, particles.
    /// Returns whether a lightning flash was painted.
    pub fn tick(
        &mut self,
        surface: &mut impl Surface,
        obstacle: &impl ObstacleSource,
        elapsed: Duration,
    ) -> bool {
        self.ticks += 1;
        self.surface = surface.size();
        surface.draw(DrawOp::Clear);
        let rect = obstacle.current_rect();

        if self.category == WeatherCategory::Clear {
            self.sunshine.draw(surface, elapsed.as_secs_f32() * 1000.0);
        }

        let flashed = self.category == WeatherCategory::Storm
            && self.flash_enabled
            && storm_flash(self.ticks, surface, &mut self.rng);

        self.effects.step(surface);

        for particle in &mut self.particles {
            let impact = particle.update(self.category, self.surface, rect, &mut self.rng);
            if let Some(impact) = impact {
                self.effects.absorb(impact, &mut self.rng);
            }
            particle.draw(self.category, surface);
        }

        flashed
    }
}

#[cfg(test)]
mod tests;
