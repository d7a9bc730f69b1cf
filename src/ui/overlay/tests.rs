use std::time::Duration;

use super::*;
use crate::{
    test_support::RecordingSurface,
    ui::{effects::FLASH_INTERVAL_TICKS, obstacle::ObstacleRect, sunshine::RAY_COUNT},
};

const SIZE: SurfaceSize = SurfaceSize {
    width: 960.0,
    height: 640.0,
};

const NO_CARD: Option<ObstacleRect> = None;

fn card() -> Option<ObstacleRect> {
    Some(ObstacleRect {
        left: 200.0,
        right: 760.0,
        top: 320.0,
    })
}

fn frame(tick: u64) -> Duration {
    Duration::from_millis(tick * 16)
}

#[test]
fn pool_sizes_follow_category() {
    let table = WeatherCategory::ALL
        .iter()
        .map(|category| {
            let engine = OverlayEngine::seeded(*category, SIZE, 1);
            format!("{}: {}", category.name(), engine.particles().len())
        })
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(table, @r"
    CLEAR: 25
    SNOW: 850
    LIGHT_SNOW: 150
    RAIN: 200
    STORM: 140
    WIND: 90
    CLOUDY: 90
    ");
}

#[test]
fn initial_pool_is_spread_over_the_surface() {
    let engine = OverlayEngine::seeded(WeatherCategory::Snow, SIZE, 2);
    assert!(
        engine
            .particles()
            .iter()
            .all(|p| (0.0..=SIZE.height).contains(&p.y))
    );
    let visible_upper_half = engine
        .particles()
        .iter()
        .filter(|p| p.y < SIZE.height / 2.0)
        .count();
    assert!(visible_upper_half > 100);
}

#[test]
fn pool_size_is_constant_while_running() {
    let mut engine = OverlayEngine::seeded(WeatherCategory::Rain, SIZE, 3);
    let mut surface = RecordingSurface::new(SIZE);
    for tick in 0..300 {
        engine.tick(&mut surface, &card(), frame(tick));
        assert_eq!(engine.particles().len(), 200);
    }
}

#[test]
fn snow_on_card_accumulates_landed_flakes_only() {
    let mut engine = OverlayEngine::seeded(WeatherCategory::Snow, SIZE, 4);
    let mut surface = RecordingSurface::new(SIZE);
    for tick in 0..120 {
        engine.tick(&mut surface, &card(), frame(tick));
    }
    assert!(!engine.effects().landed().is_empty());
    assert!(engine.effects().splashes().is_empty());
}

#[test]
fn rain_on_card_splashes_in_threes() {
    let mut engine = OverlayEngine::seeded(WeatherCategory::Rain, SIZE, 5);
    let mut surface = RecordingSurface::new(SIZE);
    let mut seen_splashes = false;
    for tick in 0..120 {
        engine.tick(&mut surface, &card(), frame(tick));
        seen_splashes |= !engine.effects().splashes().is_empty();
    }
    assert!(seen_splashes);
    assert!(engine.effects().landed().is_empty());
}

#[test]
fn absent_obstacle_disables_collisions() {
    let mut engine = OverlayEngine::seeded(WeatherCategory::Snow, SIZE, 6);
    let mut surface = RecordingSurface::new(SIZE);
    for tick in 0..200 {
        engine.tick(&mut surface, &NO_CARD, frame(tick));
    }
    assert!(engine.effects().landed().is_empty());
    assert!(engine.effects().splashes().is_empty());
}

#[test]
fn switching_category_replaces_pool_and_clears_effects() {
    let mut engine = OverlayEngine::seeded(WeatherCategory::Rain, SIZE, 7);
    let mut surface = RecordingSurface::new(SIZE);
    for tick in 0..60 {
        engine.tick(&mut surface, &card(), frame(tick));
    }
    assert!(!engine.effects().splashes().is_empty());

    engine.configure(WeatherCategory::Clear, SIZE);
    assert_eq!(engine.particles().len(), 25);
    assert!(engine.effects().splashes().is_empty());
    assert_eq!(engine.ticks(), 0);

    engine.configure(WeatherCategory::Snow, SIZE);
    assert_eq!(engine.category(), WeatherCategory::Snow);
    assert_eq!(engine.particles().len(), 850);
}

#[test]
fn rays_survive_ticks_resizes_and_reconfiguration() {
    let mut engine = OverlayEngine::seeded(WeatherCategory::Clear, SIZE, 8);
    let rays = engine.sunshine().rays().to_vec();
    let mut surface = RecordingSurface::new(SIZE);
    for tick in 0..50 {
        engine.tick(&mut surface, &card(), frame(tick));
    }
    let smaller = SurfaceSize {
        width: 480.0,
        height: 320.0,
    };
    surface.resize(smaller);
    engine.resize(smaller);
    engine.configure(WeatherCategory::Storm, smaller);
    engine.configure(WeatherCategory::Clear, smaller);
    engine.tick(&mut surface, &card(), frame(51));
    assert_eq!(engine.sunshine().rays().len(), RAY_COUNT);
    assert_eq!(engine.sunshine().rays(), rays.as_slice());
}

#[test]
fn clear_frames_start_with_ambient_light() {
    let mut engine = OverlayEngine::seeded(WeatherCategory::Clear, SIZE, 9);
    let mut surface = RecordingSurface::new(SIZE);
    engine.tick(&mut surface, &card(), frame(1));
    assert_eq!(surface.ops[0], DrawOp::Clear);
    assert!(matches!(surface.ops[1], DrawOp::RadialGradient { .. }));
    let rays = surface
        .ops
        .iter()
        .filter(|op| matches!(op, DrawOp::Ray { .. }))
        .count();
    assert_eq!(rays, RAY_COUNT);
}

#[test]
fn non_clear_frames_skip_ambient_light() {
    let mut engine = OverlayEngine::seeded(WeatherCategory::Wind, SIZE, 10);
    let mut surface = RecordingSurface::new(SIZE);
    engine.tick(&mut surface, &card(), frame(1));
    assert!(
        surface
            .ops
            .iter()
            .all(|op| !matches!(op, DrawOp::Ray { .. } | DrawOp::RadialGradient { .. }))
    );
}

#[test]
fn storm_flashes_at_most_once_per_window() {
    let mut engine = OverlayEngine::seeded(WeatherCategory::Storm, SIZE, 11);
    let mut surface = RecordingSurface::new(SIZE);
    for window in 0..40 {
        let mut flashes = 0;
        for tick in 0..FLASH_INTERVAL_TICKS {
            if engine.tick(&mut surface, &card(), frame(window * FLASH_INTERVAL_TICKS + tick)) {
                flashes += 1;
            }
        }
        assert!(flashes <= 1);
    }
}

#[test]
fn long_storm_flashes_on_window_boundaries() {
    let mut engine = OverlayEngine::seeded(WeatherCategory::Storm, SIZE, 15);
    let mut surface = RecordingSurface::new(SIZE);
    let mut flash_ticks = Vec::new();
    for tick in 0..(200 * FLASH_INTERVAL_TICKS) {
        surface.ops.clear();
        if engine.tick(&mut surface, &NO_CARD, frame(tick)) {
            flash_ticks.push(engine.ticks());
            assert!(
                surface
                    .ops
                    .iter()
                    .any(|op| matches!(op, DrawOp::FillRect { .. }))
            );
        }
    }
    assert!(!flash_ticks.is_empty());
    assert!(
        flash_ticks
            .iter()
            .all(|tick| tick.is_multiple_of(FLASH_INTERVAL_TICKS))
    );
}

#[test]
fn disabled_flash_never_paints() {
    let mut engine = OverlayEngine::seeded(WeatherCategory::Storm, SIZE, 12).with_flash(false);
    let mut surface = RecordingSurface::new(SIZE);
    for tick in 0..(FLASH_INTERVAL_TICKS * 20) {
        assert!(!engine.tick(&mut surface, &card(), frame(tick)));
    }
    assert!(
        surface
            .ops
            .iter()
            .all(|op| !matches!(op, DrawOp::FillRect { .. }))
    );
}

#[test]
fn seeded_engines_replay_identically() {
    let mut first = OverlayEngine::seeded(WeatherCategory::LightSnow, SIZE, 13);
    let mut second = OverlayEngine::seeded(WeatherCategory::LightSnow, SIZE, 13);
    let mut a = RecordingSurface::new(SIZE);
    let mut b = RecordingSurface::new(SIZE);
    for tick in 0..30 {
        first.tick(&mut a, &card(), frame(tick));
        second.tick(&mut b, &card(), frame(tick));
    }
    assert_eq!(a.ops, b.ops);
}

#[test]
fn resize_keeps_particle_state() {
    let mut engine = OverlayEngine::seeded(WeatherCategory::Wind, SIZE, 14);
    let before = engine.particles().to_vec();
    engine.resize(SurfaceSize {
        width: 200.0,
        height: 100.0,
    });
    assert_eq!(engine.particles(), before.as_slice());
}
