use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use tokio::sync::mpsc;

use super::{AppMode, AppState, CategorySource};
use crate::{
    app::events::AppEvent, cli::Cli, domain::weather::WeatherCategory,
    test_support::state_test_cli,
};

const VIEWPORT: Rect = Rect {
    x: 0,
    y: 0,
    width: 100,
    height: 36,
};

fn key(ch: char) -> AppEvent {
    AppEvent::Input(Event::Key(KeyEvent::new(
        KeyCode::Char(ch),
        KeyModifiers::NONE,
    )))
}

fn manual_cli(category: WeatherCategory) -> Cli {
    let mut cli = state_test_cli();
    cli.weather = Some(category);
    cli
}

#[test]
fn cli_weather_is_a_manual_selection() {
    let state = AppState::new(&manual_cli(WeatherCategory::Rain), VIEWPORT);
    assert_eq!(state.category(), WeatherCategory::Rain);
    assert_eq!(state.source, CategorySource::Manual);
    assert_eq!(state.overlay.particles().len(), 200);
}

#[test]
fn without_cli_weather_detection_is_pending() {
    let state = AppState::new(&state_test_cli(), VIEWPORT);
    assert_eq!(state.category(), WeatherCategory::Clear);
    assert_eq!(state.source, CategorySource::Detecting);
}

#[tokio::test]
async fn digit_keys_switch_category_and_pool() {
    let cli = manual_cli(WeatherCategory::Clear);
    let (tx, _rx) = mpsc::channel(16);
    let mut state = AppState::new(&cli, VIEWPORT);

    state.handle_event(key('2'), &tx, &cli).expect("key");
    assert_eq!(state.category(), WeatherCategory::Snow);
    assert_eq!(state.overlay.particles().len(), 850);

    state.handle_event(key('5'), &tx, &cli).expect("key");
    assert_eq!(state.category(), WeatherCategory::Storm);
    assert_eq!(state.overlay.particles().len(), 140);
}

#[tokio::test]
async fn arrows_cycle_with_wraparound() {
    let cli = manual_cli(WeatherCategory::Clear);
    let (tx, _rx) = mpsc::channel(16);
    let mut state = AppState::new(&cli, VIEWPORT);

    let left = AppEvent::Input(Event::Key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE)));
    state.handle_event(left, &tx, &cli).expect("left");
    assert_eq!(state.category(), WeatherCategory::Cloudy);

    let right = AppEvent::Input(Event::Key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE)));
    state.handle_event(right, &tx, &cli).expect("right");
    assert_eq!(state.category(), WeatherCategory::Clear);
}

#[tokio::test]
async fn ticks_from_a_cancelled_ticker_are_ignored() {
    let mut cli = manual_cli(WeatherCategory::Snow);
    cli.no_animation = false;
    let (tx, _rx) = mpsc::channel(16);
    let mut state = AppState::new(&cli, VIEWPORT);

    state.handle_event(AppEvent::Bootstrap, &tx, &cli).expect("bootstrap");
    let first = state.active_generation().expect("ticker running");

    state.handle_event(key('4'), &tx, &cli).expect("key");
    let second = state.active_generation().expect("ticker restarted");
    assert_ne!(first, second);

    state.handle_event(AppEvent::TickFrame(first), &tx, &cli).expect("stale tick");
    assert_eq!(state.frame_tick, 0);
    assert_eq!(state.overlay.ticks(), 0);
    assert_eq!(state.canvas.painted_pixels(), 0);

    state.handle_event(AppEvent::TickFrame(second), &tx, &cli).expect("live tick");
    assert_eq!(state.frame_tick, 1);
    assert_eq!(state.overlay.ticks(), 1);
}

#[tokio::test]
async fn no_animation_starts_no_ticker() {
    let cli = manual_cli(WeatherCategory::Rain);
    let (tx, _rx) = mpsc::channel(16);
    let mut state = AppState::new(&cli, VIEWPORT);
    state.handle_event(AppEvent::Bootstrap, &tx, &cli).expect("bootstrap");
    assert_eq!(state.active_generation(), None);

    state.handle_event(AppEvent::TickFrame(0), &tx, &cli).expect("tick");
    assert_eq!(state.frame_tick, 0);
}

#[tokio::test]
async fn detection_result_applies_until_user_chooses() {
    let cli = state_test_cli();
    let (tx, _rx) = mpsc::channel(16);
    let mut state = AppState::new(&cli, VIEWPORT);

    state
        .handle_event(AppEvent::Classified(WeatherCategory::Rain), &tx, &cli)
        .expect("classified");
    assert_eq!(state.category(), WeatherCategory::Rain);
    assert_eq!(state.source, CategorySource::Detected);

    state.handle_event(key('6'), &tx, &cli).expect("key");
    state
        .handle_event(AppEvent::Classified(WeatherCategory::Snow), &tx, &cli)
        .expect("classified");
    assert_eq!(state.category(), WeatherCategory::Wind);
    assert_eq!(state.source, CategorySource::Manual);
}

#[test]
fn bootstrap_rejects_half_coordinates() {
    let mut cli = manual_cli(WeatherCategory::Clear);
    cli.lat = Some(10.0);
    let (tx, _rx) = mpsc::channel(16);
    let mut state = AppState::new(&cli, VIEWPORT);
    assert!(state.handle_event(AppEvent::Bootstrap, &tx, &cli).is_err());
}

#[test]
fn resize_moves_card_without_resetting_particles() {
    let cli = manual_cli(WeatherCategory::Snow);
    let (tx, _rx) = mpsc::channel(16);
    let mut state = AppState::new(&cli, VIEWPORT);
    let before = state.overlay.particles().to_vec();
    let card_before = state.card.card_area();

    state
        .handle_event(AppEvent::Input(Event::Resize(60, 20)), &tx, &cli)
        .expect("resize");

    assert_eq!(state.overlay.particles(), before.as_slice());
    assert_eq!(state.viewport, Rect::new(0, 0, 60, 20));
    assert_eq!(state.canvas.raster_size(), (60, 40));
    assert_ne!(state.card.card_area(), card_before);
}

#[test]
fn quit_key_and_event() {
    let cli = manual_cli(WeatherCategory::Clear);
    let (tx, _rx) = mpsc::channel(16);
    let mut state = AppState::new(&cli, VIEWPORT);
    state.handle_event(key('q'), &tx, &cli).expect("quit");
    assert_eq!(state.mode, AppMode::Quit);

    let mut state = AppState::new(&cli, VIEWPORT);
    state.handle_event(AppEvent::Quit, &tx, &cli).expect("quit");
    assert_eq!(state.mode, AppMode::Quit);
}

#[tokio::test]
async fn quitting_stops_the_frame_ticker() {
    let mut cli = manual_cli(WeatherCategory::Storm);
    cli.no_animation = false;
    let (tx, _rx) = mpsc::channel(16);

    for quit in [key('q'), AppEvent::Quit] {
        let mut state = AppState::new(&cli, VIEWPORT);
        state.handle_event(AppEvent::Bootstrap, &tx, &cli).expect("bootstrap");
        let generation = state.active_generation().expect("ticker running");

        state.handle_event(quit, &tx, &cli).expect("quit");
        assert_eq!(state.mode, AppMode::Quit);
        assert_eq!(state.active_generation(), None);

        state.handle_event(AppEvent::TickFrame(generation), &tx, &cli).expect("late tick");
        assert_eq!(state.frame_tick, 0);
    }
}
