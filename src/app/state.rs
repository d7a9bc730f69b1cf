use std::time::Instant;

use anyhow::Result;
use crossterm::event::Event;
use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::{
    app::events::{AppEvent, FrameTicker, spawn_classify_task, start_frame_task},
    cli::Cli,
    data::classifier::{ClassifierClient, FORECAST_URL, GEOIP_URL},
    domain::weather::WeatherCategory,
    ui::{
        obstacle::CardTracker,
        overlay::OverlayEngine,
        surface::{DrawOp, PixelCanvas, Surface, SurfaceSize},
    },
};

mod input;

use input::{KeyAction, key_action};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Ready,
    Quit,
}

/// Where the active category came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySource {
    Detecting,
    Detected,
    Manual,
}

#[derive(Debug)]
pub struct AppState {
    pub mode: AppMode,
    pub running: bool,
    pub source: CategorySource,
    pub viewport: Rect,
    pub canvas: PixelCanvas,
    pub overlay: OverlayEngine,
    pub card: CardTracker,
    pub frame_tick: u64,
    pub animate: bool,
    fps: u8,
    ticker: Option<FrameTicker>,
    frame_generation: u64,
    started_at: Instant,
    classifier: ClassifierClient,
}

impl AppState {
    pub fn new(cli: &Cli, viewport: Rect) -> Self {
        let category = cli.weather.unwrap_or_default();
        let size = SurfaceSize::from_cells(viewport.width, viewport.height);
        let overlay = match cli.seed {
            Some(seed) => OverlayEngine::seeded(category, size, seed),
            None => OverlayEngine::new(category, size),
        }
        .with_flash(!cli.no_flash);

        Self {
            mode: AppMode::Ready,
            running: true,
            source: if cli.weather.is_some() {
                CategorySource::Manual
            } else {
                CategorySource::Detecting
            },
            viewport,
            canvas: PixelCanvas::new(size),
            overlay,
            card: CardTracker::new(viewport),
            frame_tick: 0,
            animate: !cli.no_animation,
            fps: cli.fps,
            ticker: None,
            frame_generation: 0,
            started_at: Instant::now(),
            classifier: ClassifierClient::with_urls(
                cli.forecast_url.as_deref().unwrap_or(FORECAST_URL),
                cli.geoip_url.as_deref().unwrap_or(GEOIP_URL),
            ),
        }
    }

    #[must_use]
    pub fn category(&self) -> WeatherCategory {
        self.overlay.category()
    }

    /// Generation of the live frame ticker, if one is running.
    #[must_use]
    pub fn active_generation(&self) -> Option<u64> {
        self.ticker.as_ref().map(FrameTicker::generation)
    }

    pub fn handle_event(
        &mut self,
        event: AppEvent,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        match event {
            AppEvent::Bootstrap => {
                cli.validate()?;
                tracing::info!(
                    category = self.category().name(),
                    fps = self.fps,
                    animate = self.animate,
                    "overlay starting"
                );
                if self.source == CategorySource::Detecting {
                    self.detect(tx, cli);
                }
                if self.animate {
                    self.start_ticker(tx);
                }
            }
            AppEvent::TickFrame(generation) => {
                if self.active_generation() != Some(generation) {
                    tracing::trace!(generation, "stale frame tick dropped");
                    return Ok(());
                }
                self.frame_tick = self.frame_tick.saturating_add(1);
                let flashed = self
                    .overlay
                    .tick(&mut self.canvas, &self.card, self.started_at.elapsed());
                if flashed {
                    tracing::debug!(tick = self.frame_tick, "lightning flash");
                }
            }
            AppEvent::Input(event) => self.handle_input(event, tx, cli),
            AppEvent::Classified(category) => {
                if self.source == CategorySource::Manual {
                    tracing::debug!(
                        category = category.name(),
                        "detected weather ignored after manual selection"
                    );
                } else {
                    self.source = CategorySource::Detected;
                    self.set_category(category, tx);
                }
            }
            AppEvent::Quit => self.quit(),
        }

        Ok(())
    }

    fn handle_input(&mut self, event: Event, tx: &mpsc::Sender<AppEvent>, cli: &Cli) {
        match event {
            Event::Key(key) => match key_action(key) {
                Some(KeyAction::Select(category)) => self.select(category, tx),
                Some(KeyAction::Cycle(delta)) => self.select(self.category().cycle(delta), tx),
                Some(KeyAction::Detect) => {
                    self.source = CategorySource::Detecting;
                    self.detect(tx, cli);
                }
                Some(KeyAction::Quit) => self.quit(),
                None => {}
            },
            Event::Resize(width, height) => self.resize(width, height),
            _ => {}
        }
    }

    /// Leaves the running state; the ticker is cancelled before the loop exits.
    fn quit(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        self.mode = AppMode::Quit;
        tracing::info!("quit requested");
    }

    fn select(&mut self, category: WeatherCategory, tx: &mpsc::Sender<AppEvent>) {
        self.source = CategorySource::Manual;
        self.set_category(category, tx);
    }

    fn detect(&self, tx: &mpsc::Sender<AppEvent>, cli: &Cli) {
        tracing::info!("detecting local weather");
        spawn_classify_task(tx.clone(), self.classifier.clone(), cli.coordinates());
    }

    /// Swaps the running simulation: the old ticker is cancelled before any
    /// pool is touched and a fresh one is started afterwards.
    pub fn set_category(&mut self, category: WeatherCategory, tx: &mpsc::Sender<AppEvent>) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        self.overlay.configure(category, self.canvas.size());
        self.canvas.draw(DrawOp::Clear);
        self.started_at = Instant::now();
        tracing::info!(category = category.name(), source = ?self.source, "weather category set");
        if self.animate {
            self.start_ticker(tx);
        }
    }

    fn start_ticker(&mut self, tx: &mpsc::Sender<AppEvent>) {
        self.frame_generation += 1;
        self.ticker = Some(start_frame_task(tx.clone(), self.fps, self.frame_generation));
    }

    /// New viewport dimensions; the simulation keeps running untouched.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Rect::new(0, 0, width, height);
        let size = SurfaceSize::from_cells(width, height);
        self.canvas.resize(size);
        self.overlay.resize(size);
        self.card.set_viewport(self.viewport);
        tracing::debug!(width, height, "viewport resized");
    }
}

#[cfg(test)]
mod tests;
