use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tokio::{sync::mpsc::Sender, task::JoinHandle, time::interval};

use crate::{
    data::classifier::ClassifierClient,
    domain::weather::{Coordinates, WeatherCategory},
};

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    /// Frame tick tagged with the generation of the ticker that sent it.
    TickFrame(u64),
    Input(Event),
    Classified(WeatherCategory),
    Quit,
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

/// Handle to a running frame ticker. The task is aborted when the handle is
/// cancelled or dropped, so no tick is sent afterwards.
#[derive(Debug)]
pub struct FrameTicker {
    generation: u64,
    handle: JoinHandle<()>,
}

impl FrameTicker {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cancel(self) {
        self.handle.abort();
        tracing::debug!(generation = self.generation, "frame ticker cancelled");
    }
}

impl Drop for FrameTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn start_frame_task(tx: Sender<AppEvent>, fps: u8, generation: u64) -> FrameTicker {
    let fps = fps.max(15);
    let handle = tokio::spawn(async move {
        let mut ticker = interval(Duration::from_millis(1000_u64 / u64::from(fps)));
        loop {
            ticker.tick().await;
            if tx.send(AppEvent::TickFrame(generation)).await.is_err() {
                break;
            }
        }
    });
    tracing::debug!(generation, fps, "frame ticker started");
    FrameTicker { generation, handle }
}

pub fn spawn_classify_task(
    tx: Sender<AppEvent>,
    client: ClassifierClient,
    coordinates: Option<Coordinates>,
) {
    tokio::spawn(async move {
        let category = client.classify(coordinates).await;
        let _ = tx.send(AppEvent::Classified(category)).await;
    });
}
