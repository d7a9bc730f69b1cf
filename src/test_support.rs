use crate::{
    cli::Cli,
    ui::surface::{DrawOp, Surface, SurfaceSize},
};

/// Surface double that keeps every op it is handed, in order.
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    size: SurfaceSize,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub(crate) fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            ops: Vec::new(),
        }
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn draw(&mut self, op: DrawOp) {
        self.ops.push(op);
    }
}

pub(crate) fn state_test_cli() -> Cli {
    Cli {
        weather: None,
        lat: None,
        lon: None,
        fps: 30,
        no_animation: true,
        no_flash: false,
        seed: Some(42),
        forecast_url: None,
        geoip_url: None,
        log_file: None,
        log_level: "info".to_string(),
    }
}
