use swarm_engine::{FrameScheduler, InputEvent, MorphDriver, SwarmConfig, SwarmError, SwarmResult};

use crate::canvas::{find_canvas, CanvasRaster, CanvasSurface};
use crate::scheduler::{MorphInterval, RafScheduler};

/// Height used when the container reports zero and the window is unknown.
pub const FALLBACK_HEIGHT: f32 = 400.0;

/// Replace a collapsed height with the window height, or `FALLBACK_HEIGHT`.
pub fn effective_viewport(width: f32, height: f32, window_height: Option<f32>) -> (f32, f32) {
    if height > 0.0 {
        return (width, height);
    }
    let fallback = window_height.filter(|h| *h > 0.0).unwrap_or(FALLBACK_HEIGHT);
    (width, fallback)
}

/// Wires a `MorphDriver` to a browser canvas, a frame loop and a morph timer.
///
/// A demo crate keeps one runner in a `thread_local!` and exports free
/// functions through `export_swarm!`, because wasm-bindgen cannot export
/// generic state directly.
pub struct SwarmRunner {
    driver: MorphDriver<CanvasRaster>,
    surface: CanvasSurface,
    scheduler: RafScheduler,
    interval: Option<MorphInterval>,
    frames: u64,
}

impl SwarmRunner {
    /// Find the canvas, create the offscreen raster and build the driver.
    /// `on_frame` runs once per animation frame while visible.
    pub fn new(
        config: SwarmConfig,
        canvas_id: &str,
        on_frame: impl FnMut() + 'static,
    ) -> SwarmResult<Self> {
        let window =
            web_sys::window().ok_or_else(|| SwarmError::MissingSurface("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| SwarmError::MissingSurface("no document".into()))?;
        let canvas = find_canvas(&document, canvas_id)?;
        let surface = CanvasSurface::new(canvas)?;
        let raster = CanvasRaster::new(&document)?;
        let driver = MorphDriver::new(config, raster)?;

        Ok(Self {
            driver,
            surface,
            scheduler: RafScheduler::new(on_frame),
            interval: None,
            frames: 0,
        })
    }

    /// Start the glyph-advance timer. It fires regardless of visibility;
    /// the driver ignores it while frames are stopped.
    pub fn start_interval(&mut self, on_fire: impl FnMut() + 'static) -> SwarmResult<()> {
        let period = self.driver.config().morph_interval_ms;
        self.interval = Some(MorphInterval::start(period, on_fire)?);
        Ok(())
    }

    /// Begin the frame loop (if the canvas is visible).
    pub fn start(&mut self) {
        self.driver.start(&mut self.scheduler);
    }

    /// One animation frame.
    pub fn frame(&mut self) {
        if self.driver.tick(&mut self.surface) {
            self.frames += 1;
        }
    }

    /// Morph timer callback.
    pub fn morph(&mut self) {
        if let Err(e) = self.driver.on_morph_timer(&self.scheduler) {
            log::error!("morph failed: {}", e);
        }
    }

    /// Apply a new logical size, falling back for a collapsed height.
    pub fn resize(&mut self, width: f32, height: f32, dpr: f64) {
        let window_height = web_sys::window()
            .and_then(|w| w.inner_height().ok())
            .and_then(|h| h.as_f64())
            .map(|h| h as f32);
        let (width, height) = effective_viewport(width, height, window_height);
        if let Err(e) = self.surface.resize(width, height, dpr) {
            log::error!("canvas resize failed: {}", e);
            return;
        }
        self.handle(InputEvent::Resize { width, height });
    }

    /// Forward an input event to the driver, logging failures.
    pub fn handle(&mut self, event: InputEvent) {
        if let Err(e) = self.driver.handle(event, &mut self.scheduler) {
            log::warn!("{:?} not applied: {}", event, e);
        }
    }

    /// Stop frames and the morph timer.
    pub fn shutdown(&mut self) {
        self.scheduler.stop();
        self.interval = None;
        log::info!("swarm stopped after {} frames", self.frames);
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn glyph_index(&self) -> u32 {
        self.driver.glyph_index() as u32
    }

    pub fn particle_count(&self) -> u32 {
        self.driver.field().map_or(0, |f| f.len() as u32)
    }
}
