//! The owning context for one swarm: configuration, particle field, pointer,
//! active glyph, viewport and readiness flags.
//!
//! Hosts feed it `InputEvent`s, call `tick` once per scheduled frame, and
//! call `on_morph_timer` from an independent interval timer. The glyph cycle
//! is a single state, `Idle(index)`, advanced by the timer and re-sampled in
//! place on resize.

use glam::Vec2;

use super::scheduler::FrameScheduler;
use crate::api::config::{DeviceClass, SwarmConfig};
use crate::api::error::{SwarmError, SwarmResult};
use crate::input::events::{InputEvent, PointerState};
use crate::renderer::raster::GlyphRaster;
use crate::renderer::traits::Surface;
use crate::systems::field::ParticleField;
use crate::systems::particle::ParticleStyle;
use crate::systems::sampler::GlyphSampler;

pub struct MorphDriver<R> {
    config: SwarmConfig,
    sampler: GlyphSampler<R>,
    field: Option<ParticleField>,
    pointer: PointerState,
    glyph_index: usize,
    device: Option<DeviceClass>,
    fonts_ready: bool,
    visible: bool,
}

impl<R: GlyphRaster> MorphDriver<R> {
    /// Validate `config` and build an idle driver. Particles are spawned on
    /// the first non-zero `resize`; glyphs are sampled once fonts are ready.
    pub fn new(config: SwarmConfig, raster: R) -> SwarmResult<Self> {
        config.validate()?;
        let sampler = GlyphSampler::new(raster, config.font_family.clone())
            .with_alpha_threshold(config.alpha_threshold);
        Ok(Self {
            config,
            sampler,
            field: None,
            pointer: PointerState::new(),
            glyph_index: 0,
            device: None,
            fonts_ready: false,
            // The canvas counts as visible until the host says otherwise.
            visible: true,
        })
    }

    /// Dispatch one input event.
    pub fn handle(
        &mut self,
        event: InputEvent,
        scheduler: &mut dyn FrameScheduler,
    ) -> SwarmResult<()> {
        match event {
            InputEvent::PointerMove { x, y } => self.pointer.set(x, y),
            InputEvent::PointerLeave => self.pointer.clear(),
            InputEvent::Resize { width, height } => self.resize(width, height)?,
            InputEvent::Visibility { visible } => self.set_visible(visible, scheduler),
            InputEvent::FontsReady => self.fonts_ready()?,
        }
        Ok(())
    }

    /// Begin ticking if the canvas is currently visible.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.visible {
            scheduler.start();
        }
    }

    /// Start or stop ticking. Resuming keeps the particles where they were.
    pub fn set_visible(&mut self, visible: bool, scheduler: &mut dyn FrameScheduler) {
        if self.visible != visible {
            log::debug!("visibility changed: {}", visible);
        }
        self.visible = visible;
        if visible {
            scheduler.start();
        } else {
            scheduler.stop();
        }
    }

    /// Apply a new logical viewport.
    ///
    /// The first valid size spawns the particle pool; later sizes keep the
    /// pool, update device tuning and re-sample the active glyph.
    /// A zero dimension is rejected and leaves the driver unchanged.
    pub fn resize(&mut self, width: f32, height: f32) -> SwarmResult<()> {
        if !(width > 0.0 && height > 0.0) {
            log::warn!("ignoring collapsed viewport {}x{}", width, height);
            return Err(SwarmError::ZeroViewport { width, height });
        }

        let class = self.config.device_class(width);
        let tuning = self.config.tuning(class);
        match self.field.as_mut() {
            None => {
                let mut field = ParticleField::new(
                    ParticleStyle::from_config(&self.config),
                    tuning,
                    width,
                    height,
                    self.config.seed,
                );
                field.initialize(tuning.particle_count);
                self.field = Some(field);
            }
            Some(field) => {
                field.resize(width, height);
                if self.device != Some(class) {
                    log::info!("device class now {:?}", class);
                    field.set_tuning(tuning);
                }
            }
        }
        self.device = Some(class);

        self.sample_active()?;
        Ok(())
    }

    /// Mark fonts as loaded and sample the active glyph if the viewport is known.
    pub fn fonts_ready(&mut self) -> SwarmResult<()> {
        if self.fonts_ready {
            return Ok(());
        }
        self.fonts_ready = true;
        self.sample_active()?;
        Ok(())
    }

    pub fn set_pointer(&mut self, position: Option<Vec2>) {
        match position {
            Some(p) => self.pointer.set(p.x, p.y),
            None => self.pointer.clear(),
        }
    }

    /// Advance to the next glyph. A no-op (returns `false`) while ticks are
    /// not running or before the first sample is possible.
    ///
    /// The index only moves once the next glyph has been sampled; a raster
    /// failure leaves the current glyph active.
    pub fn on_morph_timer(&mut self, scheduler: &dyn FrameScheduler) -> SwarmResult<bool> {
        if !scheduler.is_running() || !self.is_ready() {
            return Ok(false);
        }
        let next = (self.glyph_index + 1) % self.config.glyphs.len();
        log::info!("morphing to glyph {} ({:?})", next, self.config.glyphs[next]);
        self.sample_glyph(next)?;
        self.glyph_index = next;
        Ok(true)
    }

    /// Clear `surface` and step every particle once. Returns `false` if the
    /// field has not been spawned yet.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        let Some(field) = self.field.as_mut() else {
            return false;
        };
        let size = field.size();
        surface.clear(size.x, size.y);
        field.step(self.pointer.position(), surface);
        true
    }

    fn sample_active(&mut self) -> SwarmResult<bool> {
        self.sample_glyph(self.glyph_index)
    }

    /// Sample glyph `index` and retarget. Returns `true` if targets changed.
    fn sample_glyph(&mut self, index: usize) -> SwarmResult<bool> {
        if !self.fonts_ready {
            return Ok(false);
        }
        let Some(field) = self.field.as_mut() else {
            return Ok(false);
        };
        let size = field.size();
        let glyph = &self.config.glyphs[index];
        let points = self
            .sampler
            .sample(glyph, size.x, size.y, self.config.font_size_ratio)?;
        if points.is_empty() {
            log::debug!("glyph {:?} has no visible pixels, keeping current shape", glyph);
            return Ok(false);
        }
        field.retarget(&points);
        Ok(true)
    }

    /// True once both the viewport and fonts are available.
    pub fn is_ready(&self) -> bool {
        self.fonts_ready && self.field.is_some()
    }

    pub fn glyph_index(&self) -> usize {
        self.glyph_index
    }

    pub fn active_glyph(&self) -> &str {
        &self.config.glyphs[self.glyph_index]
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer.position()
    }

    pub fn device_class(&self) -> Option<DeviceClass> {
        self.device
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    pub fn sampler(&self) -> &GlyphSampler<R> {
        &self.sampler
    }
}
