pub mod api;
pub mod core;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use crate::api::config::{DeviceClass, DeviceTuning, SwarmConfig, DEFAULT_FONT_FAMILY};
pub use crate::api::error::{SwarmError, SwarmResult};
pub use crate::api::types::Color;
pub use crate::core::driver::MorphDriver;
pub use crate::core::rng::Rng;
pub use crate::core::scheduler::{FrameScheduler, ManualScheduler};
pub use crate::input::events::{InputEvent, PointerState};
pub use crate::renderer::instance::{CircleInstance, InstanceBuffer};
pub use crate::renderer::raster::{AlphaMask, GlyphRaster, TextStyle};
pub use crate::renderer::traits::Surface;
pub use crate::systems::field::{Edge, ParticleField};
pub use crate::systems::particle::{repulsion_force, Particle, ParticleStyle};
pub use crate::systems::sampler::{grid_gap, GlyphSampler};

// glam is part of the public API (shape points, pointer positions)
pub use glam::Vec2;
