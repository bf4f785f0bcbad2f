use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::traits::Surface;
use crate::api::types::Color;

/// Per-circle render data for a GPU or JS-side renderer.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    /// X position in logical pixels.
    pub x: f32,
    /// Y position in logical pixels.
    pub y: f32,
    pub radius: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    pub _pad: f32,
}

impl CircleInstance {
    pub const FLOATS: usize = 8;
}

/// A `Surface` that records circles instead of drawing them.
///
/// The buffer is rebuilt on every `clear`; `as_floats` gives a flat view
/// for headless checks or a GPU-side renderer.
pub struct InstanceBuffer {
    instances: Vec<CircleInstance>,
    width: f32,
    height: f32,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self::with_capacity(2048)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn instances(&self) -> &[CircleInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Logical size passed to the last `clear`.
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Flat float view of the instances.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(self.instances.as_slice())
    }
}

impl Default for InstanceBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for InstanceBuffer {
    fn clear(&mut self, width: f32, height: f32) {
        self.instances.clear();
        self.width = width;
        self.height = height;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, opacity: f32) {
        let [r, g, b] = color.to_rgb_f32();
        self.instances.push(CircleInstance {
            x: center.x,
            y: center.y,
            radius,
            r,
            g,
            b,
            alpha: opacity,
            _pad: 0.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<CircleInstance>(), 32);
        assert_eq!(CircleInstance::FLOATS, 8);
    }

    #[test]
    fn records_and_clears_circles() {
        let mut buf = InstanceBuffer::new();
        buf.clear(100.0, 50.0);
        buf.fill_circle(Vec2::new(1.0, 2.0), 3.0, Color::rgb(255, 0, 0), 0.5);
        buf.fill_circle(Vec2::new(4.0, 5.0), 6.0, Color::WHITE, 1.0);
        assert_eq!(buf.instance_count(), 2);
        assert_eq!(buf.size(), (100.0, 50.0));

        let floats = buf.as_floats();
        assert_eq!(floats.len(), 16);
        assert_eq!(&floats[..7], &[1.0, 2.0, 3.0, 1.0, 0.0, 0.0, 0.5]);

        buf.clear(100.0, 50.0);
        assert_eq!(buf.instance_count(), 0);
    }
}
