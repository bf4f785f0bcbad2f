//! Drawing contract between the swarm core and its host.
//!
//! The core never touches a platform canvas. Hosts hand it a `Surface`
//! (Canvas2D in the browser bridge, `InstanceBuffer` for headless or
//! GPU-side rendering) and the core issues filled circles in logical
//! coordinates. Device-pixel-ratio scaling is the host's job.

use glam::Vec2;

use crate::api::types::Color;

/// An on-screen drawing surface.
pub trait Surface {
    /// Erase the whole logical area before a new frame.
    fn clear(&mut self, width: f32, height: f32);

    /// Fill a circle of `radius` at `center` with `color` at `opacity` (0.0-1.0).
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, opacity: f32);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn clear(&mut self, width: f32, height: f32) {
        (**self).clear(width, height);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, opacity: f32) {
        (**self).fill_circle(center, radius, color, opacity);
    }
}
