use glam::Vec2;

/// Input events the driver understands.
/// The host translates DOM (or native) events into these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A cursor or touch moved to logical coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// The cursor left the canvas or the touch ended.
    PointerLeave,
    /// The drawing area changed to a new logical size.
    Resize { width: f32, height: f32 },
    /// The canvas scrolled into or out of view.
    Visibility { visible: bool },
    /// Web fonts have loaded; glyphs can now be sampled.
    FontsReady,
}

/// Last known pointer position, or none while no pointer is active.
/// Updates are last-write-wins.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    position: Option<Vec2>,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, x: f32, y: f32) {
        self.position = Some(Vec2::new(x, y));
    }

    pub fn clear(&mut self) {
        self.position = None;
    }

    pub fn position(&self) -> Option<Vec2> {
        self.position
    }
}
