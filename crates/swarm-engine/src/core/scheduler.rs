/// Starts and stops the per-frame tick source.
///
/// The browser bridge implements this over `requestAnimationFrame`; a
/// running flag is checked before each new frame is requested, so `stop`
/// takes effect before the next tick.
pub trait FrameScheduler {
    /// Begin requesting ticks. Idempotent.
    fn start(&mut self);
    /// Stop requesting ticks and cancel any pending one. Idempotent.
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// A scheduler for hosts that pump ticks themselves (native loops, tests).
/// It only records the requested state.
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    running: bool,
    starts: u32,
    stops: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the scheduler actually transitioned to running.
    pub fn starts(&self) -> u32 {
        self.starts
    }

    /// How many times the scheduler actually transitioned to stopped.
    pub fn stops(&self) -> u32 {
        self.stops
    }
}

impl FrameScheduler for ManualScheduler {
    fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.starts += 1;
        }
    }

    fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.stops += 1;
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
