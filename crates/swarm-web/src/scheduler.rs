//! Browser tick sources: a cancellable `requestAnimationFrame` loop and the
//! glyph-advance interval.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use swarm_engine::{FrameScheduler, SwarmError, SwarmResult};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` loop with an explicit running flag.
///
/// The flag is checked before each frame runs and again before the next
/// frame is requested. `stop` also cancels the pending request, so a hidden
/// canvas schedules zero frames.
pub struct RafScheduler {
    running: Rc<Cell<bool>>,
    pending: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl RafScheduler {
    pub fn new(mut on_frame: impl FnMut() + 'static) -> Self {
        let running = Rc::new(Cell::new(false));
        let pending = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let (flag, slot, next) = (running.clone(), pending.clone(), callback.clone());
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            slot.set(None);
            if !flag.get() {
                return;
            }
            on_frame();
            if flag.get() {
                slot.set(request_frame(&next));
            }
        }) as Box<dyn FnMut()>));

        Self {
            running,
            pending,
            callback,
        }
    }
}

fn request_frame(callback: &FrameCallback) -> Option<i32> {
    let window = web_sys::window()?;
    let borrow = callback.borrow();
    let closure = borrow.as_ref()?;
    match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::error!("requestAnimationFrame failed: {:?}", e);
            None
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn start(&mut self) {
        if self.running.replace(true) {
            return;
        }
        if self.pending.get().is_none() {
            self.pending.set(request_frame(&self.callback));
        }
    }

    fn stop(&mut self) {
        self.running.set(false);
        if let Some(handle) = self.pending.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
    }

    fn is_running(&self) -> bool {
        self.running.get()
    }
}

impl Drop for RafScheduler {
    fn drop(&mut self) {
        self.stop();
        // the closure holds a handle to its own slot; break the cycle
        self.callback.borrow_mut().take();
    }
}

/// Repeating `setInterval` timer. Cleared on drop.
pub struct MorphInterval {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl MorphInterval {
    pub fn start(period_ms: u32, on_fire: impl FnMut() + 'static) -> SwarmResult<Self> {
        let window = web_sys::window().ok_or_else(|| SwarmError::Scheduler("no window".into()))?;
        let callback = Closure::wrap(Box::new(on_fire) as Box<dyn FnMut()>);
        let period = period_ms.min(i32::MAX as u32) as i32;
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                period,
            )
            .map_err(|e| SwarmError::Scheduler(format!("setInterval failed: {:?}", e)))?;
        Ok(Self {
            handle,
            _callback: callback,
        })
    }
}

impl Drop for MorphInterval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}
