pub mod canvas;
pub mod runner;
pub mod scheduler;

pub use canvas::{CanvasRaster, CanvasSurface};
pub use runner::SwarmRunner;
pub use scheduler::{MorphInterval, RafScheduler};
pub use swarm_engine::{InputEvent, SwarmConfig, SwarmError};

use wasm_bindgen::JsValue;

/// Convert a core error for the wasm boundary.
pub fn to_js_error(err: SwarmError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Generate all `#[wasm_bindgen]` exports for a swarm deployment.
///
/// Generates:
/// - `thread_local!` storage for the SwarmRunner
/// - `with_runner()` / `try_with_runner()` helpers
/// - wasm-bindgen exports for init, resize, pointer, visibility, fonts and accessors
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod config;
///
/// swarm_web::export_swarm!(config::swarm_config(), "my-swarm");
/// ```
///
/// # Arguments
///
/// - `$config`: An expression producing the default `SwarmConfig`
/// - `$name`: A string literal used in log messages
///
/// The calling crate needs `wasm_bindgen`, `log`, `console_log` and
/// `console_error_panic_hook` as dependencies.
#[macro_export]
macro_rules! export_swarm {
    ($config:expr, $name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SwarmRunner>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::SwarmRunner) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow
                    .as_mut()
                    .expect("Swarm not initialized. Call swarm_init() first.");
                f(runner)
            })
        }

        // Timer callbacks may fire after shutdown; skip them quietly.
        fn try_with_runner(f: impl FnOnce(&mut $crate::SwarmRunner)) {
            RUNNER.with(|cell| {
                if let Ok(mut borrow) = cell.try_borrow_mut() {
                    if let Some(runner) = borrow.as_mut() {
                        f(runner);
                    }
                }
            })
        }

        #[wasm_bindgen]
        pub fn swarm_init(canvas_id: &str, config_json: Option<String>) -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let config = match config_json {
                Some(json) => $crate::SwarmConfig::from_json(&json).map_err($crate::to_js_error)?,
                None => $config,
            };

            let mut runner = $crate::SwarmRunner::new(config, canvas_id, || {
                try_with_runner(|r| r.frame())
            })
            .map_err(|e| {
                log::error!("{}: {}", $name, e);
                $crate::to_js_error(e)
            })?;
            runner
                .start_interval(|| try_with_runner(|r| r.morph()))
                .map_err($crate::to_js_error)?;
            runner.start();

            // Replacing an older runner drops its frame loop and timer.
            let previous = RUNNER.with(|cell| cell.borrow_mut().replace(runner));
            drop(previous);
            log::info!("{}: initialized", $name);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn swarm_resize(width: f32, height: f32, dpr: f64) {
            with_runner(|r| r.resize(width, height, dpr));
        }

        #[wasm_bindgen]
        pub fn swarm_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.handle($crate::InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn swarm_pointer_leave() {
            with_runner(|r| r.handle($crate::InputEvent::PointerLeave));
        }

        #[wasm_bindgen]
        pub fn swarm_set_visible(visible: bool) {
            with_runner(|r| r.handle($crate::InputEvent::Visibility { visible }));
        }

        #[wasm_bindgen]
        pub fn swarm_fonts_ready() {
            with_runner(|r| r.handle($crate::InputEvent::FontsReady));
        }

        #[wasm_bindgen]
        pub fn swarm_shutdown() {
            let runner = RUNNER.with(|cell| cell.borrow_mut().take());
            if let Some(mut runner) = runner {
                runner.shutdown();
            }
        }

        // ---- Accessors ----

        #[wasm_bindgen]
        pub fn swarm_is_running() -> bool {
            with_runner(|r| r.is_running())
        }

        #[wasm_bindgen]
        pub fn swarm_glyph_index() -> u32 {
            with_runner(|r| r.glyph_index())
        }

        #[wasm_bindgen]
        pub fn swarm_particle_count() -> u32 {
            with_runner(|r| r.particle_count())
        }
    };
}
