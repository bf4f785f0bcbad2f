//! Canvas 2D implementations of the swarm drawing and raster contracts.

use std::f64::consts::TAU;

use swarm_engine::{
    AlphaMask, Color, GlyphRaster, Surface, SwarmError, SwarmResult, TextStyle, Vec2,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

fn describe(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

/// Look up the on-screen canvas by element id.
pub fn find_canvas(document: &Document, id: &str) -> SwarmResult<HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| SwarmError::MissingSurface(format!("no element with id {id:?}")))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| SwarmError::MissingSurface(format!("element {id:?} is not a <canvas>")))
}

/// Acquire a 2D context. `read_back` hints the browser to keep pixels on the CPU.
pub fn context_2d(
    canvas: &HtmlCanvasElement,
    read_back: bool,
) -> SwarmResult<CanvasRenderingContext2d> {
    let options = js_sys::Object::new();
    if read_back {
        js_sys::Reflect::set(&options, &JsValue::from_str("willReadFrequently"), &JsValue::TRUE)
            .map_err(|e| SwarmError::MissingSurface(describe(e)))?;
    }
    canvas
        .get_context_with_context_options("2d", &options)
        .map_err(|e| SwarmError::MissingSurface(describe(e)))?
        .ok_or_else(|| SwarmError::MissingSurface("2d context unavailable".into()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| SwarmError::MissingSurface("context is not a CanvasRenderingContext2d".into()))
}

/// Detached canvas used to render glyphs and read back their alpha.
pub struct CanvasRaster {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRaster {
    pub fn new(document: &Document) -> SwarmResult<Self> {
        let canvas = document
            .create_element("canvas")
            .map_err(|e| SwarmError::MissingSurface(describe(e)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SwarmError::MissingSurface("created element is not a <canvas>".into()))?;
        let ctx = context_2d(&canvas, true)?;
        Ok(Self { canvas, ctx })
    }
}

impl GlyphRaster for CanvasRaster {
    fn rasterize(
        &mut self,
        style: &TextStyle<'_>,
        width: u32,
        height: u32,
    ) -> SwarmResult<AlphaMask> {
        // Resizing a canvas resets its context state, so style after it.
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }
        let (w, h) = (width as f64, height as f64);
        self.ctx.clear_rect(0.0, 0.0, w, h);
        self.ctx.set_font(&style.css_font());
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str("#fff");
        self.ctx
            .fill_text(style.symbol, w / 2.0, h / 2.0)
            .map_err(|e| SwarmError::Raster(describe(e)))?;

        let image = self
            .ctx
            .get_image_data(0.0, 0.0, w, h)
            .map_err(|e| SwarmError::Raster(describe(e)))?;
        let data = image.data();
        AlphaMask::from_rgba(width, height, &data.0)
    }
}

/// The visible canvas. Draws in logical pixels; the backing store is
/// scaled by the device pixel ratio.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> SwarmResult<Self> {
        let ctx = context_2d(&canvas, false)?;
        Ok(Self { canvas, ctx })
    }

    /// Size the backing store for `width × height` logical pixels at `dpr`.
    pub fn resize(&mut self, width: f32, height: f32, dpr: f64) -> SwarmResult<()> {
        let dpr = if dpr > 0.0 { dpr } else { 1.0 };
        self.canvas.set_width((width as f64 * dpr).round() as u32);
        self.canvas.set_height((height as f64 * dpr).round() as u32);
        self.ctx
            .set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
            .map_err(|e| SwarmError::MissingSurface(describe(e)))
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, opacity: f32) {
        self.ctx.begin_path();
        // arc() throws on negative radii
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_err()
        {
            return;
        }
        self.ctx.set_fill_style_str(&color.to_css(opacity));
        self.ctx.fill();
    }
}
