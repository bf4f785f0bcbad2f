//! Offscreen glyph rasterization contract.

use crate::api::error::{SwarmError, SwarmResult};

/// How a glyph is drawn into the offscreen raster: bold, centered on both axes.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle<'a> {
    pub symbol: &'a str,
    /// Font size in pixels.
    pub font_px: f32,
    pub font_family: &'a str,
}

impl TextStyle<'_> {
    /// CSS font shorthand, e.g. `bold 320px sans-serif`.
    pub fn css_font(&self) -> String {
        format!("bold {}px {}", self.font_px.round(), self.font_family)
    }
}

/// Per-pixel coverage read back from a raster, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl AlphaMask {
    /// A fully transparent mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            alpha: vec![0; width as usize * height as usize],
        }
    }

    /// Build from RGBA pixel data (e.g. `ImageData.data`), keeping the alpha channel.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> SwarmResult<Self> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(SwarmError::Raster(format!(
                "rgba buffer has {} bytes, expected {expected}",
                rgba.len()
            )));
        }
        let alpha = rgba.chunks_exact(4).map(|px| px[3]).collect();
        Ok(Self { width, height, alpha })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Alpha at (x, y); 0 outside the mask.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.alpha[y as usize * self.width as usize + x as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, alpha: u8) {
        if x < self.width && y < self.height {
            self.alpha[y as usize * self.width as usize + x as usize] = alpha;
        }
    }
}

/// Renders a styled symbol into an offscreen raster and reads back its alpha.
pub trait GlyphRaster {
    fn rasterize(
        &mut self,
        style: &TextStyle<'_>,
        width: u32,
        height: u32,
    ) -> SwarmResult<AlphaMask>;
}

impl<R: GlyphRaster + ?Sized> GlyphRaster for Box<R> {
    fn rasterize(
        &mut self,
        style: &TextStyle<'_>,
        width: u32,
        height: u32,
    ) -> SwarmResult<AlphaMask> {
        (**self).rasterize(style, width, height)
    }
}
