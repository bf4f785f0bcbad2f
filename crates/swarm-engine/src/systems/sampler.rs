//! Glyph sampling: turn a rendered symbol into a sparse point cloud.
//!
//! The symbol is rasterized at viewport size and scanned on a square grid.
//! The grid step grows with the canvas area so the number of shape points
//! stays roughly constant across screen sizes.

use glam::Vec2;

use crate::api::error::SwarmResult;
use crate::renderer::raster::{GlyphRaster, TextStyle};

/// Target cell count for the sampling grid.
pub const GRID_CELLS: f32 = 5500.0;

/// Default coverage threshold (~20% of full opacity). Anti-aliased edges pass.
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 51;

/// Grid step for a `width × height` canvas: `ceil(sqrt(area / 5500))`, at least 1.
pub fn grid_gap(width: u32, height: u32) -> u32 {
    let area = width as f32 * height as f32;
    ((area / GRID_CELLS).sqrt().ceil() as u32).max(1)
}

/// Samples glyph shapes through a host-provided raster.
pub struct GlyphSampler<R> {
    raster: R,
    font_family: String,
    alpha_threshold: u8,
}

impl<R: GlyphRaster> GlyphSampler<R> {
    pub fn new(raster: R, font_family: impl Into<String>) -> Self {
        Self {
            raster,
            font_family: font_family.into(),
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
        }
    }

    pub fn with_alpha_threshold(mut self, threshold: u8) -> Self {
        self.alpha_threshold = threshold;
        self
    }

    pub fn raster(&self) -> &R {
        &self.raster
    }

    /// Render `symbol` centered in a `width × height` raster and collect
    /// the grid cells whose alpha exceeds the threshold.
    ///
    /// Returns an empty set for blank symbols and zero-sized canvases.
    pub fn sample(
        &mut self,
        symbol: &str,
        width: f32,
        height: f32,
        font_size_ratio: f32,
    ) -> SwarmResult<Vec<Vec2>> {
        let w = width.max(0.0).floor() as u32;
        let h = height.max(0.0).floor() as u32;
        if w == 0 || h == 0 || symbol.trim().is_empty() {
            return Ok(Vec::new());
        }

        let style = TextStyle {
            symbol,
            font_px: w.min(h) as f32 * font_size_ratio,
            font_family: &self.font_family,
        };
        let mask = self.raster.rasterize(&style, w, h)?;

        let gap = grid_gap(w, h) as usize;
        let mut points = Vec::new();
        for y in (0..mask.height().min(h)).step_by(gap) {
            for x in (0..mask.width().min(w)).step_by(gap) {
                if mask.alpha_at(x, y) > self.alpha_threshold {
                    points.push(Vec2::new(x as f32, y as f32));
                }
            }
        }

        log::debug!(
            "sampled {:?}: {} points at gap {} on {}x{}",
            symbol,
            points.len(),
            gap,
            w,
            h
        );
        Ok(points)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::error::SwarmError;
    use crate::renderer::raster::AlphaMask;

    /// Test raster: draws a ring (a rough "Q" bowl) for any non-blank symbol,
    /// sized from the font size and centered like fillText with center/middle.
    pub(crate) struct RingRaster {
        pub calls: Vec<(String, f32, u32, u32)>,
    }

    impl RingRaster {
        pub(crate) fn new() -> Self {
            Self { calls: Vec::new() }
        }
    }

    impl GlyphRaster for RingRaster {
        fn rasterize(
            &mut self,
            style: &TextStyle<'_>,
            width: u32,
            height: u32,
        ) -> SwarmResult<AlphaMask> {
            self.calls.push((style.symbol.to_string(), style.font_px, width, height));
            let mut mask = AlphaMask::new(width, height);
            let center = Vec2::new(width as f32 / 2.0, height as f32 / 2.0);
            let outer = style.font_px * 0.35;
            let inner = outer * 0.6;
            for y in 0..height {
                for x in 0..width {
                    let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                    let alpha = if d <= outer && d >= inner {
                        255
                    } else if (d - outer).abs() < 1.0 {
                        // anti-aliased rim
                        40
                    } else {
                        0
                    };
                    mask.set(x, y, alpha);
                }
            }
            Ok(mask)
        }
    }

    struct BlankRaster;

    impl GlyphRaster for BlankRaster {
        fn rasterize(
            &mut self,
            _style: &TextStyle<'_>,
            width: u32,
            height: u32,
        ) -> SwarmResult<AlphaMask> {
            Ok(AlphaMask::new(width, height))
        }
    }

    struct FailingRaster;

    impl GlyphRaster for FailingRaster {
        fn rasterize(
            &mut self,
            _style: &TextStyle<'_>,
            _width: u32,
            _height: u32,
        ) -> SwarmResult<AlphaMask> {
            Err(SwarmError::Raster("context lost".into()))
        }
    }

    #[test]
    fn grid_gap_scales_with_area() {
        assert_eq!(grid_gap(1, 1), 1);
        assert_eq!(grid_gap(400, 400), 6); // sqrt(29.09) = 5.39
        assert_eq!(grid_gap(1920, 1080), 20); // sqrt(377.02) = 19.42
        assert_eq!(grid_gap(0, 0), 1);
    }

    #[test]
    fn q_on_400_square_lands_inside_canvas() {
        let mut sampler = GlyphSampler::new(RingRaster::new(), "sans-serif");
        let points = sampler.sample("Q", 400.0, 400.0, 1.0).unwrap();
        assert!(!points.is_empty());
        for p in &points {
            assert!((0.0..=400.0).contains(&p.x), "x out of bounds: {p}");
            assert!((0.0..=400.0).contains(&p.y), "y out of bounds: {p}");
        }
        let (symbol, font_px, w, h) = &sampler.raster().calls[0];
        assert_eq!(symbol, "Q");
        assert_eq!(*font_px, 400.0);
        assert_eq!((*w, *h), (400, 400));
    }

    #[test]
    fn points_sit_on_the_grid() {
        let mut sampler = GlyphSampler::new(RingRaster::new(), "sans-serif");
        let points = sampler.sample("O", 400.0, 300.0, 0.8).unwrap();
        let gap = grid_gap(400, 300) as f32;
        for p in &points {
            assert_eq!(p.x % gap, 0.0);
            assert_eq!(p.y % gap, 0.0);
        }
    }

    /// Returns a fixed first row of alpha values; everything else is clear.
    struct RowRaster(Vec<u8>);

    impl GlyphRaster for RowRaster {
        fn rasterize(
            &mut self,
            _style: &TextStyle<'_>,
            width: u32,
            height: u32,
        ) -> SwarmResult<AlphaMask> {
            let mut mask = AlphaMask::new(width, height);
            for (x, &alpha) in self.0.iter().enumerate() {
                mask.set(x as u32, 0, alpha);
            }
            Ok(mask)
        }
    }

    fn xs(points: &[Vec2]) -> Vec<f32> {
        points.iter().map(|p| p.x).collect()
    }

    #[test]
    fn threshold_filters_faint_pixels() {
        // 8x8 canvas: grid gap 1, so every pixel is a cell.
        let row = vec![40, 51, 52, 255];
        let mut strict = GlyphSampler::new(RowRaster(row.clone()), "x");
        let kept = strict.sample("Q", 8.0, 8.0, 1.0).unwrap();
        assert_eq!(xs(&kept), vec![2.0, 3.0]);
        assert!(kept.iter().all(|p| p.y == 0.0));

        let mut loose = GlyphSampler::new(RowRaster(row), "x").with_alpha_threshold(10);
        let kept = loose.sample("Q", 8.0, 8.0, 1.0).unwrap();
        assert_eq!(xs(&kept), vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn blank_glyph_yields_no_points() {
        let mut sampler = GlyphSampler::new(BlankRaster, "sans-serif");
        assert!(sampler.sample("Q", 300.0, 300.0, 0.8).unwrap().is_empty());
    }

    #[test]
    fn whitespace_and_zero_size_skip_the_raster() {
        let mut sampler = GlyphSampler::new(RingRaster::new(), "sans-serif");
        assert!(sampler.sample(" ", 300.0, 300.0, 0.8).unwrap().is_empty());
        assert!(sampler.sample("Q", 300.0, 0.0, 0.8).unwrap().is_empty());
        assert!(sampler.raster().calls.is_empty());
    }

    #[test]
    fn raster_errors_propagate() {
        let mut sampler = GlyphSampler::new(FailingRaster, "sans-serif");
        let err = sampler.sample("Q", 300.0, 300.0, 0.8).unwrap_err();
        assert!(matches!(err, SwarmError::Raster(_)));
    }
}
