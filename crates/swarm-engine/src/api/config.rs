use serde::{Deserialize, Serialize};

use super::error::{SwarmError, SwarmResult};
use super::types::Color;

/// Bold system-font stack used to render glyphs.
pub const DEFAULT_FONT_FAMILY: &str =
    "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif";

/// Device class, selected from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceClass {
    Desktop,
    Mobile,
}

impl DeviceClass {
    /// Viewports narrower than `breakpoint` count as mobile.
    pub fn from_viewport_width(width: f32, breakpoint: f32) -> Self {
        if width < breakpoint {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }
}

/// Per-device-class tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceTuning {
    /// Size of the particle pool.
    pub particle_count: usize,
    /// Full width of the uniform target jitter, in logical pixels.
    pub jitter: f32,
    /// Pointer repulsion radius, in logical pixels.
    pub mouse_radius: f32,
}

impl DeviceTuning {
    pub const DESKTOP: DeviceTuning = DeviceTuning {
        particle_count: 2000,
        jitter: 4.0,
        mouse_radius: 100.0,
    };

    pub const MOBILE: DeviceTuning = DeviceTuning {
        particle_count: 900,
        jitter: 5.0,
        mouse_radius: 70.0,
    };
}

/// Swarm configuration, supplied once at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// Particle colors; each particle draws one at creation.
    pub palette: Vec<Color>,
    /// Symbols to cycle through, in order.
    pub glyphs: Vec<String>,
    /// Milliseconds between glyph advances.
    pub morph_interval_ms: u32,
    /// Font size as a fraction of `min(width, height)`.
    pub font_size_ratio: f32,
    pub font_family: String,
    /// Raster alpha above which a cell becomes a shape point.
    pub alpha_threshold: u8,
    /// Per-tick velocity retention.
    pub friction: f32,
    /// Band for the per-particle spring coefficient.
    pub ease_range: (f32, f32),
    /// Band for the per-particle base radius.
    pub size_range: (f32, f32),
    /// Band for the per-particle breathing speed (radians per tick).
    pub breathe_speed_range: (f32, f32),
    pub desktop: DeviceTuning,
    pub mobile: DeviceTuning,
    /// Viewport width below which the mobile tuning applies.
    pub mobile_breakpoint: f32,
    /// Seed for the deterministic particle RNG.
    pub seed: u64,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            palette: vec![
                Color::rgb(0x63, 0x66, 0xf1),
                Color::rgb(0x8b, 0x5c, 0xf6),
                Color::rgb(0xec, 0x48, 0x99),
                Color::rgb(0x06, 0xb6, 0xd4),
                Color::rgb(0xf5, 0x9e, 0x0b),
            ],
            glyphs: vec!["A".into(), "B".into(), "C".into()],
            morph_interval_ms: 4000,
            font_size_ratio: 0.8,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            alpha_threshold: 51,
            friction: 0.66,
            ease_range: (0.08, 0.14),
            size_range: (1.2, 2.6),
            breathe_speed_range: (0.02, 0.05),
            desktop: DeviceTuning::DESKTOP,
            mobile: DeviceTuning::MOBILE,
            mobile_breakpoint: 768.0,
            seed: 0x5eed_1e55,
        }
    }
}

impl SwarmConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> SwarmResult<Self> {
        let config: SwarmConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_glyphs<I, S>(mut self, glyphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.glyphs = glyphs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_morph_interval(mut self, ms: u32) -> Self {
        self.morph_interval_ms = ms;
        self
    }

    pub fn with_tuning(mut self, class: DeviceClass, tuning: DeviceTuning) -> Self {
        match class {
            DeviceClass::Desktop => self.desktop = tuning,
            DeviceClass::Mobile => self.mobile = tuning,
        }
        self
    }

    /// Tuning for a device class.
    pub fn tuning(&self, class: DeviceClass) -> DeviceTuning {
        match class {
            DeviceClass::Desktop => self.desktop,
            DeviceClass::Mobile => self.mobile,
        }
    }

    pub fn device_class(&self, viewport_width: f32) -> DeviceClass {
        DeviceClass::from_viewport_width(viewport_width, self.mobile_breakpoint)
    }

    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> SwarmResult<()> {
        if self.palette.is_empty() {
            return Err(invalid("palette must not be empty"));
        }
        if self.glyphs.is_empty() {
            return Err(invalid("glyph sequence must not be empty"));
        }
        if !(self.font_size_ratio > 0.0) {
            return Err(invalid("font_size_ratio must be positive"));
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(invalid("friction must be in (0, 1]"));
        }
        if self.morph_interval_ms == 0 {
            return Err(invalid("morph_interval_ms must be non-zero"));
        }
        for (name, (lo, hi)) in [
            ("ease_range", self.ease_range),
            ("size_range", self.size_range),
            ("breathe_speed_range", self.breathe_speed_range),
        ] {
            if !(lo <= hi) || lo < 0.0 {
                return Err(SwarmError::InvalidConfig(format!(
                    "{name} must be a non-negative, ordered band (got {lo}..{hi})"
                )));
            }
        }
        for (name, tuning) in [("desktop", self.desktop), ("mobile", self.mobile)] {
            if tuning.particle_count == 0 {
                return Err(SwarmError::InvalidConfig(format!(
                    "{name}.particle_count must be at least 1"
                )));
            }
            if tuning.jitter < 0.0 || tuning.mouse_radius < 0.0 {
                return Err(SwarmError::InvalidConfig(format!(
                    "{name} jitter and mouse_radius must be non-negative"
                )));
            }
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> SwarmError {
    SwarmError::InvalidConfig(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SwarmConfig::default().validate().is_ok());
    }

    #[test]
    fn from_json_fills_defaults() {
        let config = SwarmConfig::from_json(r##"{
            "glyphs": ["Q", "R"],
            "palette": ["#fff", "#000000"],
            "mobile": { "particle_count": 300, "jitter": 5.0, "mouse_radius": 60.0 }
        }"##)
        .unwrap();
        assert_eq!(config.glyphs, vec!["Q", "R"]);
        assert_eq!(config.palette.len(), 2);
        assert_eq!(config.mobile.particle_count, 300);
        assert_eq!(config.desktop, DeviceTuning::DESKTOP);
        assert_eq!(config.morph_interval_ms, 4000);
        assert_eq!(config.ease_range, (0.08, 0.14));
    }

    #[test]
    fn from_json_rejects_empty_glyphs() {
        let err = SwarmConfig::from_json(r#"{ "glyphs": [] }"#).unwrap_err();
        assert!(matches!(err, SwarmError::InvalidConfig(_)));
    }

    #[test]
    fn from_json_rejects_bad_color() {
        let err = SwarmConfig::from_json(r#"{ "palette": ["red"] }"#).unwrap_err();
        assert!(matches!(err, SwarmError::ConfigParse(_)));
    }

    #[test]
    fn validate_rejects_inverted_band() {
        let config = SwarmConfig {
            size_range: (3.0, 1.0),
            ..SwarmConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_particles() {
        let config = SwarmConfig::default().with_tuning(
            DeviceClass::Mobile,
            DeviceTuning {
                particle_count: 0,
                ..DeviceTuning::MOBILE
            },
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn device_class_follows_breakpoint() {
        let config = SwarmConfig::default();
        assert_eq!(config.device_class(375.0), DeviceClass::Mobile);
        assert_eq!(config.device_class(1280.0), DeviceClass::Desktop);
        assert_eq!(config.tuning(DeviceClass::Mobile), DeviceTuning::MOBILE);
    }
}
