use thiserror::Error;

/// Errors surfaced by the swarm core.
///
/// Empty glyph samples are not errors: the field simply keeps its
/// previous targets.
#[derive(Debug, Error)]
pub enum SwarmError {
    /// The canvas or its drawing context could not be obtained.
    #[error("drawing surface unavailable: {0}")]
    MissingSurface(String),
    /// The viewport collapsed to a zero dimension.
    #[error("viewport collapsed to {width}x{height}")]
    ZeroViewport { width: f32, height: f32 },
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The configuration JSON could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
    /// The offscreen raster could not render or read back a glyph.
    #[error("glyph rasterization failed: {0}")]
    Raster(String),
    /// A frame or interval timer could not be scheduled.
    #[error("scheduling failed: {0}")]
    Scheduler(String),
}

pub type SwarmResult<T> = Result<T, SwarmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_viewport_message_names_dimensions() {
        let err = SwarmError::ZeroViewport { width: 640.0, height: 0.0 };
        assert_eq!(err.to_string(), "viewport collapsed to 640x0");
    }

    #[test]
    fn config_parse_wraps_serde_error() {
        let parse = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: SwarmError = parse.into();
        assert!(matches!(err, SwarmError::ConfigParse(_)));
    }
}
