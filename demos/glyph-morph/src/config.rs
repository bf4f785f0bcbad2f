use swarm_engine::{Color, DeviceClass, DeviceTuning, SwarmConfig};

const GLYPHS: [&str; 5] = ["&", "R", "\u{2605}", "7", "?"];

const PALETTE: [Color; 4] = [
    Color::rgb(0x38, 0xbd, 0xf8),
    Color::rgb(0x81, 0x8c, 0xf8),
    Color::rgb(0xf4, 0x72, 0xb6),
    Color::rgb(0xfb, 0xbf, 0x24),
];

/// Default configuration; the page may override it with JSON at init.
pub fn swarm_config() -> SwarmConfig {
    SwarmConfig::default()
        .with_glyphs(GLYPHS)
        .with_palette(PALETTE.to_vec())
        .with_morph_interval(3500)
        .with_seed(page_seed())
        .with_tuning(
            DeviceClass::Mobile,
            DeviceTuning { particle_count: 700, ..DeviceTuning::MOBILE },
        )
}

// Fresh layout per page load.
fn page_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}
