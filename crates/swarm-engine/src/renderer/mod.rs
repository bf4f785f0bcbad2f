pub mod instance;
pub mod raster;
pub mod traits;

// Re-export key types for convenient access
pub use instance::{CircleInstance, InstanceBuffer};
pub use raster::{AlphaMask, GlyphRaster, TextStyle};
pub use traits::Surface;
