pub mod color;
pub mod surface;
pub mod recording;

// Re-export key types for convenient access
pub use color::Color;
pub use surface::{Surface, SurfaceMetrics, with_alpha};
pub use recording::{DrawCommand, RecordingSurface};
