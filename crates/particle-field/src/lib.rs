pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::config::FieldConfig;
pub use api::types::ConfigEvent;
pub use components::particle::Particle;
pub use components::trail::{Trail, TrailPoint};
pub use core::field::{ParticleField, Viewport, FADE_OVERLAY};
pub use core::frame_loop::{FrameDriver, FrameHandle, FrameReport, FrameScheduler};
pub use core::time::FpsCounter;
pub use error::FieldError;
pub use input::queue::ConfigQueue;
pub use renderer::{Color, DrawCommand, RecordingSurface, Surface, SurfaceMetrics, with_alpha};
pub use systems::connections::{Connection, find_connections};
pub use systems::palette::ColorScheme;
pub use systems::rng::Rng;
