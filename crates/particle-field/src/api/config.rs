use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::systems::palette::ColorScheme;

/// Startup configuration for a particle field.
/// Every field is optional in JSON; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    /// Number of particles (default: 500).
    pub particle_count: usize,
    /// Multiplier on frame delta time (default: 1.0).
    pub speed: f32,
    /// Render radius for every particle (default: 3.0).
    pub particle_size: f32,
    /// Color scheme for new particles (default: rainbow).
    pub color_scheme: ColorScheme,
    /// Trail entries kept per particle (default: 10).
    pub trail_length: usize,
    /// Maximum pixel distance for a connection line (default: 100).
    pub connection_distance: f32,
    /// Whether particles may flash sparkles (default: true).
    pub sparkles: bool,
    /// Inset from each viewport edge for initial placement (default: 50).
    pub spawn_margin: f32,
    /// Seed for the field's random number generator (default: 42).
    pub seed: u64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 500,
            speed: 1.0,
            particle_size: 3.0,
            color_scheme: ColorScheme::Rainbow,
            trail_length: 10,
            connection_distance: 100.0,
            sparkles: true,
            spawn_margin: 50.0,
            seed: 42,
        }
    }
}

impl FieldConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, FieldError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_trail_length(mut self, length: usize) -> Self {
        self.trail_length = length;
        self
    }

    pub fn with_connection_distance(mut self, distance: f32) -> Self {
        self.connection_distance = distance;
        self
    }

    pub fn with_color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.color_scheme = scheme;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_sparkles(mut self, enabled: bool) -> Self {
        self.sparkles = enabled;
        self
    }
}
