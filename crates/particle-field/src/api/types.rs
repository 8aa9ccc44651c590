use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::systems::palette::ColorScheme;

/// A typed configuration change delivered from the host's control panel.
///
/// Serialized as `{"option": "<name>", "value": <payload>}`; options without a
/// payload omit `value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "option", content = "value", rename_all = "camelCase")]
pub enum ConfigEvent {
    /// Set the particle count and rebuild the field.
    ParticleCount(usize),
    /// Set the delta-time multiplier.
    Speed(f32),
    /// Set every particle's render radius.
    ParticleSize(f32),
    /// Recolor every particle from a new scheme.
    ColorScheme(ColorScheme),
    /// Set the trail length for particles created from now on, and rebuild.
    TrailLength(usize),
    /// Set the connection distance threshold.
    ConnectionDistance(f32),
    /// Enable or disable sparkle flashes.
    Sparkles(bool),
    /// Rebuild the field with the current parameters.
    Reset,
    Pause,
    Resume,
    TogglePause,
    /// The host viewport changed. `width`/`height` are the window-level size,
    /// used where the surface itself measures as zero.
    ViewportResize { width: f32, height: f32 },
}

impl ConfigEvent {
    /// Build an event from an option name and its textual value, as delivered by
    /// form controls. Action options (`reset`, `pause`, ...) ignore the value.
    pub fn from_option(option: &str, value: &str) -> Result<Self, FieldError> {
        let value = value.trim();
        let event = match option {
            "particleCount" => Self::ParticleCount(parse_number(option, value)?),
            "speed" => Self::Speed(parse_number(option, value)?),
            "particleSize" => Self::ParticleSize(parse_number(option, value)?),
            "colorScheme" => Self::ColorScheme(ColorScheme::from_name(value)),
            "trailLength" => Self::TrailLength(parse_number(option, value)?),
            "connectionDistance" => Self::ConnectionDistance(parse_number(option, value)?),
            "sparkles" => Self::Sparkles(parse_flag(option, value)?),
            "reset" => Self::Reset,
            "pause" => Self::Pause,
            "resume" => Self::Resume,
            "togglePause" => Self::TogglePause,
            "viewportResize" => {
                let (w, h) = value.split_once(['x', ','])
                    .ok_or_else(|| invalid(option, "WIDTHxHEIGHT"))?;
                Self::ViewportResize {
                    width: parse_number(option, w.trim())?,
                    height: parse_number(option, h.trim())?,
                }
            }
            other => return Err(FieldError::UnknownOption(other.to_string())),
        };
        Ok(event)
    }

    /// Parse an event from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, FieldError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether applying this event discards and recreates the particles.
    pub fn rebuilds(&self) -> bool {
        matches!(
            self,
            Self::ParticleCount(_) | Self::TrailLength(_) | Self::Reset | Self::ViewportResize { .. }
        )
    }
}

fn invalid(option: &str, expected: &'static str) -> FieldError {
    FieldError::InvalidValue {
        option: option.to_string(),
        expected,
    }
}

fn parse_number<T: std::str::FromStr>(option: &str, value: &str) -> Result<T, FieldError> {
    value.parse().map_err(|_| invalid(option, "a number"))
}

fn parse_flag(option: &str, value: &str) -> Result<bool, FieldError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Ok(true),
        "false" | "0" | "off" | "no" => Ok(false),
        _ => Err(invalid(option, "a boolean")),
    }
}
