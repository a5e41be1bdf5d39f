use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::camera::DEFAULT_SIGNAL_AMPLIFIER;

/// Camera tunables, loadable from a JSON file.
///
/// `step_scale` multiplies the per-frame position integration. It is a fixed
/// per-frame factor, not a wall-clock delta, so movement speed tracks frame
/// rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gain converting raw mouse deltas to degrees.
    pub signal_amplifier: f32,
    /// Steady-state speed while a movement key is held.
    pub max_velocity: f32,
    /// Blend factor toward the commanded velocity while accelerating.
    pub acceleration: f32,
    /// Blend factor toward zero while coasting to rest.
    pub deceleration: f32,
    pub step_scale: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            signal_amplifier: DEFAULT_SIGNAL_AMPLIFIER,
            max_velocity: 0.1,
            acceleration: 0.2,
            deceleration: 0.1,
            step_scale: 1.0,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse settings file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_constants() {
        let settings = Settings::default();
        assert_eq!(settings.signal_amplifier, 0.1);
        assert_eq!(settings.max_velocity, 0.1);
        assert_eq!(settings.acceleration, 0.2);
        assert_eq!(settings.deceleration, 0.1);
        assert_eq!(settings.step_scale, 1.0);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"max_velocity": 0.25}"#)
            .expect("partial settings should parse");
        assert_eq!(settings.max_velocity, 0.25);
        assert_eq!(settings.acceleration, 0.2);
    }

    #[test]
    fn settings_round_trip_through_json() {
        let settings = Settings {
            signal_amplifier: 0.05,
            ..Settings::default()
        };
        let text = serde_json::to_string(&settings).expect("serialize");
        let back: Settings = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(back.signal_amplifier, 0.05);
    }
}
