//! Game settings
//!
//! Loaded from JSON by the host; nothing is persisted between sessions.

use serde::{Deserialize, Serialize};

/// How the player points at the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InputProfile {
    #[default]
    Mouse,
    Touch,
}

impl InputProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputProfile::Mouse => "Mouse",
            InputProfile::Touch => "Touch",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mouse" | "desktop" => Some(InputProfile::Mouse),
            "touch" | "mobile" => Some(InputProfile::Touch),
            _ => None,
        }
    }

    /// Drag distance to cue-ball velocity
    pub fn shot_scale(&self) -> f64 {
        match self {
            InputProfile::Mouse => 0.2,
            InputProfile::Touch => 0.15,
        }
    }

    /// Grab radius around the cue ball, in ball radii. Fingers get a bigger target.
    pub fn grab_radius_factor(&self) -> f64 {
        match self {
            InputProfile::Mouse => 1.0,
            InputProfile::Touch => 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input: InputProfile,
    /// Overrides the profile's shot scale when set
    pub shot_scale: Option<f64>,
    /// Seed for the autoplayer
    pub demo_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: InputProfile::Mouse,
            shot_scale: None,
            demo_seed: 8,
        }
    }
}

impl Settings {
    pub fn from_profile(input: InputProfile) -> Self {
        Self {
            input,
            ..Self::default()
        }
    }

    pub fn shot_scale(&self) -> f64 {
        self.shot_scale.unwrap_or_else(|| self.input.shot_scale())
    }

    pub fn grab_radius(&self, ball_radius: f64) -> f64 {
        ball_radius * self.input.grab_radius_factor()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_values() {
        assert_eq!(Settings::default().shot_scale(), 0.2);
        let touch = Settings::from_profile(InputProfile::Touch);
        assert_eq!(touch.shot_scale(), 0.15);
        assert_eq!(touch.grab_radius(10.0), 30.0);
        assert_eq!(InputProfile::from_str("Mobile"), Some(InputProfile::Touch));
        assert_eq!(InputProfile::from_str("gamepad"), None);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "input": "Touch" }"#).unwrap();
        assert_eq!(settings.input, InputProfile::Touch);
        assert_eq!(settings.demo_seed, 8);
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_override_shot_scale() {
        let settings = Settings {
            shot_scale: Some(0.5),
            ..Settings::default()
        };
        assert_eq!(settings.shot_scale(), 0.5);
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}
