//! Configuration parameters for the editing pipeline

use serde::{Deserialize, Serialize};

use crate::editing::reverse::ReverseMode;
use crate::editing::trim::TrimPolicy;
use crate::error::EditError;

/// Editor configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    // One-shot operations
    /// Noise gate threshold (default: 0.01)
    /// Samples with an absolute value below this are zeroed
    pub noise_gate_threshold: f32,

    /// Silence threshold for leading/trailing trim (default: 0.001)
    /// A frame is audible once its scanned channel exceeds this value
    pub silence_threshold: f32,

    /// How trim ranges past the end of the buffer are handled (default: Reject)
    pub trim_policy: TrimPolicy,

    /// Sample ordering used by reverse (default: Interleaved)
    pub reverse_mode: ReverseMode,

    // Session
    /// Upper bound for the session gain control (default: 3.0)
    pub max_volume: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            noise_gate_threshold: 0.01,
            silence_threshold: 0.001,
            trim_policy: TrimPolicy::Reject,
            reverse_mode: ReverseMode::Interleaved,
            max_volume: 3.0,
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    ///
    /// # Example
    ///
    /// ```
    /// use pcm_editor::EditorConfig;
    ///
    /// let config = EditorConfig::from_json(r#"{ "trim_policy": "Clamp" }"#)?;
    /// assert_eq!(config.noise_gate_threshold, 0.01);
    /// # Ok::<(), pcm_editor::EditError>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self, EditError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, EditError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every threshold is usable
    pub fn validate(&self) -> Result<(), EditError> {
        crate::error::check_non_negative("noise_gate_threshold", self.noise_gate_threshold)?;
        crate::error::check_non_negative("silence_threshold", self.silence_threshold)?;
        crate::error::check_non_negative("max_volume", self.max_volume)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.noise_gate_threshold, 0.01);
        assert_eq!(config.silence_threshold, 0.001);
        assert_eq!(config.trim_policy, TrimPolicy::Reject);
        assert_eq!(config.reverse_mode, ReverseMode::Interleaved);
        assert_eq!(config.max_volume, 3.0);
    }

    #[test]
    fn test_json_partial_override() {
        let config = EditorConfig::from_json(
            r#"{ "trim_policy": "Clamp", "reverse_mode": "FramePreserving" }"#,
        )
        .unwrap();
        assert_eq!(config.trim_policy, TrimPolicy::Clamp);
        assert_eq!(config.reverse_mode, ReverseMode::FramePreserving);
        assert_eq!(config.silence_threshold, 0.001);
    }

    #[test]
    fn test_json_rejects_negative_threshold() {
        let result = EditorConfig::from_json(r#"{ "noise_gate_threshold": -1.0 }"#);
        assert!(matches!(result, Err(EditError::InvalidParameter(_))));
    }

    #[test]
    fn test_json_rejects_garbage() {
        let result = EditorConfig::from_json("not json");
        assert!(matches!(result, Err(EditError::InvalidParameter(_))));
    }

    #[test]
    fn test_json_preserves_fields() {
        let mut config = EditorConfig::default();
        config.max_volume = 2.0;
        config.trim_policy = TrimPolicy::Clamp;
        let json = config.to_json().unwrap();
        assert_eq!(EditorConfig::from_json(&json).unwrap(), config);
    }
}
