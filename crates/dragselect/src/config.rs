#![forbid(unsafe_code)]

//! Tunables for drag selection and edge auto-scroll.
//!
//! Every field has a default, so a partial TOML or JSON document only needs
//! to name what it overrides:
//!
//! ```toml
//! mode = "range"
//! auto_scroll_delay_ms = 25
//!
//! [hotspot]
//! height = 56.0
//! offset_top = 0.0
//! offset_bottom = 0.0
//! velocity_divisor = 2.0
//! ```
//!
//! Omitting `[hotspot]` keeps the default band; to turn auto-scroll off,
//! build the config with [`DragSelectConfig::without_auto_scroll`].

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How pointer movement maps to selection changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragMode {
    /// Select the contiguous run between the anchor and the pointer.
    #[default]
    Range,
    /// Toggle each item the pointer passes over.
    Path,
}

/// Geometry of the top and bottom auto-scroll bands, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotspotConfig {
    /// Height of each band.
    pub height: f32,
    /// Distance from the top of the list to the top band.
    pub offset_top: f32,
    /// Distance from the bottom of the list to the bottom band.
    pub offset_bottom: f32,
    /// Band depth is divided by this to get the scroll step per tick.
    pub velocity_divisor: f32,
}

impl Default for HotspotConfig {
    fn default() -> Self {
        Self {
            height: 56.0,
            offset_top: 0.0,
            offset_bottom: 0.0,
            velocity_divisor: 2.0,
        }
    }
}

/// Top-level drag-select configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragSelectConfig {
    pub mode: DragMode,
    /// Interval between auto-scroll ticks.
    pub auto_scroll_delay_ms: u64,
    /// Hold time before a stationary press starts a drag.
    pub long_press_ms: u64,
    /// Movement (pixels, manhattan) that cancels a pending long press.
    pub touch_slop: f32,
    /// Auto-scroll bands; `None` disables auto-scroll.
    pub hotspot: Option<HotspotConfig>,
}

impl Default for DragSelectConfig {
    fn default() -> Self {
        Self {
            mode: DragMode::Range,
            auto_scroll_delay_ms: 25,
            long_press_ms: 500,
            touch_slop: 8.0,
            hotspot: Some(HotspotConfig::default()),
        }
    }
}

impl DragSelectConfig {
    #[must_use]
    pub fn with_mode(mut self, mode: DragMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_hotspot(mut self, hotspot: HotspotConfig) -> Self {
        self.hotspot = Some(hotspot);
        self
    }

    #[must_use]
    pub fn without_auto_scroll(mut self) -> Self {
        self.hotspot = None;
        self
    }

    #[must_use]
    pub fn with_auto_scroll_delay(mut self, delay: Duration) -> Self {
        self.auto_scroll_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn with_long_press(mut self, threshold: Duration) -> Self {
        self.long_press_ms = u64::try_from(threshold.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn with_touch_slop(mut self, slop: f32) -> Self {
        self.touch_slop = slop;
        self
    }

    #[inline]
    #[must_use]
    pub fn auto_scroll_delay(&self) -> Duration {
        Duration::from_millis(self.auto_scroll_delay_ms)
    }

    #[inline]
    #[must_use]
    pub fn long_press(&self) -> Duration {
        Duration::from_millis(self.long_press_ms)
    }

    /// Load from a TOML string and validate.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk and validate.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string and validate.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Check every parameter. An empty list means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if let Some(h) = &self.hotspot {
            if !h.height.is_finite() || h.height < 0.0 {
                errors.push(format!("hotspot.height must be >= 0, got {}", h.height));
            }
            if !h.offset_top.is_finite() || h.offset_top < 0.0 {
                errors.push(format!(
                    "hotspot.offset_top must be >= 0, got {}",
                    h.offset_top
                ));
            }
            if !h.offset_bottom.is_finite() || h.offset_bottom < 0.0 {
                errors.push(format!(
                    "hotspot.offset_bottom must be >= 0, got {}",
                    h.offset_bottom
                ));
            }
            if !h.velocity_divisor.is_finite() || h.velocity_divisor <= 0.0 {
                errors.push(format!(
                    "hotspot.velocity_divisor must be > 0, got {}",
                    h.velocity_divisor
                ));
            }
            if self.auto_scroll_delay_ms == 0 {
                errors.push("auto_scroll_delay_ms must be > 0".into());
            }
        }

        if !self.touch_slop.is_finite() || self.touch_slop < 0.0 {
            errors.push(format!("touch_slop must be >= 0, got {}", self.touch_slop));
        }

        errors
    }

    /// Return `self` if [`validate`](Self::validate) finds nothing.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Failure to load or accept a [`DragSelectConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Io(std::io::Error),
    /// The document is not valid TOML for this schema.
    Toml(toml::de::Error),
    /// The document is not valid JSON for this schema.
    Json(serde_json::Error),
    /// The document parsed but some values are out of range.
    Validation(Vec<String>),
}

impl ConfigError {
    /// Out-of-range values, empty for parse and I/O failures.
    #[must_use]
    pub fn problems(&self) -> &[String] {
        match self {
            Self::Validation(problems) => problems,
            _ => &[],
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dragselect config: ")?;
        match self {
            Self::Io(e) => write!(f, "cannot read file ({e})"),
            Self::Toml(e) => write!(f, "malformed TOML ({e})"),
            Self::Json(e) => write!(f, "malformed JSON ({e})"),
            Self::Validation(problems) if problems.len() == 1 => {
                write!(f, "rejected, {}", problems[0])
            }
            Self::Validation(problems) => {
                write!(f, "rejected, {} problems: ", problems.len())?;
                f.write_str(&problems.join(", "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = DragSelectConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.mode, DragMode::Range);
        assert_eq!(config.auto_scroll_delay(), Duration::from_millis(25));
        assert_eq!(config.long_press(), Duration::from_millis(500));
        let hotspot = config.hotspot.unwrap();
        assert_eq!(hotspot.height, 56.0);
        assert_eq!(hotspot.velocity_divisor, 2.0);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = DragSelectConfig::from_toml_str(
            r#"
            mode = "path"

            [hotspot]
            height = 80.0
            "#,
        )
        .unwrap();
        assert_eq!(config.mode, DragMode::Path);
        let hotspot = config.hotspot.unwrap();
        assert_eq!(hotspot.height, 80.0);
        assert_eq!(hotspot.offset_top, 0.0);
        assert_eq!(hotspot.velocity_divisor, 2.0);
        assert_eq!(config.auto_scroll_delay_ms, 25);
    }

    #[test]
    fn json_null_hotspot_disables_auto_scroll() {
        let config = DragSelectConfig::from_json_str(r#"{"hotspot": null}"#).unwrap();
        assert!(config.hotspot.is_none());
    }

    #[test]
    fn invalid_values_are_reported_together() {
        let config = DragSelectConfig::default()
            .with_hotspot(HotspotConfig {
                height: -1.0,
                velocity_divisor: 0.0,
                ..HotspotConfig::default()
            })
            .with_auto_scroll_delay(Duration::ZERO);
        let errors = config.validate();
        assert_eq!(errors.len(), 3, "{errors:?}");

        let err = config.validated().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref v) if v.len() == 3));
        assert_eq!(err.problems().len(), 3);
        assert!(
            err.to_string()
                .starts_with("dragselect config: rejected, 3 problems: ")
        );
    }

    #[test]
    fn single_problem_message() {
        let err = DragSelectConfig::default()
            .with_touch_slop(-1.0)
            .validated()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "dragselect config: rejected, touch_slop must be >= 0, got -1"
        );
    }

    #[test]
    fn zero_delay_is_fine_without_auto_scroll() {
        let config = DragSelectConfig::default()
            .without_auto_scroll()
            .with_auto_scroll_delay(Duration::ZERO);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = DragSelectConfig::from_toml_str("mode = [").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
        assert!(err.problems().is_empty());
        assert!(err.to_string().starts_with("dragselect config: malformed TOML"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn unknown_mode_is_a_parse_error() {
        let err = DragSelectConfig::from_json_str(r#"{"mode": "lasso"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn toml_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dragselect.toml");
        let original = DragSelectConfig::default().with_touch_slop(12.0);
        std::fs::write(&path, toml::to_string(&original).unwrap()).unwrap();
        assert_eq!(DragSelectConfig::from_toml_file(&path).unwrap(), original);

        let missing = DragSelectConfig::from_toml_file(dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
