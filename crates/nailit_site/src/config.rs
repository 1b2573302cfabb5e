// SPDX-License-Identifier: MIT OR Apache-2.0
//! Site configuration, stored as RON.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides.

use crate::navigation::Section;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "NAILIT_CONFIG";

/// Longest accepted rest between demo loops, in seconds
pub const MAX_REPEAT_DELAY: f32 = 3600.0;
/// Longest accepted preview run, in seconds
pub const MAX_RUN_SECONDS: f32 = 86_400.0;
/// Accepted preview frame rates
pub const FRAME_RATE_RANGE: std::ops::RangeInclusive<f32> = 1.0..=1000.0;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid RON for this config
    #[error("Failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Serializing the config failed
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),

    /// A value is out of range
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for config operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Animation timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Hold-setting shuffler period in milliseconds
    pub shuffle_interval_ms: u64,
    /// Design showcase period in milliseconds
    pub showcase_interval_ms: u64,
    /// Adhesion tab period in milliseconds
    pub adhesion_interval_ms: u64,
    /// Fastest keystroke delay in milliseconds
    pub typing_min_ms: u64,
    /// Slowest keystroke delay in milliseconds
    pub typing_max_ms: u64,
    /// Pause on the finished telemetry text in milliseconds
    pub typing_dwell_ms: u64,
    /// Rest between demo loops in seconds
    pub demo_repeat_delay: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            shuffle_interval_ms: 2000,
            showcase_interval_ms: 4000,
            adhesion_interval_ms: 1500,
            typing_min_ms: 20,
            typing_max_ms: 70,
            typing_dwell_ms: 5000,
            demo_repeat_delay: 1.0,
        }
    }
}

impl TimingConfig {
    /// Shuffler period
    pub fn shuffle_interval(&self) -> Duration {
        Duration::from_millis(self.shuffle_interval_ms)
    }

    /// Showcase period
    pub fn showcase_interval(&self) -> Duration {
        Duration::from_millis(self.showcase_interval_ms)
    }

    /// Adhesion tab period
    pub fn adhesion_interval(&self) -> Duration {
        Duration::from_millis(self.adhesion_interval_ms)
    }

    /// Keystroke delay bounds
    pub fn typing_range(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.typing_min_ms),
            Duration::from_millis(self.typing_max_ms),
        )
    }

    /// Pause on the finished text
    pub fn typing_dwell(&self) -> Duration {
        Duration::from_millis(self.typing_dwell_ms)
    }
}

/// Page geometry, in document pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Viewport height
    pub viewport_height: f32,
    /// Hero section height
    pub hero_height: f32,
    /// Top of the features section
    pub features_top: f32,
    /// Top of the philosophy section
    pub philosophy_top: f32,
    /// Height of the philosophy section
    pub philosophy_height: f32,
    /// Tops of the philosophy statements
    pub philosophy_lines: Vec<f32>,
    /// Top of the protocol section
    pub protocol_top: f32,
    /// Top of the first protocol card
    pub first_card_top: f32,
    /// Distance between protocol card tops
    pub card_spacing: f32,
    /// Top of the waitlist section
    pub waitlist_top: f32,
    /// Total document height
    pub page_height: f32,
    /// Scroll offset past which the navbar turns solid
    pub navbar_threshold: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport_height: 900.0,
            hero_height: 900.0,
            features_top: 900.0,
            philosophy_top: 2000.0,
            philosophy_height: 1000.0,
            philosophy_lines: vec![2160.0, 2320.0, 2480.0],
            protocol_top: 3000.0,
            first_card_top: 3300.0,
            card_spacing: 1000.0,
            waitlist_top: 6300.0,
            page_height: 7400.0,
            navbar_threshold: 50.0,
        }
    }
}

impl LayoutConfig {
    /// Top of protocol card `index`
    pub fn card_top(&self, index: usize) -> f32 {
        self.first_card_top + self.card_spacing * index as f32
    }

    /// Document offset of a navigable section
    pub fn section_offset(&self, section: Section) -> f32 {
        match section {
            Section::Top => 0.0,
            Section::Features => self.features_top,
            Section::Philosophy => self.philosophy_top,
            Section::Protocol => self.protocol_top,
            Section::Waitlist => self.waitlist_top,
        }
    }

    /// Largest reachable scroll offset
    pub fn max_scroll(&self) -> f32 {
        (self.page_height - self.viewport_height).max(0.0)
    }
}

/// Protocol card trigger lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Viewport line a card's top must reach to become current
    pub entry_fraction: f32,
    /// Viewport line where a card's band ends
    pub exit_fraction: f32,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            entry_fraction: 0.4,
            exit_fraction: 0.2,
        }
    }
}

/// Headless preview run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Length of the scripted visit in seconds
    pub run_seconds: f32,
    /// Frames per second
    pub frame_rate: f32,
    /// Scripted scroll speed in pixels per second
    pub scroll_speed: f32,
    /// Write a JSON snapshot per changed frame to stdout
    pub emit_snapshots: bool,
    /// Fixed typing seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            run_seconds: 30.0,
            frame_rate: 60.0,
            scroll_speed: 600.0,
            emit_snapshots: false,
            seed: None,
        }
    }
}

impl PreviewConfig {
    /// Time between frames
    pub fn frame_period(&self) -> Duration {
        seconds(1.0 / self.frame_rate)
    }

    /// Length of the run
    pub fn run_time(&self) -> Duration {
        seconds(self.run_seconds)
    }
}

fn seconds(secs: f32) -> Duration {
    Duration::try_from_secs_f32(secs.max(0.0)).unwrap_or(Duration::MAX)
}

/// Complete site configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Animation timing
    pub timing: TimingConfig,
    /// Page geometry
    pub layout: LayoutConfig,
    /// Protocol card triggers
    pub protocol: ProtocolConfig,
    /// Preview run
    pub preview: PreviewConfig,
}

impl SiteConfig {
    /// Parse and validate a config from RON text
    pub fn from_ron(text: &str) -> Result<Self> {
        let config: SiteConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_ron(&content)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `path` if given, otherwise from `NAILIT_CONFIG`, otherwise
    /// use the defaults
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => {
                tracing::debug!("No config given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Serialize to pretty RON
    pub fn to_ron(&self) -> Result<String> {
        let pretty = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Save to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        let timing = &self.timing;
        if timing.shuffle_interval_ms == 0
            || timing.showcase_interval_ms == 0
            || timing.adhesion_interval_ms == 0
        {
            return Err(ConfigError::Invalid("rotation intervals must be positive".into()));
        }
        if timing.typing_min_ms > timing.typing_max_ms {
            return Err(ConfigError::Invalid(format!(
                "typing_min_ms ({}) exceeds typing_max_ms ({})",
                timing.typing_min_ms, timing.typing_max_ms
            )));
        }
        if !(0.0..=MAX_REPEAT_DELAY).contains(&timing.demo_repeat_delay) {
            return Err(ConfigError::Invalid(format!(
                "demo_repeat_delay must be within 0..={MAX_REPEAT_DELAY} seconds"
            )));
        }

        let layout = &self.layout;
        if !(layout.viewport_height.is_finite() && layout.viewport_height > 0.0) {
            return Err(ConfigError::Invalid("viewport_height must be positive".into()));
        }
        if layout.page_height < layout.viewport_height {
            return Err(ConfigError::Invalid("page_height is shorter than the viewport".into()));
        }

        for (name, fraction) in [
            ("entry_fraction", self.protocol.entry_fraction),
            ("exit_fraction", self.protocol.exit_fraction),
        ] {
            if !(0.0..=1.0).contains(&fraction) {
                return Err(ConfigError::Invalid(format!("{name} must be within 0.0..=1.0")));
            }
        }

        let preview = &self.preview;
        if !FRAME_RATE_RANGE.contains(&preview.frame_rate) {
            return Err(ConfigError::Invalid(format!(
                "frame_rate must be within {}..={}",
                FRAME_RATE_RANGE.start(),
                FRAME_RATE_RANGE.end()
            )));
        }
        if !(0.0..=MAX_RUN_SECONDS).contains(&preview.run_seconds) {
            return Err(ConfigError::Invalid(format!(
                "run_seconds must be within 0..={MAX_RUN_SECONDS}"
            )));
        }
        if !preview.scroll_speed.is_finite() {
            return Err(ConfigError::Invalid("scroll_speed must be finite".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SiteConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timing.shuffle_interval(), Duration::from_secs(2));
        assert_eq!(config.timing.showcase_interval(), Duration::from_secs(4));
        assert_eq!(config.timing.adhesion_interval(), Duration::from_millis(1500));
    }

    #[test]
    fn test_round_trip() {
        let mut config = SiteConfig::default();
        config.preview.seed = Some(7);
        config.timing.typing_dwell_ms = 3000;
        let text = config.to_ron().unwrap();
        let loaded = SiteConfig::from_ron(&text).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = SiteConfig::from_ron("(preview: (run_seconds: 5.0))").unwrap();
        assert_eq!(config.preview.run_seconds, 5.0);
        assert_eq!(config.preview.frame_rate, 60.0);
        assert_eq!(config.timing, TimingConfig::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = SiteConfig::from_ron("(timing: (typing_min_ms: 90, typing_max_ms: 10))").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = SiteConfig::from_ron("(protocol: (entry_fraction: 1.5))").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = SiteConfig::from_ron("(preview: (frame_rate: 0.0))").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        assert!(matches!(SiteConfig::from_ron("(timing: 3)"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rejects_out_of_range_durations() {
        for text in [
            "(timing: (demo_repeat_delay: 1e30))",
            "(timing: (demo_repeat_delay: -1.0))",
            "(preview: (run_seconds: 1e30))",
            "(preview: (frame_rate: 1e-30))",
            "(preview: (frame_rate: 5000.0))",
        ] {
            let err = SiteConfig::from_ron(text).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{text} accepted");
        }
        assert!(SiteConfig::from_ron("(timing: (demo_repeat_delay: 3600.0))").is_ok());
    }

    #[test]
    fn test_preview_durations_saturate() {
        // Unvalidated values still convert without panicking
        let preview = PreviewConfig {
            run_seconds: 1e30,
            frame_rate: 1e-30,
            ..PreviewConfig::default()
        };
        assert_eq!(preview.run_time(), Duration::MAX);
        assert_eq!(preview.frame_period(), Duration::MAX);

        let preview = PreviewConfig::default();
        assert_eq!(preview.run_time(), Duration::from_secs(30));
    }

    #[test]
    fn test_layout_offsets() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.card_top(0), 3300.0);
        assert_eq!(layout.card_top(2), 5300.0);
        assert_eq!(layout.section_offset(Section::Waitlist), 6300.0);
        assert_eq!(layout.max_scroll(), 6500.0);
    }

    #[test]
    fn test_missing_file() {
        let err = SiteConfig::load(Path::new("/nonexistent/nailit.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
