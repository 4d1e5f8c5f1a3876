//! Race configuration
//!
//! Race parameters come from a small JSON (or TOML) document:
//!
//! ```json
//! {
//!     "laps": 2,
//!     "lapLen": 3651,
//!     "penaltyLen": 50,
//!     "firingLines": 1,
//!     "start": "09:30:00",
//!     "startDelta": "00:00:30"
//! }
//! ```

use crate::clock::{clock_as_duration, parse_clock_lenient};
use crate::types::{BiathlonError, Result};
use chrono::{Duration, NaiveTime};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Parameters of a single race
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceConfig {
    /// Number of main laps
    pub laps: u32,
    /// Length of one main lap
    pub lap_len: u32,
    /// Length of one penalty lap, run once per missed shot
    pub penalty_len: u32,
    /// Number of firing lines per lap
    pub firing_lines: u32,
    /// Scheduled mass start time
    pub start: NaiveTime,
    /// How late after the drawn start time a competitor may still start
    pub start_delta: Duration,
}

/// On-disk shape of the configuration document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RaceConfigFile {
    pub laps: u32,
    pub lap_len: u32,
    pub penalty_len: u32,
    pub firing_lines: u32,
    pub start: String,
    pub start_delta: String,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            laps: 0,
            lap_len: 0,
            penalty_len: 0,
            firing_lines: 0,
            start: NaiveTime::default(),
            start_delta: Duration::zero(),
        }
    }
}

impl RaceConfig {
    /// Create a configuration with every parameter zeroed
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the number of main laps
    pub fn with_laps(mut self, laps: u32) -> Self {
        self.laps = laps;
        self
    }

    /// Builder method: set the main lap length
    pub fn with_lap_len(mut self, lap_len: u32) -> Self {
        self.lap_len = lap_len;
        self
    }

    /// Builder method: set the penalty lap length
    pub fn with_penalty_len(mut self, penalty_len: u32) -> Self {
        self.penalty_len = penalty_len;
        self
    }

    /// Builder method: set the number of firing lines
    pub fn with_firing_lines(mut self, firing_lines: u32) -> Self {
        self.firing_lines = firing_lines;
        self
    }

    /// Builder method: set the scheduled start time
    pub fn with_start(mut self, start: NaiveTime) -> Self {
        self.start = start;
        self
    }

    /// Builder method: set the start window tolerance
    pub fn with_start_delta(mut self, start_delta: Duration) -> Self {
        self.start_delta = start_delta;
        self
    }

    /// Convert the raw document into validated race parameters
    pub fn from_file_contents(raw: RaceConfigFile) -> Result<Self> {
        let start = parse_clock_lenient(&raw.start)
            .map_err(|_| BiathlonError::InvalidStartTime(raw.start.clone()))?;

        // The delta is written as a clock value; only whole seconds count
        let start_delta = parse_clock_lenient(&raw.start_delta)
            .map(clock_as_duration)
            .map_err(|_| BiathlonError::InvalidStartDelta(raw.start_delta.clone()))?;

        Ok(Self {
            laps: raw.laps,
            lap_len: raw.lap_len,
            penalty_len: raw.penalty_len,
            firing_lines: raw.firing_lines,
            start,
            start_delta,
        })
    }

    /// Parse a JSON configuration document
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: RaceConfigFile = serde_json::from_str(content)
            .map_err(|e| BiathlonError::ConfigParseError(e.to_string()))?;
        Self::from_file_contents(raw)
    }

    /// Parse a TOML configuration document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RaceConfigFile = toml::from_str(content)
            .map_err(|e| BiathlonError::ConfigParseError(e.to_string()))?;
        Self::from_file_contents(raw)
    }
}

/// Load a race configuration, picking the format from the file extension
///
/// `.toml` files are read as TOML, everything else as JSON.
pub fn load_config(path: &Path) -> Result<RaceConfig> {
    log::info!("Loading race config: {:?}", path);

    let content = fs::read_to_string(path).map_err(|source| BiathlonError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());

    let config = match extension.as_deref() {
        Some("toml") => {
            log::debug!("Detected TOML config format");
            RaceConfig::from_toml_str(&content)?
        }
        _ => RaceConfig::from_json_str(&content)?,
    };

    log::debug!("Race config loaded: {:?}", config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_JSON: &str = r#"{
        "laps": 5,
        "lapLen": 120,
        "penaltyLen": 30,
        "firingLines": 3,
        "start": "10:00:00",
        "startDelta": "00:00:30"
    }"#;

    #[test]
    fn test_config_from_json() {
        let config = RaceConfig::from_json_str(SAMPLE_JSON).unwrap();

        assert_eq!(config.laps, 5);
        assert_eq!(config.lap_len, 120);
        assert_eq!(config.penalty_len, 30);
        assert_eq!(config.firing_lines, 3);
        assert_eq!(config.start, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        assert_eq!(config.start_delta, Duration::seconds(30));
    }

    #[test]
    fn test_config_from_toml() {
        let toml_content = r#"
            laps = 2
            lapLen = 3651
            penaltyLen = 50
            firingLines = 1
            start = "09:30:00.000"
            startDelta = "00:01:30"
        "#;

        let config = RaceConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.laps, 2);
        assert_eq!(config.lap_len, 3651);
        assert_eq!(config.start, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(config.start_delta, Duration::seconds(90));
    }

    #[test]
    fn test_start_delta_ignores_millis() {
        let json = r#"{"laps": 1, "start": "10:00:00", "startDelta": "00:00:30.750"}"#;
        let config = RaceConfig::from_json_str(json).unwrap();
        assert_eq!(config.start_delta, Duration::seconds(30));
    }

    #[test]
    fn test_invalid_json_types() {
        let json = r#"{"laps": "five", "lapLen": "one hundred twenty"}"#;
        let err = RaceConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, BiathlonError::ConfigParseError(_)));
    }

    #[test]
    fn test_invalid_start_fields() {
        let json = r#"{"laps": 1, "start": "ten o'clock", "startDelta": "00:00:30"}"#;
        assert!(matches!(
            RaceConfig::from_json_str(json),
            Err(BiathlonError::InvalidStartTime(_))
        ));

        let json = r#"{"laps": 1, "start": "10:00:00", "startDelta": "soon"}"#;
        assert!(matches!(
            RaceConfig::from_json_str(json),
            Err(BiathlonError::InvalidStartDelta(_))
        ));

        // Missing start strings are rejected, not defaulted
        assert!(RaceConfig::from_json_str("{}").is_err());
    }

    #[test]
    fn test_load_config_by_extension() {
        let mut json_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        json_file.write_all(SAMPLE_JSON.as_bytes()).unwrap();
        let config = load_config(json_file.path()).unwrap();
        assert_eq!(config.laps, 5);

        let mut toml_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(toml_file, "laps = 3\nstart = \"10:00:00\"\nstartDelta = \"00:00:10\"").unwrap();
        let config = load_config(toml_file.path()).unwrap();
        assert_eq!(config.laps, 3);
        assert_eq!(config.start_delta, Duration::seconds(10));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("nonexistent_config.json")).unwrap_err();
        assert!(matches!(err, BiathlonError::Io { .. }));
    }

    #[test]
    fn test_config_builder() {
        let config = RaceConfig::new()
            .with_laps(2)
            .with_lap_len(3651)
            .with_penalty_len(50)
            .with_firing_lines(1)
            .with_start(NaiveTime::from_hms_opt(9, 30, 0).unwrap())
            .with_start_delta(Duration::seconds(30));

        assert_eq!(config.laps, 2);
        assert_eq!(config.penalty_len, 50);
        assert_eq!(config.start_delta, Duration::seconds(30));
    }
}
