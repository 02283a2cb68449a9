//! Settings file and command-line overrides
//!
//! Settings come from a JSON file (every field optional) and are then
//! overridden by flags. The file is `trifill.json` in the working directory
//! unless `--config PATH` names another one.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::game::FrameConfig;

pub const DEFAULT_CONFIG_PATH: &str = "trifill.json";
pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;
/// Largest accepted mosaic cell; the scaled fixture is already far offscreen
pub const MAX_CELL_SIZE: f32 = 1024.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("invalid value '{value}' for {flag}")]
    InvalidValue { flag: String, value: String },
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    /// Pixels per frame for held movement keys
    pub speed: f32,
    /// Mosaic block pitch and fixture scale
    pub cell_size: f32,
    pub title: String,
    /// MQTT broker for remote key input; disabled when unset
    pub mqtt_host: Option<String>,
    pub mqtt_topic: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            vsync: true,
            speed: 4.0,
            cell_size: 48.0,
            title: "trifill".to_string(),
            mqtt_host: None,
            mqtt_topic: "trifill".to_string(),
        }
    }
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Settings),
    Help,
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject settings the renderer can't run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "resolution must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.cell_size >= 1.0 && self.cell_size <= MAX_CELL_SIZE) {
            return Err(ConfigError::Invalid(format!(
                "cell_size must be between 1 and {}, got {}",
                MAX_CELL_SIZE, self.cell_size
            )));
        }
        if !self.speed.is_finite() {
            return Err(ConfigError::Invalid(format!("speed must be finite, got {}", self.speed)));
        }
        Ok(())
    }

    pub fn frame_config(&self) -> FrameConfig {
        FrameConfig {
            speed: self.speed,
            cell_size: self.cell_size,
        }
    }

    /// Apply command-line flags on top of these settings
    ///
    /// `args` excludes the program name. `--config` is skipped here; it is
    /// resolved by `from_args` before the file is loaded.
    pub fn apply_args(&mut self, args: &[String]) -> Result<Option<Command>, ConfigError> {
        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--no-vsync" => self.vsync = false,
                "--width" | "-w" => {
                    self.width = parse_value(flag, value_at(args, i)?)?;
                    i += 1;
                },
                "--height" | "-h" => {
                    self.height = parse_value(flag, value_at(args, i)?)?;
                    i += 1;
                },
                "--resolution" | "-r" => {
                    let value = value_at(args, i)?;
                    let (w, h) = parse_resolution(value).ok_or_else(|| ConfigError::InvalidValue {
                        flag: flag.to_string(),
                        value: value.to_string(),
                    })?;
                    self.width = w;
                    self.height = h;
                    i += 1;
                },
                "--mqtt" => {
                    self.mqtt_host = Some(value_at(args, i)?.to_string());
                    i += 1;
                },
                "--config" => {
                    value_at(args, i)?;
                    i += 1;
                },
                "--help" => return Ok(Some(Command::Help)),
                other => log::warn!("ignoring unknown argument '{}'", other),
            }
            i += 1;
        }
        Ok(None)
    }
}

fn value_at(args: &[String], i: usize) -> Result<&str, ConfigError> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| ConfigError::MissingValue(args[i].clone()))
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    })
}

/// Parse `WxH` (e.g. 1920x1080)
fn parse_resolution(value: &str) -> Option<(u32, u32)> {
    let (w, h) = value.split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?))
}

/// Resolve the settings file and flags into a command
///
/// An explicit `--config` file must exist; the default one is optional.
pub fn from_args(args: &[String]) -> Result<Command, ConfigError> {
    let explicit = args
        .iter()
        .position(|a| a == "--config")
        .map(|i| value_at(args, i).map(PathBuf::from))
        .transpose()?;

    let mut settings = match explicit {
        Some(path) => {
            log::info!("loading settings from {}", path.display());
            Settings::load(&path)?
        },
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            log::info!("loading settings from {}", DEFAULT_CONFIG_PATH);
            Settings::load(DEFAULT_CONFIG_PATH)?
        },
        None => {
            log::debug!("no {} found, using defaults", DEFAULT_CONFIG_PATH);
            Settings::default()
        },
    };

    if let Some(command) = settings.apply_args(args)? {
        return Ok(command);
    }
    settings.validate()?;
    Ok(Command::Run(settings))
}

pub fn usage() -> String {
    format!(
        "Usage: trifill [OPTIONS]

Options:
  --config PATH             Settings file (default: {})
  --width W, -w W           Set window width (default: {})
  --height H, -h H          Set window height (default: {})
  --resolution WxH, -r WxH  Set resolution (e.g., 1920x1080)
  --no-vsync                Disable VSync for uncapped framerate
  --mqtt HOST               Accept remote key events from an MQTT broker
  --help                    Show this help message",
        DEFAULT_CONFIG_PATH, DEFAULT_WIDTH, DEFAULT_HEIGHT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!((s.width, s.height), (640, 480));
        assert!(s.vsync);
        assert_eq!(s.speed, 4.0);
        assert_eq!(s.cell_size, 48.0);
        assert_eq!(s.mqtt_host, None);
        assert_eq!(s.frame_config(), FrameConfig::default());
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "width": 1024, "mqtt_host": "broker.local" }"#).unwrap();
        assert_eq!(s.width, 1024);
        assert_eq!(s.height, 480);
        assert_eq!(s.mqtt_host.as_deref(), Some("broker.local"));
        assert_eq!(s.title, "trifill");
    }

    #[test]
    fn test_flags_override() {
        let mut s = Settings::default();
        let cmd = s
            .apply_args(&args(&["-r", "1920x1080", "--no-vsync", "--mqtt", "10.0.0.2"]))
            .unwrap();
        assert_eq!(cmd, None);
        assert_eq!((s.width, s.height), (1920, 1080));
        assert!(!s.vsync);
        assert_eq!(s.mqtt_host.as_deref(), Some("10.0.0.2"));

        s.apply_args(&args(&["--width", "800", "-h", "600"])).unwrap();
        assert_eq!((s.width, s.height), (800, 600));
    }

    #[test]
    fn test_bad_flags() {
        let mut s = Settings::default();
        assert!(matches!(
            s.apply_args(&args(&["--width"])),
            Err(ConfigError::MissingValue(flag)) if flag == "--width"
        ));
        assert!(matches!(
            s.apply_args(&args(&["-r", "1920by1080"])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            s.apply_args(&args(&["-w", "wide"])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_help_short_circuits() {
        let mut s = Settings::default();
        let cmd = s.apply_args(&args(&["--help", "-w", "nope"])).unwrap();
        assert_eq!(cmd, Some(Command::Help));
        assert_eq!(from_args(&args(&["--help"])).unwrap(), Command::Help);
    }

    #[test]
    fn test_validate_rejects_zero_size() {
        let s = Settings {
            width: 0,
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(ConfigError::Invalid(_))));
        let s = Settings {
            cell_size: 0.5,
            ..Settings::default()
        };
        assert!(s.validate().is_err());
        for cell_size in [3.0e7, f32::NAN, f32::INFINITY] {
            let s = Settings {
                cell_size,
                ..Settings::default()
            };
            assert!(matches!(s.validate(), Err(ConfigError::Invalid(_))), "{}", cell_size);
        }
        let s = Settings {
            cell_size: MAX_CELL_SIZE,
            ..Settings::default()
        };
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("trifill-settings-{}.json", std::process::id()));
        let s = Settings {
            speed: 2.5,
            mqtt_topic: "keys".to_string(),
            ..Settings::default()
        };
        s.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, s);

        let cmd = from_args(&args(&["--config", path.to_str().unwrap()]));
        assert!(matches!(cmd, Err(ConfigError::Io { .. })));
    }
}
