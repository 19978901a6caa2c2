//! Runtime configuration.
//!
//! Settings are read from `config.json` in the platform config directory
//! (see [`Config::path`]). A missing file means defaults; any field left out
//! of the file keeps its default.

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub window: WindowConfig,
    pub render: RenderConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub close_on_escape: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Opengl Practice".to_string(),
            width: 800,
            height: 600,
            vsync: true,
            close_on_escape: true,
        }
    }
}

/// Colours are RGBA with components in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub clear_color: [f32; 4],
    pub quad_color: [f32; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.2, 0.3, 0.3, 1.0],
            quad_color: [1.0, 0.5, 0.2, 1.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
    /// Optional file that receives a copy of every log line.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Location of the config file, if the platform has a config directory.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("glquad").join("config.json"))
    }

    /// Loads the config file, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads the config at `path`, or defaults if there is no file there.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        Self::from_json(&contents).map_err(|e| format!("Invalid config {}: {e}", path.display()))
    }

    /// Parses and validates a config from JSON text.
    pub fn from_json(s: &str) -> Result<Self, String> {
        let config: Config = serde_json::from_str(s).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(format!(
                "Window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            ));
        }

        for (name, color) in [
            ("clear_color", &self.render.clear_color),
            ("quad_color", &self.render.quad_color),
        ] {
            if color.iter().any(|c| !(0.0..=1.0).contains(c)) {
                return Err(format!("{name} components must be within 0.0..=1.0, got {color:?}"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.window.title, "Opengl Practice");
        assert_eq!((config.window.width, config.window.height), (800, 600));
        assert_eq!(config.render.quad_color, [1.0, 0.5, 0.2, 1.0]);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config = Config::from_json(
            r#"{ "window": { "width": 1280 }, "log": { "file": "/tmp/glquad.log" } }"#,
        )
        .unwrap();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 600);
        assert!(config.window.vsync);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.log.file, Some(PathBuf::from("/tmp/glquad.log")));
        assert_eq!(config.render, RenderConfig::default());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        assert!(Config::from_json(r#"{ "windw": {} }"#).is_err());
        assert!(Config::from_json(r#"{ "window": { "fullscreen": true } }"#).is_err());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Config::from_json("{ \"window\": ").is_err());
        assert!(Config::from_json(r#"{ "window": { "width": -5 } }"#).is_err());
    }

    #[test]
    fn test_zero_size_window_is_invalid() {
        let err = Config::from_json(r#"{ "window": { "height": 0 } }"#).unwrap_err();
        assert!(err.contains("800x0"), "{err}");
    }

    #[test]
    fn test_color_out_of_range_is_invalid() {
        let err =
            Config::from_json(r#"{ "render": { "quad_color": [1.0, 2.0, 0.0, 1.0] } }"#).unwrap_err();
        assert!(err.starts_with("quad_color"), "{err}");
        assert!(Config::from_json(r#"{ "render": { "clear_color": [0.0, 0.0, 0.0] } }"#).is_err());
    }

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("glquad-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_load_from_missing_file_gives_defaults() {
        let path = scratch_path("missing.json");
        let _ = std::fs::remove_file(&path);
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = scratch_path("valid.json");
        std::fs::write(&path, r#"{ "window": { "title": "quad" } }"#).unwrap();
        let config = Config::load_from(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.unwrap().window.title, "quad");
    }

    #[test]
    fn test_load_from_malformed_file_names_the_path() {
        let path = scratch_path("malformed.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(err.starts_with("Invalid config"), "{err}");
        assert!(err.contains(&path.display().to_string()), "{err}");
    }
}
