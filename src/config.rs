use crate::constants::{
    BOUNDS_MARGIN, CAMERA_FOV_DEG, IDLE_COUNTDOWN_SECS, IDLE_TIME_LIMIT_MS, MODEL_OFFSET,
    MODEL_PATH, SHOWCASE_FOV_DEG, SHOWCASE_IDLE_TIME_LIMIT_MS, TONE_MAPPING_EXPOSURE,
};
use crate::passes::VignetteParams;
use glam::Vec3;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Startup configuration. The two presets cover the two page variants, which
/// differ only in these numbers.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub model_path: String,
    pub model_offset: Vec3,
    pub fov_deg: f32,
    pub idle_time_limit: Duration,
    pub countdown_secs: u32,
    pub vignette: Option<VignetteParams>,
    pub exposure: f32,
    pub bounds_margin: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::studio()
    }
}

impl ViewerConfig {
    pub fn studio() -> Self {
        Self {
            model_path: MODEL_PATH.to_string(),
            model_offset: Vec3::from(MODEL_OFFSET),
            fov_deg: CAMERA_FOV_DEG,
            idle_time_limit: Duration::from_millis(IDLE_TIME_LIMIT_MS),
            countdown_secs: IDLE_COUNTDOWN_SECS,
            vignette: None,
            exposure: TONE_MAPPING_EXPOSURE,
            bounds_margin: BOUNDS_MARGIN,
        }
    }

    pub fn showcase() -> Self {
        Self {
            fov_deg: SHOWCASE_FOV_DEG,
            idle_time_limit: Duration::from_millis(SHOWCASE_IDLE_TIME_LIMIT_MS),
            vignette: Some(VignetteParams::default()),
            ..Self::studio()
        }
    }

    pub fn preset(name: &str) -> Result<Self, ConfigError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "studio" => Ok(Self::studio()),
            "showcase" => Ok(Self::showcase()),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }

    /// Build from `data-*` style attributes. `get` returns the raw attribute
    /// for keys such as `preset`, `model`, `fov`, `idle-ms`, `vignette`.
    pub fn from_attributes(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = match get("preset") {
            Some(p) => Self::preset(&p)?,
            None => Self::default(),
        };
        if let Some(path) = get("model").filter(|p| !p.trim().is_empty()) {
            cfg.model_path = path.trim().to_string();
        }
        if let Some(raw) = get("fov") {
            cfg.fov_deg = crate::camera::validate_fov(parse_num(&raw, "fov")?).map_err(|_| {
                ConfigError::InvalidValue {
                    key: "fov",
                    value: raw.clone(),
                }
            })?;
        }
        if let Some(raw) = get("idle-ms") {
            let ms = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "idle-ms",
                    value: raw.clone(),
                })?;
            cfg.idle_time_limit = Duration::from_millis(ms);
        }
        if let Some(raw) = get("vignette") {
            cfg.vignette = match raw.trim() {
                "on" | "true" | "1" => Some(cfg.vignette.unwrap_or_default()),
                "off" | "false" | "0" => None,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "vignette",
                        value: raw,
                    })
                }
            };
        }
        Ok(cfg)
    }
}

fn parse_num(raw: &str, key: &'static str) -> Result<f32, ConfigError> {
    raw.trim()
        .parse::<f32>()
        .map_err(|_| ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        })
}
