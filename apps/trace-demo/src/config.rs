//! Demo settings: `trace.toml` overlaid with environment variables.
//!
//! Missing file, missing keys, or malformed values all fall back to the
//! built-in reference task, so the demo always starts.

use std::fs;

use serde::Deserialize;
use tracepose_core::{SessionConfig, TargetSpec, Point, TARGET_BASE_COLORS};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub required_cycles: u32,
    pub interpolation_step: f32,
    /// Target zones in visitation order; empty means the built-in layout.
    pub targets: Vec<TargetSetting>,
    /// Where to write recorded samples, if anywhere.
    pub record_path: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TargetSetting {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            required_cycles: 3,
            interpolation_step: 5.0,
            targets: Vec::new(),
            record_path: None,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("trace.toml") {
        match toml::from_str::<Settings>(&raw) {
            Ok(file_cfg) => settings = file_cfg,
            Err(err) => log::warn!("trace.toml ignored: {err}"),
        }
    }

    if let Ok(v) = std::env::var("TRACE_REQUIRED_CYCLES") {
        if let Ok(parsed) = v.parse() {
            settings.required_cycles = parsed;
        }
    }
    if let Ok(v) = std::env::var("TRACE_INTERPOLATION_STEP") {
        if let Ok(parsed) = v.parse() {
            settings.interpolation_step = parsed;
        }
    }
    if let Ok(v) = std::env::var("TRACE_RECORD_PATH") {
        settings.record_path = Some(v);
    }

    settings
}

impl Settings {
    pub fn session_config(&self) -> SessionConfig {
        let mut config = if self.targets.is_empty() {
            SessionConfig::default()
        } else {
            let targets = self
                .targets
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    let color = TARGET_BASE_COLORS[i % TARGET_BASE_COLORS.len()];
                    TargetSpec::new(Point::new(t.x, t.y), t.radius, color)
                })
                .collect();
            SessionConfig::new(targets, self.required_cycles)
        };
        config.required_cycles = self.required_cycles;
        config.interpolation_step = self.interpolation_step;
        config
    }
}
