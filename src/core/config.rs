// Copyright @yucwang 2026

use std::fmt;

/// Proposal distribution used when drawing the hero wavelength for a
/// path. Uniform is the default; the importance proposal concentrates
/// samples near the luminous-efficiency peak.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WavelengthStrategy {
    Uniform,
    Importance,
}

impl WavelengthStrategy {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "uniform" => Some(WavelengthStrategy::Uniform),
            "importance" => Some(WavelengthStrategy::Importance),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSettings(String),
    InvalidMaterial(String),
    InvalidScene(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSettings(msg) => write!(f, "invalid settings: {}", msg),
            ConfigError::InvalidMaterial(msg) => write!(f, "invalid material: {}", msg),
            ConfigError::InvalidScene(msg) => write!(f, "invalid scene: {}", msg),
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct RenderSettings {
    pub samples_per_pixel: u32,
    pub max_bounces: u32,
    pub rr_start_bounce: u32,
    pub wavelength_strategy: WavelengthStrategy,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            samples_per_pixel: 64,
            max_bounces: 32,
            rr_start_bounce: 4,
            wavelength_strategy: WavelengthStrategy::Uniform,
        }
    }
}

impl RenderSettings {
    /// Must pass before any tracing starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::InvalidSettings(
                "samples_per_pixel must be > 0".to_string(),
            ));
        }
        if self.max_bounces == 0 {
            return Err(ConfigError::InvalidSettings(
                "max_bounces must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn without_roulette(mut self) -> Self {
        self.rr_start_bounce = self.max_bounces;
        self
    }
}
