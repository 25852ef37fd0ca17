use std::{ fs, path::Path };
use serde::{ Deserialize, Serialize };
use crate::{
    error::{ OrbitalError, OrbitalResult },
    sampling::{ Strategy, MAX_SAMPLES },
    units::deg,
};

/// Probability below which normalized samples are discarded.
pub const DEFAULT_THRESHOLD: f64 = 1.0e-11;

/// Settings for one sample → normalize → prune pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub strategy: Strategy,
    pub threshold: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl PipelineConfig {
    /// Load from a JSON file; missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> OrbitalResult<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> OrbitalResult<()> {
        self.strategy.validate()?;
        OrbitalError::check_threshold(self.threshold)
    }
}

/// Settings for a radial probability curve along one direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Exclusive upper bound on the radius (pm).
    pub max_radius: f64,
    /// Radial step (pm).
    pub step: f64,
    /// Inclination (radians).
    pub theta: f64,
    /// Azimuth (radians).
    pub phi: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            max_radius: 1300.0,
            step: 1.0,
            theta: deg(15.0),
            phi: deg(30.0),
        }
    }
}

impl ProfileConfig {
    pub fn validate(&self) -> OrbitalResult<()> {
        OrbitalError::check_step(self.step)?;
        OrbitalError::check_bound(self.max_radius)?;
        OrbitalError::check_sample_count(Some(self.point_count()), MAX_SAMPLES)
    }

    /// Number of radii in [0, max_radius).
    pub fn point_count(&self) -> usize {
        (self.max_radius / self.step - 1e-9).ceil().max(0.0) as usize
    }
}
