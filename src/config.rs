use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Upper bound on grid cells, far beyond any real terminal
pub const MAX_CELLS: usize = 1 << 24;

/// Default shading ramp, darkest glyph first
pub const DEFAULT_SHADING: &str = ".,-~:;=!*#$@";

/// How the rasterizer walks the torus surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Evaluate sin/cos for every sample
    #[default]
    Baseline,
    /// Reuse sin/cos tables built once per renderer
    Optimized,
}

impl FromStr for RenderMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "baseline" => Ok(RenderMode::Baseline),
            "optimized" | "optimised" => Ok(RenderMode::Optimized),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Baseline => write!(f, "baseline"),
            RenderMode::Optimized => write!(f, "optimized"),
        }
    }
}

/// Configuration for the donut renderer
#[derive(Clone, Debug, PartialEq)]
pub struct DonutConfig {
    pub width: usize,
    pub height: usize,
    /// Tube radius
    pub r1: f64,
    /// Distance from the torus centre to the tube centre
    pub r2: f64,
    /// Projection scale
    pub k1: f64,
    /// Camera distance along the depth axis
    pub k2: f64,
    pub a_step: f64,
    pub b_step: f64,
    pub theta_step: f64,
    pub phi_step: f64,
    /// Palette from least to most luminant
    pub shading: Vec<char>,
    pub benchmark: bool,
    pub frames: usize,
    pub mode: RenderMode,
}

impl Default for DonutConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 22,
            r1: 1.0,
            r2: 2.0,
            k1: 30.0,
            k2: 5.0,
            a_step: 0.04,
            b_step: 0.02,
            theta_step: 0.07,
            phi_step: 0.02,
            shading: DEFAULT_SHADING.chars().collect(),
            benchmark: false,
            frames: 500,
            mode: RenderMode::Baseline,
        }
    }
}

impl DonutConfig {
    /// Reject configurations that would hang the sampling loops or
    /// index an empty palette. The renderer itself never validates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        // Frame text holds every cell plus one newline per row
        let text_len = self
            .width
            .checked_mul(self.height)
            .and_then(|cells| cells.checked_add(self.height));
        if !text_len.is_some_and(|len| len <= MAX_CELLS) {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
                max: MAX_CELLS,
            });
        }

        let numbers = [
            ("r1", self.r1),
            ("r2", self.r2),
            ("k1", self.k1),
            ("k2", self.k2),
            ("a-step", self.a_step),
            ("b-step", self.b_step),
            ("theta-step", self.theta_step),
            ("phi-step", self.phi_step),
        ];
        if let Some((name, _)) = numbers.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NotFinite(name));
        }

        for (name, step) in [("theta-step", self.theta_step), ("phi-step", self.phi_step)] {
            if step <= 0.0 {
                return Err(ConfigError::NonPositiveStep { name, value: step });
            }
        }

        if self.shading.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.benchmark && self.frames == 0 {
            return Err(ConfigError::NoFrames);
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("grid {width}x{height} is too large (at most {max} characters per frame)")]
    GridTooLarge { width: usize, height: usize, max: usize },

    #[error("{name} must be greater than zero, got {value}")]
    NonPositiveStep { name: &'static str, value: f64 },

    #[error("{0} must be a finite number")]
    NotFinite(&'static str),

    #[error("shading palette must contain at least one character")]
    EmptyPalette,

    #[error("benchmark mode needs at least one frame")]
    NoFrames,

    #[error("unknown render mode: {0} (expected baseline or optimized)")]
    UnknownMode(String),
}
