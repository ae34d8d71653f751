//! Terminal-based spinning torus
//!
//! The rasterizer lives in [`viz::donut`]; [`Renderer`] owns the rotation
//! phase and runs either the endless animation or the fixed-length benchmark.

pub mod benchmark;
pub mod cli;
pub mod config;
pub mod renderer;
pub mod settings;
pub mod terminal;
pub mod viz;

pub use benchmark::BenchmarkReport;
pub use config::{ConfigError, DonutConfig, RenderMode, DEFAULT_SHADING};
pub use renderer::{Phase, Renderer};
pub use settings::{Settings, SettingsError};
pub use terminal::{FrameSink, Terminal};
