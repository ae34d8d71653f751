//! Frame loop: owns the rotation phase and drives the rasterizer

use crate::benchmark::BenchmarkReport;
use crate::config::{DonutConfig, RenderMode};
use crate::terminal::FrameSink;
use crate::viz::{donut, FrameBuffer, SampleTables};
use std::io;
use std::time::Instant;

/// Accumulated rotation angles in radians. Never wrapped.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Phase {
    pub a: f64,
    pub b: f64,
}

impl Phase {
    pub fn advance(&mut self, a_step: f64, b_step: f64) {
        self.a += a_step;
        self.b += b_step;
    }
}

pub struct Renderer {
    cfg: DonutConfig,
    phase: Phase,
    tables: Option<SampleTables>,
}

impl Renderer {
    pub fn new(cfg: DonutConfig) -> Self {
        let tables = match cfg.mode {
            RenderMode::Optimized => {
                let tables = SampleTables::new(cfg.theta_step, cfg.phi_step);
                tracing::debug!(
                    theta = tables.theta_samples(),
                    phi = tables.phi_samples(),
                    "precomputed sample tables"
                );
                Some(tables)
            }
            RenderMode::Baseline => None,
        };
        Self {
            cfg,
            phase: Phase::default(),
            tables,
        }
    }

    pub fn config(&self) -> &DonutConfig {
        &self.cfg
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Rasterize the current phase without advancing it
    pub fn render_buffer(&self) -> FrameBuffer {
        donut::render(&self.cfg, self.phase.a, self.phase.b, self.tables.as_ref())
    }

    pub fn render_frame(&self) -> String {
        self.render_buffer().to_text()
    }

    pub fn step_angles(&mut self) {
        self.phase.advance(self.cfg.a_step, self.cfg.b_step);
    }

    /// Continuous animation. Clears the screen once, then presents frames
    /// until `keep_running` (given the number of frames shown so far)
    /// returns false. Pass `|_| true` to run until the process is killed.
    pub fn animate<S, F>(&mut self, sink: &mut S, mut keep_running: F) -> io::Result<u64>
    where
        S: FrameSink,
        F: FnMut(u64) -> bool,
    {
        sink.begin()?;
        let mut shown = 0u64;
        while keep_running(shown) {
            let frame = self.render_frame();
            sink.present(&frame)?;
            self.step_angles();
            shown += 1;
        }
        Ok(shown)
    }

    /// Render `frames` frames back to back and time them. Nothing is drawn.
    pub fn run_benchmark(&mut self) -> BenchmarkReport {
        let frames = self.cfg.frames;
        tracing::info!(frames, mode = %self.cfg.mode, "benchmark started");

        let start = Instant::now();
        for _ in 0..frames {
            let _ = self.render_frame();
            self.step_angles();
        }
        let report = BenchmarkReport::new(frames, start.elapsed());

        tracing::info!(
            total_secs = report.total_secs(),
            fps = report.fps(),
            "benchmark finished"
        );
        report
    }
}
