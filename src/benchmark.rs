//! Benchmark timing summary

use std::fmt;
use std::time::Duration;

/// Identity line printed at the top of every report
pub const REPORT_LABEL: &str = "Language: Rust";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BenchmarkReport {
    frames: usize,
    total: Duration,
}

impl BenchmarkReport {
    pub fn new(frames: usize, total: Duration) -> Self {
        Self { frames, total }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn total_secs(&self) -> f64 {
        self.total.as_secs_f64()
    }

    /// Mean time per frame in milliseconds; 0 when no frames ran
    pub fn avg_frame_ms(&self) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        self.total_secs() / self.frames as f64 * 1000.0
    }

    /// 0 when the clock did not advance
    pub fn fps(&self) -> f64 {
        let total = self.total_secs();
        if total > 0.0 {
            self.frames as f64 / total
        } else {
            0.0
        }
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{REPORT_LABEL}")?;
        writeln!(f, "Frames: {}", self.frames)?;
        writeln!(f, "Total Time: {:.4}s", self.total_secs())?;
        writeln!(f, "Avg Frame Time: {:.2}ms", self.avg_frame_ms())?;
        write!(f, "FPS: {:.2}", self.fps())
    }
}
