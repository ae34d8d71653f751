//! Frame rasterization
//!
//! `donut` walks the torus surface and plots into a `FrameBuffer`, which keeps
//! the character grid and its depth buffer side by side.

pub mod donut;

pub use donut::SampleTables;

/// Character grid plus a parallel buffer of `1/z` values.
///
/// Depth starts at 0.0, so any visible sample is nearer than an empty cell.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    chars: Vec<char>,
    depth: Vec<f64>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            chars: vec![' '; width * height],
            depth: vec![0.0; width * height],
        }
    }

    /// Plot `ch` at screen position (`xp`, `yp`) if it lies on the grid and
    /// is strictly nearer than what the cell already holds. Returns whether
    /// the cell was written.
    pub fn plot(&mut self, xp: isize, yp: isize, ooz: f64, ch: char) -> bool {
        let Some(idx) = self.index(xp, yp) else {
            return false;
        };
        if ooz > self.depth[idx] {
            self.depth[idx] = ooz;
            self.chars[idx] = ch;
            true
        } else {
            false
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.chars[x + self.width * y])
        } else {
            None
        }
    }

    pub fn depth_at(&self, x: usize, y: usize) -> Option<f64> {
        if x < self.width && y < self.height {
            Some(self.depth[x + self.width * y])
        } else {
            None
        }
    }

    /// Row-major text, one `\n` after every row
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.width * self.height + self.height);
        for row in self.chars.chunks(self.width.max(1)).take(self.height) {
            out.extend(row);
            out.push('\n');
        }
        out
    }

    fn index(&self, xp: isize, yp: isize) -> Option<usize> {
        if xp >= 0 && yp >= 0 && (xp as usize) < self.width && (yp as usize) < self.height {
            Some(xp as usize + self.width * yp as usize)
        } else {
            None
        }
    }
}
