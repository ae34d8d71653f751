//! Rotating 3D donut (torus) rasterizer

use super::FrameBuffer;
use crate::config::DonutConfig;
use std::f64::consts::TAU;

/// Luminance is scaled by this before indexing the palette
const SHADE_SCALE: f64 = 8.0;
/// Vertical projection scale relative to horizontal; terminal cells are
/// roughly twice as tall as they are wide
const ASPECT_CORRECTION: f64 = 0.5;

/// Sines and cosines of the two phase angles, computed once per frame
#[derive(Clone, Copy, Debug)]
struct PhaseTrig {
    sin_a: f64,
    cos_a: f64,
    sin_b: f64,
    cos_b: f64,
}

impl PhaseTrig {
    fn new(a: f64, b: f64) -> Self {
        Self {
            sin_a: a.sin(),
            cos_a: a.cos(),
            sin_b: b.sin(),
            cos_b: b.cos(),
        }
    }
}

/// Walks `[0, 2π)` by repeatedly adding `step`, yielding `(sin, cos)`.
///
/// The angle accumulates rather than being computed as `i * step`, so the
/// sample positions match between baseline and table-driven rendering.
#[derive(Clone, Debug)]
pub struct AngleSweep {
    angle: f64,
    step: f64,
}

impl AngleSweep {
    pub fn new(step: f64) -> Self {
        Self { angle: 0.0, step }
    }
}

impl Iterator for AngleSweep {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.angle < TAU {
            let trig = (self.angle.sin(), self.angle.cos());
            self.angle += self.step;
            Some(trig)
        } else {
            None
        }
    }
}

/// Precomputed `(sin, cos)` for every theta and phi sample
#[derive(Clone, Debug)]
pub struct SampleTables {
    theta: Vec<(f64, f64)>,
    phi: Vec<(f64, f64)>,
}

impl SampleTables {
    pub fn new(theta_step: f64, phi_step: f64) -> Self {
        Self {
            theta: AngleSweep::new(theta_step).collect(),
            phi: AngleSweep::new(phi_step).collect(),
        }
    }

    pub fn theta_samples(&self) -> usize {
        self.theta.len()
    }

    pub fn phi_samples(&self) -> usize {
        self.phi.len()
    }
}

/// Surface brightness for the `(sin, cos)` of theta and phi under the
/// current rotation. Positive values face the light; anything else is not
/// drawn.
#[inline]
fn surface_luminance(
    (sin_theta, cos_theta): (f64, f64),
    (sin_phi, cos_phi): (f64, f64),
    t: &PhaseTrig,
) -> f64 {
    cos_phi * cos_theta * t.sin_b - t.cos_a * cos_theta * sin_phi - t.sin_a * sin_theta
        + t.cos_b * (t.cos_a * sin_theta - cos_theta * t.sin_a * sin_phi)
}

/// Palette position for a luminance value, clamped to `[0, palette_len - 1]`
pub fn shade_index(luminance: f64, palette_len: usize) -> usize {
    let max = palette_len.saturating_sub(1) as isize;
    ((luminance * SHADE_SCALE) as isize).min(max).max(0) as usize
}

/// Rasterize one frame at phase (`a`, `b`).
///
/// With `tables` the theta/phi trig comes from the precomputed samples,
/// otherwise it is evaluated on the fly. Both produce the same frame.
pub fn render(cfg: &DonutConfig, a: f64, b: f64, tables: Option<&SampleTables>) -> FrameBuffer {
    match tables {
        Some(t) => rasterize(cfg, a, b, t.theta.iter().copied(), || t.phi.iter().copied()),
        None => rasterize(
            cfg,
            a,
            b,
            AngleSweep::new(cfg.theta_step),
            || AngleSweep::new(cfg.phi_step),
        ),
    }
}

fn rasterize<T, P, F>(cfg: &DonutConfig, a: f64, b: f64, thetas: T, phis: F) -> FrameBuffer
where
    T: Iterator<Item = (f64, f64)>,
    P: Iterator<Item = (f64, f64)>,
    F: Fn() -> P,
{
    let mut fb = FrameBuffer::new(cfg.width, cfg.height);
    let t = PhaseTrig::new(a, b);

    let half_w = cfg.width as f64 / 2.0;
    let half_h = cfg.height as f64 / 2.0;
    let k1_y = cfg.k1 * ASPECT_CORRECTION;

    for theta in thetas {
        let (sin_theta, cos_theta) = theta;
        let circle_x = cfg.r2 + cfg.r1 * cos_theta;
        let circle_y = cfg.r1 * sin_theta;

        for phi in phis() {
            let (sin_phi, cos_phi) = phi;

            let x = circle_x * cos_phi;
            let y = circle_x * sin_phi;
            let z = circle_y;

            // Rotate about the first axis by a, then the second by b
            let y1 = y * t.cos_a - z * t.sin_a;
            let z1 = y * t.sin_a + z * t.cos_a;
            let x2 = x * t.cos_b - y1 * t.sin_b;
            let y2 = x * t.sin_b + y1 * t.cos_b;
            let z2 = z1;

            let ooz = 1.0 / (z2 + cfg.k2);
            // Truncation toward zero, not rounding
            let xp = (half_w + cfg.k1 * ooz * x2) as isize;
            let yp = (half_h - k1_y * ooz * y2) as isize;

            let l = surface_luminance(theta, phi, &t);
            if l > 0.0 {
                if let Some(&ch) = cfg.shading.get(shade_index(l, cfg.shading.len())) {
                    fb.plot(xp, yp, ooz, ch);
                }
            }
        }
    }

    fb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> DonutConfig {
        DonutConfig {
            width: 10,
            height: 5,
            ..DonutConfig::default()
        }
    }

    #[test]
    fn sweep_stops_before_tau() {
        let samples: Vec<_> = AngleSweep::new(1.0).collect();
        // 0, 1, 2, 3, 4, 5, 6 are all below 2π
        assert_eq!(samples.len(), 7);
        assert_eq!(samples[0], (0.0, 1.0));
    }

    #[test]
    fn tables_match_sweep_lengths() {
        let tables = SampleTables::new(0.07, 0.02);
        assert_eq!(tables.theta_samples(), AngleSweep::new(0.07).count());
        assert_eq!(tables.phi_samples(), AngleSweep::new(0.02).count());
        assert_eq!(tables.theta_samples(), 90);
    }

    #[test]
    fn shade_index_clamps() {
        assert_eq!(shade_index(0.0, 12), 0);
        assert_eq!(shade_index(0.05, 12), 0);
        assert_eq!(shade_index(0.125, 12), 1);
        assert_eq!(shade_index(1.0, 12), 8);
        assert_eq!(shade_index(1.414, 12), 11);
        assert_eq!(shade_index(5.0, 12), 11);
        assert_eq!(shade_index(-3.0, 12), 0);
        assert_eq!(shade_index(0.9, 1), 0);
    }

    #[test]
    fn shade_index_is_monotonic() {
        let mut prev = 0;
        for i in 0..200 {
            let idx = shade_index(i as f64 * 0.01, 12);
            assert!(idx >= prev);
            assert!(idx < 12);
            prev = idx;
        }
    }

    #[test]
    fn luminance_at_rest() {
        // At a = b = 0 the formula reduces to sin(theta) - cos(theta) * sin(phi)
        let rest = PhaseTrig::new(0.0, 0.0);
        let l = surface_luminance((1.0, 0.0), (0.0, 1.0), &rest);
        assert!((l - 1.0).abs() < 1e-12);
        let l = surface_luminance((0.0, 1.0), (1.0, 0.0), &rest);
        assert!((l + 1.0).abs() < 1e-12);
    }

    #[test]
    fn frame_has_exact_shape() {
        for (w, h) in [(1, 1), (10, 5), (80, 22), (3, 40)] {
            let cfg = DonutConfig {
                width: w,
                height: h,
                ..DonutConfig::default()
            };
            let text = render(&cfg, 0.3, 1.1, None).to_text();
            let lines: Vec<&str> = text.split_terminator('\n').collect();
            assert_eq!(lines.len(), h);
            assert!(lines.iter().all(|l| l.chars().count() == w));
            assert!(text.ends_with('\n'));
        }
    }

    #[test]
    fn small_grid_draws_palette_chars() {
        let cfg = small();
        let text = render(&cfg, 0.0, 0.0, None).to_text();
        let mut drawn = 0;
        for ch in text.chars().filter(|c| *c != '\n') {
            if ch != ' ' {
                assert!(cfg.shading.contains(&ch), "unexpected glyph {ch:?}");
                drawn += 1;
            }
        }
        assert!(drawn > 0);
    }

    #[test]
    fn table_rendering_matches_baseline() {
        let cfg = DonutConfig::default();
        let tables = SampleTables::new(cfg.theta_step, cfg.phi_step);
        for (a, b) in [(0.0, 0.0), (0.4, 0.2), (12.0, 6.0)] {
            assert_eq!(
                render(&cfg, a, b, None).to_text(),
                render(&cfg, a, b, Some(&tables)).to_text()
            );
        }
    }

    #[test]
    fn empty_palette_draws_nothing() {
        let cfg = DonutConfig {
            shading: Vec::new(),
            ..small()
        };
        let text = render(&cfg, 0.0, 0.0, None).to_text();
        assert!(text.chars().all(|c| c == ' ' || c == '\n'));
    }

    #[test]
    fn cells_hold_the_nearest_visible_sample() {
        // Brute force every visible sample and compare against the buffer
        let cfg = DonutConfig {
            width: 24,
            height: 12,
            k1: 12.0,
            theta_step: 0.3,
            phi_step: 0.1,
            ..DonutConfig::default()
        };
        let (a, b) = (0.7, 0.35);
        let fb = render(&cfg, a, b, None);
        let t = PhaseTrig::new(a, b);

        let mut best = vec![0.0_f64; cfg.width * cfg.height];
        for theta in AngleSweep::new(cfg.theta_step) {
            for phi in AngleSweep::new(cfg.phi_step) {
                let circle_x = cfg.r2 + cfg.r1 * theta.1;
                let circle_y = cfg.r1 * theta.0;
                let (x, y, z) = (circle_x * phi.1, circle_x * phi.0, circle_y);
                let y1 = y * t.cos_a - z * t.sin_a;
                let z1 = y * t.sin_a + z * t.cos_a;
                let x2 = x * t.cos_b - y1 * t.sin_b;
                let y2 = x * t.sin_b + y1 * t.cos_b;
                let ooz = 1.0 / (z1 + cfg.k2);
                let xp = (cfg.width as f64 / 2.0 + cfg.k1 * ooz * x2) as isize;
                let yp = (cfg.height as f64 / 2.0 - cfg.k1 * 0.5 * ooz * y2) as isize;
                if surface_luminance(theta, phi, &t) > 0.0
                    && xp >= 0
                    && yp >= 0
                    && (xp as usize) < cfg.width
                    && (yp as usize) < cfg.height
                {
                    let idx = xp as usize + cfg.width * yp as usize;
                    best[idx] = best[idx].max(ooz);
                }
            }
        }

        for y in 0..cfg.height {
            for x in 0..cfg.width {
                assert_eq!(fb.depth_at(x, y), Some(best[x + cfg.width * y]));
            }
        }
    }
}
