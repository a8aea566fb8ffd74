//! Gait phase oscillator for the two legs.
//!
//! Each leg carries a phase scalar in [0, 1) advancing with elapsed
//! macro-steps and wrapping every `cycle / macro_dt` steps. Distinct
//! per-side offsets produce the left/right alternation. The policy consumes
//! the sine/cosine encodings, which stay continuous across the 0/1 wrap.

use strider_core::config::GaitParams;

/// Two-phase oscillator advanced once per macro-step.
///
/// Phase is recomputed from the elapsed step count rather than accumulated,
/// so it cannot drift. State is reset only at construction.
#[derive(Debug, Clone)]
pub struct GaitOscillator {
    cycle: f64,
    offsets: [f64; 2],
    air_ratio: [f64; 2],
    macro_dt: f64,
    steps: u64,
    phase: [f64; 2],
}

impl GaitOscillator {
    /// Create an oscillator at step zero with both phases at 0.
    #[must_use]
    pub fn new(params: &GaitParams, macro_dt: f64) -> Self {
        Self {
            cycle: params.cycle,
            offsets: [params.phase_offset_l, params.phase_offset_r],
            air_ratio: [params.air_ratio_l, params.air_ratio_r],
            macro_dt,
            steps: 0,
            phase: [0.0; 2],
        }
    }

    /// Advance by one macro-step:
    /// `phase[side] = frac(steps * macro_dt / cycle + offset[side])`.
    pub fn advance(&mut self) {
        self.steps += 1;
        #[allow(clippy::cast_precision_loss)]
        let t = self.steps as f64 * self.macro_dt / self.cycle;
        self.phase = [
            (t + self.offsets[0]).rem_euclid(1.0),
            (t + self.offsets[1]).rem_euclid(1.0),
        ];
    }

    /// Current left/right phase, each in [0, 1).
    pub const fn phase(&self) -> [f64; 2] {
        self.phase
    }

    /// `sin(2π · phase)` per side, as observation features.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn phase_sin(&self) -> [f32; 2] {
        [
            (std::f64::consts::TAU * self.phase[0]).sin() as f32,
            (std::f64::consts::TAU * self.phase[1]).sin() as f32,
        ]
    }

    /// `cos(2π · phase)` per side, as observation features.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn phase_cos(&self) -> [f32; 2] {
        [
            (std::f64::consts::TAU * self.phase[0]).cos() as f32,
            (std::f64::consts::TAU * self.phase[1]).cos() as f32,
        ]
    }

    /// Per-side air-ratio constants (fraction of the cycle spent airborne).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn air_ratio(&self) -> [f32; 2] {
        [self.air_ratio[0] as f32, self.air_ratio[1] as f32]
    }

    /// Elapsed macro-steps since construction.
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Cycle length in seconds.
    pub const fn cycle(&self) -> f64 {
        self.cycle
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn walk_oscillator() -> GaitOscillator {
        GaitOscillator::new(&GaitParams::walk(), 0.02)
    }

    #[test]
    fn starts_at_zero_phase() {
        let osc = walk_oscillator();
        assert_eq!(osc.phase(), [0.0, 0.0]);
        assert_eq!(osc.steps(), 0);
        // sin(0) = 0, cos(0) = 1
        assert_eq!(osc.phase_sin(), [0.0, 0.0]);
        assert_eq!(osc.phase_cos(), [1.0, 1.0]);
    }

    #[test]
    fn phase_after_one_step() {
        let mut osc = walk_oscillator();
        osc.advance();
        let expected_l = (0.02 / 0.85 + 0.38) % 1.0;
        let expected_r = (0.02 / 0.85 + 0.88) % 1.0;
        assert!((osc.phase()[0] - expected_l).abs() < 1e-12);
        assert!((osc.phase()[1] - expected_r).abs() < 1e-12);
    }

    #[test]
    fn phase_wraps_into_unit_interval() {
        // Offset 0.88 plus a few cycles of advance must stay in [0, 1).
        let mut osc = walk_oscillator();
        for _ in 0..10_000 {
            osc.advance();
            let [l, r] = osc.phase();
            assert!((0.0..1.0).contains(&l), "left phase {l} out of range");
            assert!((0.0..1.0).contains(&r), "right phase {r} out of range");
        }
        assert_eq!(osc.steps(), 10_000);
    }

    #[test]
    fn full_cycle_returns_to_offset() {
        // cycle 0.5 s at macro_dt 0.02 s: 25 steps per cycle exactly.
        let mut osc = GaitOscillator::new(&GaitParams::run(), 0.02);
        for _ in 0..25 {
            osc.advance();
        }
        assert!((osc.phase()[0] - 0.6).abs() < 1e-12);
        assert!((osc.phase()[1] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn sides_keep_constant_separation() {
        let mut osc = walk_oscillator();
        let separation = (0.88 - 0.38_f64).rem_euclid(1.0);
        for _ in 0..500 {
            osc.advance();
            let [l, r] = osc.phase();
            let gap = (r - l).rem_euclid(1.0);
            assert!((gap - separation).abs() < 1e-9);
        }
    }

    #[test]
    fn air_ratio_constants() {
        let osc = walk_oscillator();
        assert!((osc.air_ratio()[0] - 0.38).abs() < 1e-6);
        assert!((osc.air_ratio()[1] - 0.38).abs() < 1e-6);
        assert!((osc.cycle() - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn sin_cos_are_consistent_with_phase() {
        let mut osc = walk_oscillator();
        osc.advance();
        let [sl, sr] = osc.phase_sin();
        let [cl, cr] = osc.phase_cos();
        assert!((sl * sl + cl * cl - 1.0).abs() < 1e-5);
        assert!((sr * sr + cr * cr - 1.0).abs() < 1e-5);
    }
}
