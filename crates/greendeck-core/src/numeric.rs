//! Numeric summary helpers used by the chart catalog: growth rates, gap
//! arithmetic, concentration ratios, least-squares fits, and the seeded
//! normal sampler behind the scatter charts.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Compound annual growth rate: `(end/start)^(1/periods) - 1`.
pub fn cagr(start: f64, end: f64, periods: f64) -> f64 {
    (end / start).powf(1.0 / periods) - 1.0
}

/// Absolute gap between required and current investment.
pub fn gap(required: f64, current: f64) -> f64 {
    required - current
}

/// Gap as a percentage of the required amount.
pub fn gap_pct(required: f64, current: f64) -> f64 {
    (required - current) / required * 100.0
}

/// Share of the total held by the first `n` entries, in percent.
/// `values` must already be ordered largest-first.
pub fn top_n_share(values: &[f64], n: usize) -> f64 {
    let total: f64 = values.iter().sum();
    if total == 0.0 {
        return 0.0;
    }
    let top: f64 = values.iter().take(n).sum();
    top / total * 100.0
}

/// `n` evenly spaced values over `[start, end]` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![start];
    }
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Clamp every value into `[lo, hi]`.
pub fn clip(values: &mut [f64], lo: f64, hi: f64) {
    for v in values.iter_mut() {
        *v = v.clamp(lo, hi);
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Least-squares line through `(x, y)`: returns `(slope, intercept)`.
pub fn polyfit1(x: &[f64], y: &[f64]) -> (f64, f64) {
    debug_assert_eq!(x.len(), y.len());
    let n = x.len() as f64;
    let sx: f64 = x.iter().sum();
    let sy: f64 = y.iter().sum();
    let sxx: f64 = x.iter().map(|v| v * v).sum();
    let sxy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
    let denom = n * sxx - sx * sx;
    let slope = (n * sxy - sx * sy) / denom;
    let intercept = (sy - slope * sx) / n;
    (slope, intercept)
}

/// Least-squares quadratic through `(x, y)`: returns coefficients
/// `[c0, c1, c2]` for `c0 + c1*x + c2*x^2`, solved from the 3x3 normal
/// equations by Gaussian elimination with partial pivoting.
pub fn polyfit2(x: &[f64], y: &[f64]) -> [f64; 3] {
    debug_assert_eq!(x.len(), y.len());
    let n = x.len() as f64;
    let s1: f64 = x.iter().sum();
    let s2: f64 = x.iter().map(|v| v.powi(2)).sum();
    let s3: f64 = x.iter().map(|v| v.powi(3)).sum();
    let s4: f64 = x.iter().map(|v| v.powi(4)).sum();
    let b0: f64 = y.iter().sum();
    let b1: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
    let b2: f64 = x.iter().zip(y).map(|(a, b)| a * a * b).sum();

    let mut m = [[n, s1, s2, b0], [s1, s2, s3, b1], [s2, s3, s4, b2]];

    for col in 0..3 {
        let pivot = (col..3)
            .max_by(|&a, &b| m[a][col].abs().total_cmp(&m[b][col].abs()))
            .unwrap_or(col);
        m.swap(col, pivot);
        for row in (col + 1)..3 {
            let factor = m[row][col] / m[col][col];
            for k in col..4 {
                m[row][k] -= factor * m[col][k];
            }
        }
    }

    let c2 = m[2][3] / m[2][2];
    let c1 = (m[1][3] - m[1][2] * c2) / m[1][1];
    let c0 = (m[0][3] - m[0][1] * c1 - m[0][2] * c2) / m[0][0];
    [c0, c1, c2]
}

/// Evaluate a polynomial with ascending coefficients at `x`.
pub fn polyval(coeffs: &[f64], x: f64) -> f64 {
    coeffs
        .iter()
        .rev()
        .fold(0.0, |acc, &c| acc * x + c)
}

/// Deterministic normal deviates for the risk-return scatter clusters and
/// the quarterly greenium noise. Box-Muller over a seeded uniform stream,
/// so a fixed seed always yields the same chart.
pub struct NormalSampler {
    rng: StdRng,
    spare: Option<f64>,
}

impl NormalSampler {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            spare: None,
        }
    }

    /// One draw from N(mean, sd).
    pub fn sample(&mut self, mean: f64, sd: f64) -> f64 {
        let z = match self.spare.take() {
            Some(z) => z,
            None => {
                // Box-Muller; u1 nudged away from zero so ln() is finite.
                let u1: f64 = self.rng.gen::<f64>().max(f64::MIN_POSITIVE);
                let u2: f64 = self.rng.gen();
                let r = (-2.0 * u1.ln()).sqrt();
                let theta = 2.0 * std::f64::consts::PI * u2;
                self.spare = Some(r * theta.sin());
                r * theta.cos()
            }
        };
        mean + sd * z
    }

    /// `n` draws from N(mean, sd).
    pub fn sample_vec(&mut self, mean: f64, sd: f64, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.sample(mean, sd)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cagr_matches_formula() {
        // 300 -> 2900 over 9 periods, the market-growth endpoints.
        let rate = cagr(300.0, 2900.0, 9.0);
        let expected = (2900.0_f64 / 300.0).powf(1.0 / 9.0) - 1.0;
        assert!((rate - expected).abs() < 1e-12);
        assert!(rate > 0.28 && rate < 0.29);
    }

    #[test]
    fn cagr_flat_series_is_zero() {
        assert!(cagr(100.0, 100.0, 5.0).abs() < 1e-12);
    }

    #[test]
    fn gap_arithmetic() {
        assert_eq!(gap(1200.0, 410.0), 790.0);
        assert!((gap_pct(1200.0, 410.0) - 65.833_333).abs() < 1e-3);
    }

    #[test]
    fn issuer_concentration_top_shares() {
        // Top-15 issuer volumes plus the residual bucket, as charted.
        let volumes = [
            85.0, 72.0, 68.0, 52.0, 48.0, 42.0, 38.0, 35.0, 32.0, 28.0, 26.0, 24.0, 22.0, 20.0,
            980.0,
        ];
        let total: f64 = volumes.iter().sum();
        assert_eq!(total, 1572.0);
        let top10 = top_n_share(&volumes, 10);
        assert!((top10 - 500.0 / 1572.0 * 100.0).abs() < 1e-9);
        let top14 = top_n_share(&volumes, 14);
        assert!((top14 - 592.0 / 1572.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn linspace_endpoints_and_spacing() {
        let v = linspace(7.0, 2.0, 24);
        assert_eq!(v.len(), 24);
        assert!((v[0] - 7.0).abs() < 1e-12);
        assert!((v[23] - 2.0).abs() < 1e-12);
        assert!(v[0] > v[1]);
    }

    #[test]
    fn polyfit1_recovers_exact_line() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [3.0, 5.0, 7.0, 9.0]; // y = 2x + 1
        let (slope, intercept) = polyfit1(&x, &y);
        assert!((slope - 2.0).abs() < 1e-9);
        assert!((intercept - 1.0).abs() < 1e-9);
    }

    #[test]
    fn polyfit2_recovers_exact_quadratic() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y: Vec<f64> = x.iter().map(|&v| 1.5 + 0.5 * v - 2.0 * v * v).collect();
        let c = polyfit2(&x, &y);
        assert!((c[0] - 1.5).abs() < 1e-6);
        assert!((c[1] - 0.5).abs() < 1e-6);
        assert!((c[2] + 2.0).abs() < 1e-6);
        assert!((polyval(&c, 2.5) - (1.5 + 0.5 * 2.5 - 2.0 * 2.5 * 2.5)).abs() < 1e-6);
    }

    #[test]
    fn clip_bounds_values() {
        let mut v = vec![0.5, 3.0, 9.9];
        clip(&mut v, 1.5, 8.0);
        assert_eq!(v, vec![1.5, 3.0, 8.0]);
    }

    #[test]
    fn sampler_is_deterministic_for_a_seed() {
        let mut a = NormalSampler::seeded(42);
        let mut b = NormalSampler::seeded(42);
        let va = a.sample_vec(8.5, 1.5, 25);
        let vb = b.sample_vec(8.5, 1.5, 25);
        assert_eq!(va, vb);
    }

    #[test]
    fn sampler_roughly_centers_on_mean() {
        let mut s = NormalSampler::seeded(7);
        let v = s.sample_vec(10.0, 2.0, 4000);
        let m = mean(&v);
        assert!((m - 10.0).abs() < 0.2, "mean drifted: {m}");
    }
}
