/**
 * Tolerance used by every collision test to reject near-parallel rays, near-tangent hits and
 * hits that would land back on the surface a ray is leaving.
 */
pub const EPS: f64 = 1e-6;

pub fn clamp(x: f64, a: f64, b: f64) -> f64 {
    if x < a {
        a
    }
    else if x > b {
        b
    }
    else {
        x
    }
}

pub fn clamp_unit(x: f64) -> f64 {
    clamp(x, 0.0, 1.0)
}

/**
 * Determines whether a number is zero, within EPS.
 */
pub fn is_nearly_zero(x: f64) -> bool {
    x.abs() < EPS
}

/**
 * Determines whether a number is positive, beyond EPS.
 */
pub fn is_positive(x: f64) -> bool {
    x > EPS
}

/**
 * Fractional part of x, always in [0, 1) even for negative x.
 */
pub fn wrap_unit(x: f64) -> f64 {
    x - x.floor()
}

/**
 * Binomial coefficients C(n, k) for n up to 5, as used by Bernstein polynomials of degree <= 5.
 */
pub const BINOMIAL: [[u32; 6]; 6] = [
    [1, 0, 0, 0, 0, 0],
    [1, 1, 0, 0, 0, 0],
    [1, 2, 1, 0, 0, 0],
    [1, 3, 3, 1, 0, 0],
    [1, 4, 6, 4, 1, 0],
    [1, 5, 10, 10, 5, 1],
];

/**
 * Evaluates the Bernstein basis polynomial B(k, n) at t. `n` must not exceed 5.
 */
pub fn bernstein(n: usize, k: usize, t: f64) -> f64 {
    BINOMIAL[n][k] as f64 * t.powi(k as i32) * (1.0 - t).powi((n - k) as i32)
}
