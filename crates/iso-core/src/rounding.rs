//! Upward-rounded logarithms computed without touching the FP environment.
//!
//! The multinomial constant and the isotope log-probabilities are biased
//! upward by at most one ulp. Summed probabilities may then slightly exceed
//! the true total, but never fall short of it, so searches driven by a
//! cumulative-probability target always terminate.

/// Returns the smallest `f64` strictly greater than `x`.
///
/// NaN and `+∞` are returned unchanged; both zeros map to the smallest
/// positive subnormal.
pub fn next_up(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY {
        return x;
    }
    if x == 0.0 {
        return f64::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

/// Natural logarithm of a probability, rounded toward `+∞`.
///
/// `ln(1) = 0` is exact and stays untouched.
pub fn ln_up(p: f64) -> f64 {
    if p == 1.0 {
        0.0
    } else {
        next_up(p.ln())
    }
}

/// `ln Γ(x)` rounded toward `+∞`.
///
/// `Γ(1) = Γ(2) = 1`, so those two arguments give an exact zero.
pub fn lgamma_up(x: f64) -> f64 {
    if x == 1.0 || x == 2.0 {
        0.0
    } else {
        next_up(libm::lgamma(x))
    }
}
