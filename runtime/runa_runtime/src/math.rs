// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

//! Fixed-point math primitives.
//!
//! Every "real" value is an `i64` scaled by [`FIXED_POINT_SCALE`], so
//! `2_500_000` stands for `2.5`. Trigonometric functions take plain
//! integer degrees, `pow` takes a plain integer exponent, and `random`
//! returns a plain integer. Everything else is fixed-point in and out.

use std::f64::consts::PI;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{RuntimeError, RuntimeResult};

/// Six decimal places.
pub const FIXED_POINT_SCALE: i64 = 1_000_000;

/// Largest value `random` can return.
pub const RANDOM_MAX: i64 = (1 << 31) - 1;

/// `tan` results are clamped to this magnitude before scaling.
pub const TAN_LIMIT: f64 = 1_000_000.0;

const SCALE_F: f64 = FIXED_POINT_SCALE as f64;

pub fn to_fixed(value: f64, op: &'static str) -> RuntimeResult<i64> {
    let scaled = (value * SCALE_F).round();
    if !scaled.is_finite() || scaled >= i64::MAX as f64 || scaled < i64::MIN as f64 {
        return Err(RuntimeError::Overflow { op });
    }
    Ok(scaled as i64)
}

pub fn from_fixed(value: i64) -> f64 {
    value as f64 / SCALE_F
}

fn degrees_to_radians(degrees: i64) -> f64 {
    degrees as f64 * PI / 180.0
}

fn scale_unit(value: f64) -> i64 {
    (value * SCALE_F).round() as i64
}

pub fn sin(degrees: i64) -> i64 {
    scale_unit(degrees_to_radians(degrees).sin())
}

pub fn cos(degrees: i64) -> i64 {
    scale_unit(degrees_to_radians(degrees).cos())
}

/// Near the asymptotes the result saturates at `±TAN_LIMIT`.
pub fn tan(degrees: i64) -> i64 {
    let value = degrees_to_radians(degrees).tan().clamp(-TAN_LIMIT, TAN_LIMIT);
    scale_unit(value)
}

/// Floor of the exact square root, computed on integers.
pub fn sqrt(x: i64) -> RuntimeResult<i64> {
    if x < 0 {
        return Err(RuntimeError::DomainError { op: "sqrt", value: x });
    }
    let root = isqrt(x as u128 * FIXED_POINT_SCALE as u128);
    i64::try_from(root).map_err(|_| RuntimeError::Overflow { op: "sqrt" })
}

fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let mut x = n;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

/// Raises a fixed-point base to a plain integer exponent.
pub fn pow(base: i64, exponent: i64) -> RuntimeResult<i64> {
    if exponent == 0 {
        return Ok(FIXED_POINT_SCALE);
    }
    if base == 0 && exponent < 0 {
        return Err(RuntimeError::DomainError { op: "pow", value: base });
    }
    to_fixed(from_fixed(base).powf(exponent as f64), "pow")
}

pub fn abs(x: i64) -> RuntimeResult<i64> {
    x.checked_abs().ok_or(RuntimeError::Overflow { op: "abs" })
}

/// Rounds toward negative infinity.
pub fn floor(x: i64) -> RuntimeResult<i64> {
    x.div_euclid(FIXED_POINT_SCALE)
        .checked_mul(FIXED_POINT_SCALE)
        .ok_or(RuntimeError::Overflow { op: "floor" })
}

/// Rounds toward positive infinity.
pub fn ceil(x: i64) -> RuntimeResult<i64> {
    if x.rem_euclid(FIXED_POINT_SCALE) == 0 {
        return Ok(x);
    }
    (x.div_euclid(FIXED_POINT_SCALE) + 1)
        .checked_mul(FIXED_POINT_SCALE)
        .ok_or(RuntimeError::Overflow { op: "ceil" })
}

pub fn min(a: i64, b: i64) -> i64 {
    a.min(b)
}

pub fn max(a: i64, b: i64) -> i64 {
    a.max(b)
}

/// Natural logarithm.
pub fn log(x: i64) -> RuntimeResult<i64> {
    if x <= 0 {
        return Err(RuntimeError::DomainError { op: "log", value: x });
    }
    to_fixed(from_fixed(x).ln(), "log")
}

pub fn exp(x: i64) -> RuntimeResult<i64> {
    to_fixed(from_fixed(x).exp(), "exp")
}

/// xorshift64* generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomSource {
    state: u64
}

const DEFAULT_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

impl RandomSource {
    pub fn with_seed(seed: u64) -> Self {
        let state = seed ^ DEFAULT_SEED;
        Self {
            state: if state == 0 { DEFAULT_SEED } else { state }
        }
    }

    /// Seeds from the wall clock.
    pub fn from_clock() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or(DEFAULT_SEED);
        Self::with_seed(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform over `[0, RANDOM_MAX]`.
    pub fn next_random(&mut self) -> i64 {
        (self.next_u64() >> 33) as i64
    }
}

thread_local! {
    static THREAD_RANDOM: std::cell::Cell<Option<RandomSource>> = const { std::cell::Cell::new(None) };
}

/// Draws from a per-thread generator seeded from the clock on first use.
pub fn random() -> i64 {
    THREAD_RANDOM.with(|cell| {
        let mut source = cell.get().unwrap_or_else(RandomSource::from_clock);
        let value = source.next_random();
        cell.set(Some(source));
        value
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const S: i64 = FIXED_POINT_SCALE;

    #[test]
    fn test_trig_at_known_angles() {
        assert_eq!(sin(0), 0);
        assert_eq!(sin(90), S);
        assert_eq!(sin(30), S / 2);
        assert_eq!(sin(180), 0);
        assert_eq!(cos(0), S);
        assert_eq!(cos(60), S / 2);
        assert_eq!(cos(180), -S);
        assert_eq!(tan(45), S);
    }

    #[test]
    fn test_tan_is_clamped_near_asymptote() {
        assert_eq!(tan(90), (TAN_LIMIT as i64) * S);
        assert_eq!(tan(-90), -(TAN_LIMIT as i64) * S);
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(sqrt(4 * S), Ok(2 * S));
        assert_eq!(sqrt(0), Ok(0));
        assert_eq!(sqrt(2 * S), Ok(1_414_213));
        assert_eq!(sqrt(S / 4), Ok(S / 2));
        assert_eq!(sqrt(-1), Err(RuntimeError::DomainError { op: "sqrt", value: -1 }));
        assert!(sqrt(i64::MAX).is_ok());
    }

    #[test]
    fn test_pow_edges() {
        assert_eq!(pow(2 * S, 10), Ok(1024 * S));
        assert_eq!(pow(2 * S, -2), Ok(S / 4));
        assert_eq!(pow(-3 * S, 3), Ok(-27 * S));
        assert_eq!(pow(0, 0), Ok(S), "pow(x, 0) is 1.0 for every x");
        assert_eq!(pow(123_456, 0), Ok(S));
        assert_eq!(pow(0, 5), Ok(0));
        assert_eq!(pow(0, -1), Err(RuntimeError::DomainError { op: "pow", value: 0 }));
        assert_eq!(pow(10 * S, 40), Err(RuntimeError::Overflow { op: "pow" }));
    }

    #[test]
    fn test_abs() {
        assert_eq!(abs(-3 * S), Ok(3 * S));
        assert_eq!(abs(7), Ok(7));
        assert_eq!(abs(i64::MIN), Err(RuntimeError::Overflow { op: "abs" }));
    }

    #[test]
    fn test_floor_and_ceil_on_negative_values() {
        assert_eq!(floor(-2_500_000), Ok(-3 * S));
        assert_eq!(ceil(-2_500_000), Ok(-2 * S));
        assert_eq!(floor(2_500_000), Ok(2 * S));
        assert_eq!(ceil(2_500_000), Ok(3 * S));
        assert_eq!(floor(-4 * S), Ok(-4 * S));
        assert_eq!(ceil(-4 * S), Ok(-4 * S));
        assert_eq!(floor(-1), Ok(-S));
        assert_eq!(ceil(1), Ok(S));
    }

    #[test]
    fn test_floor_and_ceil_overflow() {
        assert_eq!(floor(i64::MIN), Err(RuntimeError::Overflow { op: "floor" }));
        assert_eq!(ceil(i64::MAX), Err(RuntimeError::Overflow { op: "ceil" }));
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min(-1, 4), -1);
        assert_eq!(max(-1, 4), 4);
    }

    #[test]
    fn test_log_and_exp() {
        assert_eq!(log(S), Ok(0));
        assert_eq!(exp(0), Ok(S));
        assert_eq!(exp(S), Ok(2_718_282));
        assert_eq!(log(2_718_282), Ok(S));
        assert_eq!(log(0), Err(RuntimeError::DomainError { op: "log", value: 0 }));
        assert_eq!(log(-5), Err(RuntimeError::DomainError { op: "log", value: -5 }));
        assert_eq!(exp(100 * S), Err(RuntimeError::Overflow { op: "exp" }));
        assert_eq!(exp(-100 * S), Ok(0));
    }

    #[test]
    fn test_seeded_random_is_deterministic_and_in_range() {
        let mut a = RandomSource::with_seed(42);
        let mut b = RandomSource::with_seed(42);
        for _ in 0..1000 {
            let value = a.next_random();
            assert_eq!(value, b.next_random());
            assert!((0..=RANDOM_MAX).contains(&value));
        }
    }

    #[test]
    fn test_zero_seed_still_produces_values() {
        let mut source = RandomSource::with_seed(DEFAULT_SEED);
        let first = source.next_u64();
        let second = source.next_u64();
        assert_ne!(first, second);
    }

    #[test]
    fn test_thread_random_in_range() {
        for _ in 0..100 {
            assert!((0..=RANDOM_MAX).contains(&random()));
        }
    }
}
