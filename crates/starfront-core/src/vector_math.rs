//! Standalone integer/float vector helpers.
//!
//! Operands are plain slices. Mismatched lengths are logged and reported as
//! an error the caller must check before using the result.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VectorMathError {
    #[error("vector operands differ in length ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },
}

fn check_lengths(a: usize, b: usize) -> Result<(), VectorMathError> {
    if a != b {
        log::warn!("vector operands differ in length: {a} vs {b}");
        return Err(VectorMathError::LengthMismatch { left: a, right: b });
    }
    Ok(())
}

/// Component-wise sum of two equal-length vectors. Overflow wraps.
pub fn add_vectors(a: &[i32], b: &[i32]) -> Result<Vec<i32>, VectorMathError> {
    check_lengths(a.len(), b.len())?;
    Ok(a.iter().zip(b).map(|(x, y)| x.wrapping_add(*y)).collect())
}

/// Overflow wraps, in both the products and the running sum.
pub fn dot_product(a: &[i32], b: &[i32]) -> Result<i32, VectorMathError> {
    check_lengths(a.len(), b.len())?;
    Ok(a
        .iter()
        .zip(b)
        .fold(0i32, |acc, (x, y)| acc.wrapping_add(x.wrapping_mul(*y))))
}

/// Euclidean length.
pub fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

pub fn norm_i32(v: &[i32]) -> f64 {
    let sum: i64 = v.iter().map(|&x| i64::from(x) * i64::from(x)).sum();
    (sum as f64).sqrt()
}
