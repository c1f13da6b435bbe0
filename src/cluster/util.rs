use crate::error::{Error, Result};

/// Swap rows and columns of a rectangular matrix.
///
/// An empty matrix transposes to an empty matrix. Rows must all have the
/// same length; callers validate this before calling.
pub(crate) fn transpose(rows: &[Vec<f32>]) -> Vec<Vec<f32>> {
    if rows.is_empty() {
        return Vec::new();
    }

    let mut out = vec![vec![0.0; rows.len()]; rows[0].len()];
    for (i, row) in rows.iter().enumerate() {
        for (j, &v) in row.iter().enumerate() {
            out[j][i] = v;
        }
    }
    out
}

/// Smallest element of a non-empty slice.
pub(crate) fn min(xs: &[f32]) -> Result<f32> {
    xs.iter()
        .copied()
        .reduce(f32::min)
        .ok_or(Error::EmptyInput)
}

/// Largest element of a non-empty slice.
pub(crate) fn max(xs: &[f32]) -> Result<f32> {
    xs.iter()
        .copied()
        .reduce(f32::max)
        .ok_or(Error::EmptyInput)
}

/// Arithmetic mean of a non-empty slice.
pub(crate) fn mean(xs: &[f32]) -> Result<f32> {
    if xs.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(xs.iter().sum::<f32>() / xs.len() as f32)
}

/// Euclidean distance between two vectors of equal length.
///
/// Unequal lengths are an error, never silently truncated.
#[inline]
pub(crate) fn euclidean_distance(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }

    let sum: f32 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum();
    Ok(sum.sqrt())
}
