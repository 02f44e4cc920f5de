//! Triplet canonicalization shared by all construction paths
//!
//! Every sparse entity is built from raw (index, value) data through this
//! module: indices are bounds-checked, entries are sorted, and duplicates
//! are merged deterministically by summation — never by overwrite.

use crate::element::Element;
use crate::error::{Error, Result};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Validate triplet indices against the matrix shape.
///
/// Runs before any allocation or sort so a malformed input fails without
/// side effects.
pub(crate) fn validate_triplets(rows: &[i64], cols: &[i64], shape: [usize; 2]) -> Result<()> {
    let [nrows, ncols] = shape;
    for (&r, &c) in rows.iter().zip(cols.iter()) {
        if r < 0 || r as usize >= nrows {
            return Err(Error::index_out_of_bounds(r.max(0) as usize, nrows));
        }
        if c < 0 || c as usize >= ncols {
            return Err(Error::index_out_of_bounds(c.max(0) as usize, ncols));
        }
    }
    Ok(())
}

/// Sort triplets into row-major order and merge duplicate (row, col)
/// entries by summation.
///
/// Returns parallel (rows, cols, values) arrays with strictly increasing
/// (row, col) pairs. Deterministic for a fixed input: the sort key is the
/// (row, col) pair and duplicate values are summed in their sorted
/// positional order.
pub(crate) fn merge_triplets<T: Element>(
    rows: &[i64],
    cols: &[i64],
    values: &[T],
) -> (Vec<i64>, Vec<i64>, Vec<T>) {
    let nnz = values.len();
    let mut perm: Vec<usize> = (0..nnz).collect();

    #[cfg(feature = "rayon")]
    perm.par_sort_unstable_by_key(|&i| (rows[i], cols[i]));
    #[cfg(not(feature = "rayon"))]
    perm.sort_unstable_by_key(|&i| (rows[i], cols[i]));

    let mut out_rows = Vec::with_capacity(nnz);
    let mut out_cols = Vec::with_capacity(nnz);
    let mut out_values: Vec<T> = Vec::with_capacity(nnz);

    for &i in &perm {
        let (r, c) = (rows[i], cols[i]);
        match (out_rows.last(), out_cols.last()) {
            (Some(&pr), Some(&pc)) if pr == r && pc == c => {
                let last = out_values.len() - 1;
                out_values[last] += values[i];
            }
            _ => {
                out_rows.push(r);
                out_cols.push(c);
                out_values.push(values[i]);
            }
        }
    }

    (out_rows, out_cols, out_values)
}

/// Sort and merge sparse-vector (index, value) pairs by summation.
pub(crate) fn merge_vector_entries<T: Element>(
    indices: &[i64],
    values: &[T],
) -> (Vec<i64>, Vec<T>) {
    let nnz = values.len();
    let mut perm: Vec<usize> = (0..nnz).collect();

    #[cfg(feature = "rayon")]
    perm.par_sort_unstable_by_key(|&i| indices[i]);
    #[cfg(not(feature = "rayon"))]
    perm.sort_unstable_by_key(|&i| indices[i]);

    let mut out_indices = Vec::with_capacity(nnz);
    let mut out_values: Vec<T> = Vec::with_capacity(nnz);

    for &i in &perm {
        match out_indices.last() {
            Some(&prev) if prev == indices[i] => {
                let last = out_values.len() - 1;
                out_values[last] += values[i];
            }
            _ => {
                out_indices.push(indices[i]);
                out_values.push(values[i]);
            }
        }
    }

    (out_indices, out_values)
}
