//! Sparse row-major matrix and the similarity math over it.
//!
//! The combined feature matrix is mostly zeros (a synopsis touches a few
//! dozen of several thousand terms), so rows are stored in compressed
//! sparse row (CSR) form. Profiles, being averages, are dense `Vec<f64>`.

use rayon::prelude::*;

/// Compressed sparse row matrix of `f64`.
///
/// Row `i` owns `indices[indptr[i]..indptr[i + 1]]` and the matching slice
/// of `data`. Column indices within a row are strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    n_rows: usize,
    n_cols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<f64>,
}

/// Borrowed view of one matrix row
#[derive(Debug, Clone, Copy)]
pub struct SparseRow<'a> {
    pub indices: &'a [usize],
    pub data: &'a [f64],
}

impl SparseRow<'_> {
    pub fn norm(&self) -> f64 {
        self.data.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Dot product with a dense vector of the matrix width
    pub fn dot_dense(&self, dense: &[f64]) -> f64 {
        self.indices
            .iter()
            .zip(self.data)
            .map(|(&col, &value)| value * dense[col])
            .sum()
    }

    /// Expand into a dense vector of `n_cols` entries
    pub fn to_dense(&self, n_cols: usize) -> Vec<f64> {
        let mut dense = vec![0.0; n_cols];
        for (&col, &value) in self.indices.iter().zip(self.data) {
            dense[col] = value;
        }
        dense
    }
}

impl SparseMatrix {
    /// A matrix with `n_rows` rows and no stored entries
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            indptr: vec![0; n_rows + 1],
            indices: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Assemble a matrix from per-row `(column, value)` lists.
    ///
    /// Entries of each row are sorted by column; zero values are dropped.
    pub fn from_rows(n_cols: usize, rows: Vec<Vec<(usize, f64)>>) -> Self {
        let n_rows = rows.len();
        let mut indptr = Vec::with_capacity(n_rows + 1);
        let mut indices = Vec::new();
        let mut data = Vec::new();
        indptr.push(0);

        for mut row in rows {
            row.sort_unstable_by_key(|&(col, _)| col);
            for (col, value) in row {
                debug_assert!(col < n_cols, "column {} out of bounds ({})", col, n_cols);
                if value != 0.0 {
                    indices.push(col);
                    data.push(value);
                }
            }
            indptr.push(indices.len());
        }

        Self {
            n_rows,
            n_cols,
            indptr,
            indices,
            data,
        }
    }

    /// Horizontally concatenate row-aligned blocks, left to right.
    ///
    /// All blocks must have the same row count. Column offsets of later
    /// blocks are shifted by the widths of the blocks before them.
    pub fn hstack(blocks: &[&SparseMatrix]) -> Self {
        let n_rows = blocks.first().map(|b| b.n_rows).unwrap_or(0);
        debug_assert!(
            blocks.iter().all(|b| b.n_rows == n_rows),
            "hstack requires row-aligned blocks"
        );

        let n_cols = blocks.iter().map(|b| b.n_cols).sum();
        let nnz = blocks.iter().map(|b| b.nnz()).sum();
        let mut indptr = Vec::with_capacity(n_rows + 1);
        let mut indices = Vec::with_capacity(nnz);
        let mut data = Vec::with_capacity(nnz);
        indptr.push(0);

        for row in 0..n_rows {
            let mut offset = 0;
            for block in blocks {
                let view = block.row(row);
                indices.extend(view.indices.iter().map(|&col| col + offset));
                data.extend_from_slice(view.data);
                offset += block.n_cols;
            }
            indptr.push(indices.len());
        }

        Self {
            n_rows,
            n_cols,
            indptr,
            indices,
            data,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Number of stored (non-zero) entries
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    /// View of row `i`; panics if `i >= n_rows`
    pub fn row(&self, i: usize) -> SparseRow<'_> {
        let (start, end) = (self.indptr[i], self.indptr[i + 1]);
        SparseRow {
            indices: &self.indices[start..end],
            data: &self.data[start..end],
        }
    }

    /// Value at `(row, col)`, zero when not stored
    pub fn get(&self, row: usize, col: usize) -> f64 {
        let view = self.row(row);
        view.indices
            .binary_search(&col)
            .map(|pos| view.data[pos])
            .unwrap_or(0.0)
    }

    /// Element-wise mean of the given rows as a dense vector.
    ///
    /// Returns `None` for an empty row list. Repeated row indices count
    /// once per occurrence.
    pub fn mean_of_rows(&self, rows: &[usize]) -> Option<Vec<f64>> {
        if rows.is_empty() {
            return None;
        }
        let mut mean = vec![0.0; self.n_cols];
        for &row in rows {
            let view = self.row(row);
            for (&col, &value) in view.indices.iter().zip(view.data) {
                mean[col] += value;
            }
        }
        let count = rows.len() as f64;
        mean.iter_mut().for_each(|v| *v /= count);
        Some(mean)
    }

    /// Cosine similarity between a dense vector and row `i`
    pub fn cosine_with_row(&self, dense: &[f64], i: usize) -> f64 {
        cosine_dense_sparse(dense, dense_norm(dense), self.row(i))
    }

    /// Cosine similarity between a dense vector and every row, in row order.
    ///
    /// Rows are scored in parallel with Rayon.
    pub fn cosine_similarities(&self, dense: &[f64]) -> Vec<f64> {
        let norm = dense_norm(dense);
        (0..self.n_rows)
            .into_par_iter()
            .map(|i| cosine_dense_sparse(dense, norm, self.row(i)))
            .collect()
    }
}

pub fn dense_norm(dense: &[f64]) -> f64 {
    dense.iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// Cosine of the angle between two vectors; zero vectors score `0.0`
fn cosine_dense_sparse(dense: &[f64], dense_norm: f64, row: SparseRow<'_>) -> f64 {
    let row_norm = row.norm();
    if dense_norm == 0.0 || row_norm == 0.0 {
        return 0.0;
    }
    row.dot_dense(dense) / (dense_norm * row_norm)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SparseMatrix {
        SparseMatrix::from_rows(
            3,
            vec![
                vec![(2, 1.0), (0, 2.0)],
                vec![],
                vec![(1, 3.0), (2, 0.0)],
            ],
        )
    }

    #[test]
    fn test_from_rows_sorts_and_drops_zeros() {
        let m = sample();
        assert_eq!(m.n_rows(), 3);
        assert_eq!(m.nnz(), 3);
        assert_eq!(m.row(0).indices, &[0, 2]);
        assert_eq!(m.get(0, 0), 2.0);
        assert_eq!(m.get(1, 1), 0.0);
        assert_eq!(m.get(2, 1), 3.0);
    }

    #[test]
    fn test_hstack_offsets_columns() {
        let left = sample();
        let right = SparseMatrix::from_rows(2, vec![vec![(1, 5.0)], vec![(0, 1.0)], vec![]]);
        let empty = SparseMatrix::zeros(3, 0);

        let stacked = SparseMatrix::hstack(&[&left, &empty, &right]);
        assert_eq!(stacked.n_rows(), 3);
        assert_eq!(stacked.n_cols(), 5);
        assert_eq!(stacked.get(0, 4), 5.0);
        assert_eq!(stacked.get(1, 3), 1.0);
        assert_eq!(stacked.get(0, 2), 1.0);
        assert_eq!(stacked.nnz(), 5);
    }

    #[test]
    fn test_hstack_of_nothing() {
        let stacked = SparseMatrix::hstack(&[]);
        assert_eq!(stacked.n_rows(), 0);
        assert_eq!(stacked.n_cols(), 0);
    }

    #[test]
    fn test_mean_of_rows() {
        let m = sample();
        assert_eq!(m.mean_of_rows(&[0, 2]).unwrap(), vec![1.0, 1.5, 0.5]);
        assert_eq!(m.mean_of_rows(&[0, 0]).unwrap(), vec![2.0, 0.0, 1.0]);
        assert!(m.mean_of_rows(&[]).is_none());
    }

    #[test]
    fn test_cosine() {
        let m = sample();
        let profile = m.row(0).to_dense(3);

        let scores = m.cosine_similarities(&profile);
        assert!((scores[0] - 1.0).abs() < 1e-12);
        assert_eq!(scores[1], 0.0); // empty row
        assert_eq!(scores[2], 0.0); // orthogonal

        assert_eq!(m.cosine_with_row(&[0.0, 0.0, 0.0], 0), 0.0);
    }
}
