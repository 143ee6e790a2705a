use crate::element::Element;
use crate::error::MatResult;
use crate::matrix::{to_dim, Matrix};

/// Rows needed to hold `len` elements `width` at a time.
///
/// A zero width passes `len` through unchanged.
#[inline]
pub(crate) fn rows_for(len: usize, width: usize) -> usize {
    if width == 0 {
        return len;
    }
    let remainder = len % width;
    if remainder == 0 {
        len / width
    } else {
        (len + width - remainder) / width
    }
}

impl<T: Element> Matrix<T> {
    /// `result[c, r] = self[r, c]`.
    pub fn transpose(&self) -> Matrix<T> {
        let (rows, cols) = (self.rows() as usize, self.cols() as usize);
        let src = self.as_slice();
        let mut dst = vec![T::zero(); src.len()];
        for y in 0..rows {
            for x in 0..cols {
                dst[x * rows + y] = src[y * cols + x];
            }
        }
        Matrix::from_parts_unchecked(self.cols(), self.rows(), dst)
    }

    /// Quarter turn clockwise: `result[x, rows-1-y] = self[y, x]`.
    pub fn rotate_clockwise_90(&self) -> Matrix<T> {
        let (rows, cols) = (self.rows() as usize, self.cols() as usize);
        let src = self.as_slice();
        let mut dst = vec![T::zero(); src.len()];
        for y in 0..rows {
            for x in 0..cols {
                dst[x * rows + (rows - 1 - y)] = src[y * cols + x];
            }
        }
        Matrix::from_parts_unchecked(self.cols(), self.rows(), dst)
    }

    /// Mirrors every row: `result[y, x] = self[y, cols-1-x]`.
    pub fn flip_horizontal(&self) -> Matrix<T> {
        let cols = self.cols() as usize;
        let mut dst = self.as_slice().to_vec();
        if cols > 0 {
            dst.chunks_exact_mut(cols).for_each(|row| row.reverse());
        }
        Matrix::from_parts_unchecked(self.rows(), self.cols(), dst)
    }

    /// Reverses the row order: `result[y, x] = self[rows-1-y, x]`.
    pub fn flip_vertical(&self) -> Matrix<T> {
        let cols = self.cols() as usize;
        let mut dst = Vec::with_capacity(self.total_size());
        if cols > 0 {
            for row in self.as_slice().chunks_exact(cols).rev() {
                dst.extend_from_slice(row);
            }
        }
        Matrix::from_parts_unchecked(self.rows(), self.cols(), dst)
    }

    /// Reinterprets the flat buffer with `new_cols` columns.
    ///
    /// Rows are recomputed the same way as [`Matrix::from_flat`]; cells past
    /// the old data are zero.
    pub fn reshape(&self, new_cols: u32) -> MatResult<Matrix<T>> {
        let new_rows = to_dim(rows_for(self.total_size(), new_cols as usize))?;
        let mut m = Matrix::zeros(new_rows, new_cols);
        let n = self.total_size().min(m.total_size());
        m.as_slice_mut()[..n].copy_from_slice(&self.as_slice()[..n]);
        Ok(m)
    }
}
