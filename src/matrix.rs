use crate::element::{Element, ElementKind};
use crate::error::{MatError, MatResult, ShapeErrorKind};
use crate::shape::rows_for;
use std::fmt;
use std::ops::{Index, IndexMut};

#[cold]
fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}

#[inline]
pub(crate) fn to_dim(n: usize) -> MatResult<u32> {
    u32::try_from(n).map_err(|_| ShapeErrorKind::Overflow(n).into())
}

/// A dense, row-major matrix that owns its buffer.
///
/// Element `(r, c)` lives at flat index `r * cols + c` and the buffer always
/// holds exactly `rows * cols` elements.
#[derive(Clone, PartialEq)]
pub struct Matrix<T: Element> {
    rows: u32,
    cols: u32,
    data: Vec<T>,
}

impl<T: Element> Matrix<T> {
    /// Zero-filled `rows x cols` matrix.
    pub fn zeros(rows: u32, cols: u32) -> Self {
        Self::from_elem(T::zero(), rows, cols)
    }

    pub fn from_elem(elem: T, rows: u32, cols: u32) -> Self {
        let size = (rows as usize)
            .checked_mul(cols as usize)
            .unwrap_or_else(|| capacity_overflow());
        Self {
            rows,
            cols,
            data: vec![elem; size],
        }
    }

    /// Takes ownership of `data` as a `rows x cols` matrix.
    pub fn from_vec(rows: u32, cols: u32, data: Vec<T>) -> MatResult<Self> {
        if (rows as usize).checked_mul(cols as usize) != Some(data.len()) {
            return Err(ShapeErrorKind::LengthMismatch {
                rows,
                cols,
                got: data.len(),
            }
            .into());
        }
        Ok(Self { rows, cols, data })
    }

    /// Lays `values` out in rows of `width` elements.
    ///
    /// The last row is padded with zeros when `values.len()` is not a
    /// multiple of `width`. A zero `width` yields a `len x 0` matrix.
    pub fn from_flat(values: &[T], width: u32) -> MatResult<Self> {
        let rows = to_dim(rows_for(values.len(), width as usize))?;
        let mut m = Self::zeros(rows, width);
        let n = values.len().min(m.data.len());
        m.data[..n].copy_from_slice(&values[..n]);
        Ok(m)
    }

    /// Builds a matrix from equally long rows.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> MatResult<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        for (i, r) in rows.iter().enumerate() {
            let got = r.as_ref().len();
            if got != cols {
                return Err(ShapeErrorKind::RaggedRows {
                    row: i,
                    expected: cols,
                    got,
                }
                .into());
            }
        }
        let n_rows = to_dim(rows.len())?;
        let n_cols = to_dim(cols)?;
        let mut data = Vec::with_capacity(rows.len() * cols);
        for r in rows {
            data.extend_from_slice(r.as_ref());
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// A `1 x n` matrix.
    pub fn row_vector(values: &[T]) -> MatResult<Self> {
        let cols = to_dim(values.len())?;
        Ok(Self {
            rows: 1,
            cols,
            data: values.to_vec(),
        })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn shape(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }

    pub fn total_size(&self) -> usize {
        self.data.len()
    }

    pub fn byte_count(&self) -> usize {
        self.total_size() * T::KIND.size_of()
    }

    pub fn element_kind(&self) -> ElementKind {
        T::KIND
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows as usize && col < self.cols as usize {
            Some(row * self.cols as usize + col)
        } else {
            None
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.offset(row, col).map(|i| &self.data[i])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.offset(row, col).map(move |i| &mut self.data[i])
    }

    /// Read-only view of row `row`. Panics when out of range.
    pub fn row(&self, row: usize) -> &[T] {
        assert!(row < self.rows as usize, "row {} out of range", row);
        let cols = self.cols as usize;
        &self.data[row * cols..(row + 1) * cols]
    }

    /// Gives back the row-major buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Row-major iterator over all elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Writes `values` into the leading cells of row `row`.
    pub fn set_row(&mut self, row: usize, values: &[T]) -> MatResult<()> {
        if row >= self.rows as usize {
            return Err(MatError::IndexOutOfBounds {
                index: row,
                bound: self.rows as usize,
            });
        }
        if values.len() > self.cols as usize {
            return Err(ShapeErrorKind::RowTooLong {
                cols: self.cols,
                got: values.len(),
            }
            .into());
        }
        let start = row * self.cols as usize;
        self.data[start..start + values.len()].copy_from_slice(values);
        Ok(())
    }

    pub fn fill_constant(&mut self, v: T) {
        self.data.iter_mut().for_each(|x| *x = v);
    }

    pub fn all_ones(&mut self) {
        self.fill_constant(T::one());
    }

    pub fn all_zeros(&mut self) {
        self.fill_constant(T::zero());
    }

    /// Ones on the main diagonal, zeros everywhere else, in place.
    pub fn identity(&mut self) {
        let cols = self.cols as usize;
        for (i, x) in self.data.iter_mut().enumerate() {
            *x = if i / cols == i % cols {
                T::one()
            } else {
                T::zero()
            };
        }
    }

    /// Applies `f` to every element, returning a new matrix.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(T) -> T,
    {
        self.map_into(f)
    }

    /// Like [`map`](Self::map) but may change the element kind.
    pub(crate) fn map_into<U: Element, F>(&self, f: F) -> Matrix<U>
    where
        F: Fn(T) -> U,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub(crate) fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Wraps a buffer whose length the caller has already checked.
    pub(crate) fn from_parts_unchecked(rows: u32, cols: u32, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), rows as usize * cols as usize);
        Self { rows, cols, data }
    }
}

impl<T: Element> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        match self.offset(row, col) {
            Some(i) => &self.data[i],
            None => panic!(
                "index ({}, {}) out of range for {}x{} matrix",
                row, col, self.rows, self.cols
            ),
        }
    }
}

impl<T: Element> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        match self.offset(row, col) {
            Some(i) => &mut self.data[i],
            None => panic!(
                "index ({}, {}) out of range for {}x{} matrix",
                row, col, self.rows, self.cols
            ),
        }
    }
}

impl<T: Element, const N: usize> From<Vec<[T; N]>> for Matrix<T> {
    fn from(xs: Vec<[T; N]>) -> Self {
        let rows = u32::try_from(xs.len()).unwrap_or_else(|_| capacity_overflow());
        let cols = u32::try_from(N).unwrap_or_else(|_| capacity_overflow());
        let data = xs.into_iter().flatten().collect();
        Self { rows, cols, data }
    }
}

impl<T: Element> fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matrix<{}>[{}x{}]", T::KIND, self.rows, self.cols)?;
        f.write_str("[")?;
        for r in 0..self.rows as usize {
            if r > 0 {
                f.write_str(", ")?;
            }
            f.write_str("[")?;
            for (i, v) in self.row(r).iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{:?}", v)?;
            }
            f.write_str("]")?;
        }
        f.write_str("]")
    }
}
