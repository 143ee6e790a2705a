use crate::element::{Element, RealElement};
use crate::matrix::Matrix;

impl<T: RealElement> Matrix<T> {
    #[inline]
    fn comparable(&self) -> impl Iterator<Item = T> + '_ {
        self.iter().copied().filter(|x| !x.is_nan())
    }

    /// Smallest non-NaN element, `None` when there is none.
    pub fn min(&self) -> Option<T> {
        let mut it = self.comparable();
        let first = it.next()?;
        Some(it.fold(first, |m, x| if x < m { x } else { m }))
    }

    /// Largest non-NaN element, `None` when there is none.
    pub fn max(&self) -> Option<T> {
        let mut it = self.comparable();
        let first = it.next()?;
        Some(it.fold(first, |m, x| if x > m { x } else { m }))
    }

    /// `(min, max)` in a single pass. NaN cells are skipped.
    pub fn min_max(&self) -> Option<(T, T)> {
        let mut it = self.comparable();
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), x| {
            (if x < lo { x } else { lo }, if x > hi { x } else { hi })
        }))
    }
}

impl<T: Element> Matrix<T> {
    /// Sum of the main diagonal, `min(rows, cols)` terms.
    pub fn trace(&self) -> T {
        let n = self.rows().min(self.cols()) as usize;
        (0..n).fold(T::zero(), |acc, i| acc + self[(i, i)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mat, Complex64};

    #[test]
    fn test_min_max_trace() {
        let m = mat![[3.0, -1.0], [5.0, 2.0]];
        assert_eq!(m.min(), Some(-1.0));
        assert_eq!(m.max(), Some(5.0));
        assert_eq!(m.min_max(), Some((-1.0, 5.0)));
        assert_eq!(m.trace(), 5.0);
    }

    #[test]
    fn test_empty() {
        let m = Matrix::<f32>::zeros(0, 3);
        assert_eq!(m.min(), None);
        assert_eq!(m.max(), None);
        assert_eq!(m.min_max(), None);
        assert_eq!(m.trace(), 0.0);
    }

    #[test]
    fn test_trace_rectangular() {
        let m = mat![[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]];
        assert_eq!(m.trace(), 6.0);
        let t = m.transpose();
        assert_eq!(t.trace(), 6.0);
    }

    #[test]
    fn test_trace_complex() {
        let m = Matrix::from_flat(
            &[
                Complex64::new(1.0, 1.0),
                Complex64::new(9.0, 9.0),
                Complex64::new(9.0, 9.0),
                Complex64::new(2.0, -3.0),
            ],
            2,
        )
        .unwrap();
        assert_eq!(m.trace(), Complex64::new(3.0, -2.0));
    }

    #[test]
    fn test_nan_is_skipped() {
        let lead = mat![[f64::NAN, 1.0], [-2.0, 4.0]];
        let mid = mat![[1.0, f64::NAN], [-2.0, 4.0]];
        for m in [&lead, &mid] {
            assert_eq!(m.min(), Some(-2.0));
            assert_eq!(m.max(), Some(4.0));
            assert_eq!(m.min_max(), Some((-2.0, 4.0)));
        }

        let all_nan = mat![[f32::NAN, f32::NAN]];
        assert_eq!(all_nan.min(), None);
        assert_eq!(all_nan.max(), None);
        assert_eq!(all_nan.min_max(), None);
    }

    #[test]
    fn test_single_element() {
        let m = mat![[7.5]];
        assert_eq!(m.min_max(), Some((7.5, 7.5)));
    }
}
