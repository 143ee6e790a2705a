use crate::config::KernelConfig;
use crate::element::{Complex32, Complex64, Element};
use crate::error::{MatError, MatResult};
use crate::matrix::Matrix;
use log::{debug, trace};
use rayon::prelude::*;

trait Map2 {
    const OP: &'static str;
    fn f<T: Element>(a: T, b: T) -> T;
}

struct Add;
struct Sub;
struct Mul;
struct Div;

impl Map2 for Add {
    const OP: &'static str = "add";
    #[inline]
    fn f<T: Element>(a: T, b: T) -> T {
        a + b
    }
}

impl Map2 for Sub {
    const OP: &'static str = "sub";
    #[inline]
    fn f<T: Element>(a: T, b: T) -> T {
        a - b
    }
}

impl Map2 for Mul {
    const OP: &'static str = "mul";
    #[inline]
    fn f<T: Element>(a: T, b: T) -> T {
        a * b
    }
}

impl Map2 for Div {
    const OP: &'static str = "div";
    #[inline]
    fn f<T: Element>(a: T, b: T) -> T {
        a / b
    }
}

#[inline]
fn is_same_shape<T: Element>(a: &Matrix<T>, b: &Matrix<T>) -> bool {
    a.shape() == b.shape()
}

fn binary_map<O: Map2, T: Element>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> MatResult<Matrix<T>> {
    if !is_same_shape(lhs, rhs) {
        return Err(MatError::ShapeMismatch {
            op: O::OP,
            lhs: lhs.shape(),
            rhs: rhs.shape(),
        });
    }
    let data = lhs
        .as_slice()
        .iter()
        .zip(rhs.as_slice().iter())
        .map(|(&a, &b)| O::f(a, b))
        .collect();
    Ok(Matrix::from_parts_unchecked(lhs.rows(), lhs.cols(), data))
}

fn scalar_rhs<O: Map2, T: Element>(lhs: &Matrix<T>, s: T) -> Matrix<T> {
    lhs.map(|a| O::f(a, s))
}

fn scalar_lhs<O: Map2, T: Element>(s: T, rhs: &Matrix<T>) -> Matrix<T> {
    rhs.map(|b| O::f(s, b))
}

impl<T: Element> Matrix<T> {
    /// Element-wise sum of two equally shaped matrices.
    pub fn try_add(&self, rhs: &Matrix<T>) -> MatResult<Matrix<T>> {
        binary_map::<Add, T>(self, rhs)
    }

    pub fn try_sub(&self, rhs: &Matrix<T>) -> MatResult<Matrix<T>> {
        binary_map::<Sub, T>(self, rhs)
    }

    /// Element-wise (Hadamard) product. See [`dot`](Self::dot) for the
    /// matrix product.
    pub fn try_mul(&self, rhs: &Matrix<T>) -> MatResult<Matrix<T>> {
        binary_map::<Mul, T>(self, rhs)
    }

    pub fn try_div(&self, rhs: &Matrix<T>) -> MatResult<Matrix<T>> {
        binary_map::<Div, T>(self, rhs)
    }

    pub fn add_scalar(&self, s: T) -> Matrix<T> {
        scalar_rhs::<Add, T>(self, s)
    }

    /// `self[i] - s`.
    pub fn sub_scalar(&self, s: T) -> Matrix<T> {
        scalar_rhs::<Sub, T>(self, s)
    }

    /// `s - self[i]`.
    pub fn scalar_sub(&self, s: T) -> Matrix<T> {
        scalar_lhs::<Sub, T>(s, self)
    }

    pub fn mul_scalar(&self, s: T) -> Matrix<T> {
        scalar_rhs::<Mul, T>(self, s)
    }

    /// `self[i] / s`.
    pub fn div_scalar(&self, s: T) -> Matrix<T> {
        scalar_rhs::<Div, T>(self, s)
    }

    /// `s / self[i]`.
    pub fn scalar_div(&self, s: T) -> Matrix<T> {
        scalar_lhs::<Div, T>(s, self)
    }

    /// Matrix product with the process-wide [`KernelConfig`].
    pub fn dot(&self, rhs: &Matrix<T>) -> MatResult<Matrix<T>> {
        self.dot_with(rhs, KernelConfig::global())
    }

    /// Matrix product `self (m x k) * rhs (k x n)`.
    ///
    /// Each output cell sums `z = 0..k` in ascending order whether or not
    /// the rows are computed in parallel.
    pub fn dot_with(&self, rhs: &Matrix<T>, config: &KernelConfig) -> MatResult<Matrix<T>> {
        if self.cols() != rhs.rows() {
            return Err(MatError::DimensionMismatch {
                lhs: self.shape(),
                rhs: rhs.shape(),
            });
        }
        let (m, k, n) = (
            self.rows() as usize,
            self.cols() as usize,
            rhs.cols() as usize,
        );
        let mut dst = vec![T::zero(); m * n];
        if dst.is_empty() {
            return Ok(Matrix::from_parts_unchecked(self.rows(), rhs.cols(), dst));
        }
        let a = self.as_slice();
        let b = rhs.as_slice();
        let work = m.saturating_mul(n).saturating_mul(k);
        if config.use_parallel(work) {
            let band = config.band_rows(m);
            debug!(
                "dot {}x{} * {}x{}: parallel, {} rows per band",
                m, k, k, n, band
            );
            dst.par_chunks_mut(band * n)
                .enumerate()
                .for_each(|(i, chunk)| dot_rows(a, b, k, n, i * band, chunk));
        } else {
            trace!("dot {}x{} * {}x{}: serial", m, k, k, n);
            dot_rows(a, b, k, n, 0, &mut dst);
        }
        Ok(Matrix::from_parts_unchecked(self.rows(), rhs.cols(), dst))
    }
}

/// Fills `dst` (whole output rows starting at `row0`) with `a * b`.
fn dot_rows<T: Element>(a: &[T], b: &[T], k: usize, n: usize, row0: usize, dst: &mut [T]) {
    for (dy, out) in dst.chunks_exact_mut(n).enumerate() {
        let lhs = &a[(row0 + dy) * k..(row0 + dy + 1) * k];
        for (x, cell) in out.iter_mut().enumerate() {
            let mut sum = T::zero();
            for (z, &l) in lhs.iter().enumerate() {
                sum = sum + l * b[z * n + x];
            }
            *cell = sum;
        }
    }
}

macro_rules! impl_binary_op {
    ($trt:ident, $mth:ident, $op:ident) => {
        impl<T: Element> std::ops::$trt<&Matrix<T>> for &Matrix<T> {
            type Output = MatResult<Matrix<T>>;
            fn $mth(self, rhs: &Matrix<T>) -> Self::Output {
                binary_map::<$op, T>(self, rhs)
            }
        }

        impl<T: Element> std::ops::$trt<Matrix<T>> for &Matrix<T> {
            type Output = MatResult<Matrix<T>>;
            fn $mth(self, rhs: Matrix<T>) -> Self::Output {
                binary_map::<$op, T>(self, &rhs)
            }
        }

        impl<T: Element> std::ops::$trt<&Matrix<T>> for Matrix<T> {
            type Output = MatResult<Matrix<T>>;
            fn $mth(self, rhs: &Matrix<T>) -> Self::Output {
                binary_map::<$op, T>(&self, rhs)
            }
        }

        impl<T: Element> std::ops::$trt<Matrix<T>> for Matrix<T> {
            type Output = MatResult<Matrix<T>>;
            fn $mth(self, rhs: Matrix<T>) -> Self::Output {
                binary_map::<$op, T>(&self, &rhs)
            }
        }
    };
}

macro_rules! impl_scalar_op {
    ($trt:ident, $mth:ident, $op:ident) => {
        impl<T: Element> std::ops::$trt<T> for &Matrix<T> {
            type Output = Matrix<T>;
            fn $mth(self, rhs: T) -> Self::Output {
                scalar_rhs::<$op, T>(self, rhs)
            }
        }

        impl<T: Element> std::ops::$trt<T> for Matrix<T> {
            type Output = Matrix<T>;
            fn $mth(mut self, rhs: T) -> Self::Output {
                self.as_slice_mut()
                    .iter_mut()
                    .for_each(|x| *x = $op::f(*x, rhs));
                self
            }
        }
    };
}

// Scalar on the left needs one impl per concrete kind.
macro_rules! impl_scalar_lhs_op {
    ($($e:ty),*) => {
        $(impl std::ops::Add<&Matrix<$e>> for $e {
            type Output = Matrix<$e>;
            fn add(self, rhs: &Matrix<$e>) -> Self::Output {
                scalar_lhs::<Add, $e>(self, rhs)
            }
        }

        impl std::ops::Sub<&Matrix<$e>> for $e {
            type Output = Matrix<$e>;
            fn sub(self, rhs: &Matrix<$e>) -> Self::Output {
                scalar_lhs::<Sub, $e>(self, rhs)
            }
        }

        impl std::ops::Mul<&Matrix<$e>> for $e {
            type Output = Matrix<$e>;
            fn mul(self, rhs: &Matrix<$e>) -> Self::Output {
                scalar_lhs::<Mul, $e>(self, rhs)
            }
        }

        impl std::ops::Div<&Matrix<$e>> for $e {
            type Output = Matrix<$e>;
            fn div(self, rhs: &Matrix<$e>) -> Self::Output {
                scalar_lhs::<Div, $e>(self, rhs)
            }
        }

        impl std::ops::Add<Matrix<$e>> for $e {
            type Output = Matrix<$e>;
            fn add(self, rhs: Matrix<$e>) -> Self::Output {
                scalar_lhs::<Add, $e>(self, &rhs)
            }
        }

        impl std::ops::Sub<Matrix<$e>> for $e {
            type Output = Matrix<$e>;
            fn sub(self, rhs: Matrix<$e>) -> Self::Output {
                scalar_lhs::<Sub, $e>(self, &rhs)
            }
        }

        impl std::ops::Mul<Matrix<$e>> for $e {
            type Output = Matrix<$e>;
            fn mul(self, rhs: Matrix<$e>) -> Self::Output {
                scalar_lhs::<Mul, $e>(self, &rhs)
            }
        }

        impl std::ops::Div<Matrix<$e>> for $e {
            type Output = Matrix<$e>;
            fn div(self, rhs: Matrix<$e>) -> Self::Output {
                scalar_lhs::<Div, $e>(self, &rhs)
            }
        })*
    };
}

impl_binary_op!(Add, add, Add); // +
impl_binary_op!(Sub, sub, Sub); // -
impl_binary_op!(Mul, mul, Mul); // *
impl_binary_op!(Div, div, Div); // /

impl_scalar_op!(Add, add, Add);
impl_scalar_op!(Sub, sub, Sub);
impl_scalar_op!(Mul, mul, Mul);
impl_scalar_op!(Div, div, Div);

impl_scalar_lhs_op!(f32, f64, Complex32, Complex64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mat;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_add() {
        let m1 = mat![[1.0, 2.0], [3.0, 4.0]];
        let m2 = mat![[10.0, 20.0], [30.0, 40.0]];
        let m3 = (&m1 + &m2).unwrap();
        assert_eq!(m3, mat![[11.0, 22.0], [33.0, 44.0]]);
        assert_eq!(m1.try_add(&m2).unwrap(), m3);
        assert_eq!((m1.clone() + m2.clone()).unwrap(), m3);
        assert_eq!(m1, mat![[1.0, 2.0], [3.0, 4.0]]);
    }

    #[test]
    fn test_sub_mul_div() {
        let m1 = mat![[6.0f32, 8.0], [9.0, 12.0]];
        let m2 = mat![[2.0f32, 4.0], [3.0, 6.0]];
        assert_eq!((&m1 - &m2).unwrap(), mat![[4.0, 4.0], [6.0, 6.0]]);
        assert_eq!((&m1 * &m2).unwrap(), mat![[12.0, 32.0], [27.0, 72.0]]);
        assert_eq!((&m1 / &m2).unwrap(), mat![[3.0, 2.0], [3.0, 2.0]]);
    }

    #[test]
    fn test_shape_mismatch() {
        let m1 = Matrix::<f64>::zeros(2, 2);
        let m2 = Matrix::<f64>::zeros(2, 3);
        let err = (&m1 + &m2).unwrap_err();
        assert!(matches!(
            err,
            MatError::ShapeMismatch {
                op: "add",
                lhs: (2, 2),
                rhs: (2, 3)
            }
        ));
        assert!(m1.try_div(&m2).is_err());
        // same element count, different shape
        let m3 = Matrix::<f64>::zeros(4, 1);
        assert!(m1.try_mul(&m3).is_err());
    }

    #[test]
    fn test_scalar_ops() {
        let m = mat![[1.0, 2.0], [4.0, 8.0]];
        assert_eq!(&m + 1.0, mat![[2.0, 3.0], [5.0, 9.0]]);
        assert_eq!(1.0 + &m, mat![[2.0, 3.0], [5.0, 9.0]]);
        assert_eq!(&m - 1.0, mat![[0.0, 1.0], [3.0, 7.0]]);
        assert_eq!(1.0 - &m, mat![[0.0, -1.0], [-3.0, -7.0]]);
        assert_eq!(&m * 2.0, 2.0 * &m);
        assert_eq!(&m / 2.0, mat![[0.5, 1.0], [2.0, 4.0]]);
        assert_eq!(8.0 / &m, mat![[8.0, 4.0], [2.0, 1.0]]);
        assert_eq!(m.scalar_sub(1.0), 1.0 - m.clone());
        assert_eq!(m.scalar_div(8.0), 8.0 / m.clone());
        assert_eq!(m.clone() * 3.0, m.mul_scalar(3.0));
    }

    #[test]
    fn test_scalar_div_by_zero_is_ieee() {
        let m = mat![[1.0f64, 0.0]];
        let q = &m / 0.0;
        assert!(q[(0, 0)].is_infinite());
        assert!(q[(0, 1)].is_nan());
        let q = 0.0 / &m;
        assert_eq!(q[(0, 0)], 0.0);
        assert!(q[(0, 1)].is_nan());
    }

    #[test]
    fn test_complex_ops() {
        let a = Matrix::from_flat(&[Complex64::new(2.0, 3.0)], 1).unwrap();
        let b = Matrix::from_flat(&[Complex64::new(1.0, -1.0)], 1).unwrap();
        assert_eq!((&a * &b).unwrap()[(0, 0)], Complex64::new(5.0, 1.0));
        assert_eq!((&a / &b).unwrap()[(0, 0)], Complex64::new(-0.5, 2.5));
        let s = Complex64::new(1.0, -1.0);
        assert_eq!((s / &a)[(0, 0)], s / Complex64::new(2.0, 3.0));
        assert_eq!((&a - s)[(0, 0)], Complex64::new(1.0, 4.0));
        assert_eq!((s - &a)[(0, 0)], Complex64::new(-1.0, -4.0));
    }

    #[test]
    fn test_complex32_scalar_lhs() {
        let m = Matrix::from_flat(&[Complex32::new(2.0, 3.0), Complex32::new(1.0, -1.0)], 2)
            .unwrap();
        let s = Complex32::new(4.0, 1.0);
        assert_eq!(s - &m, mat![[Complex32::new(2.0, -2.0), Complex32::new(3.0, 2.0)]]);
        let q = s / &m;
        assert_eq!(q[(0, 1)], s / Complex32::new(1.0, -1.0));
        assert_eq!(s * m.clone(), &m * s);
        assert_eq!(s + m.clone(), m.add_scalar(s));
    }

    #[test]
    fn test_dot() {
        let a = mat![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let b = mat![[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]];
        let c = a.dot(&b).unwrap();
        assert_eq!(c, mat![[58.0, 64.0], [139.0, 154.0]]);
    }

    #[test]
    fn test_dot_dimension_mismatch() {
        let a = Matrix::<f64>::zeros(2, 3);
        let b = Matrix::<f64>::zeros(4, 5);
        assert!(matches!(
            a.dot(&b),
            Err(MatError::DimensionMismatch {
                lhs: (2, 3),
                rhs: (4, 5)
            })
        ));
    }

    #[test]
    fn test_dot_empty_operands() {
        let a = Matrix::<f64>::zeros(2, 0);
        let b = Matrix::<f64>::zeros(0, 3);
        assert_eq!(a.dot(&b).unwrap(), Matrix::zeros(2, 3));
        let a = Matrix::<f64>::zeros(0, 2);
        let b = Matrix::<f64>::zeros(2, 3);
        assert_eq!(a.dot(&b).unwrap().shape(), (0, 3));
    }

    #[test]
    fn test_dot_complex() {
        let i = Complex32::new(0.0, 1.0);
        let a = Matrix::from_flat(&[i, Complex32::new(1.0, 0.0)], 2).unwrap();
        let b = Matrix::from_flat(&[i, i], 1).unwrap();
        let c = a.dot(&b).unwrap();
        assert_eq!(c.shape(), (1, 1));
        assert_eq!(c[(0, 0)], Complex32::new(-1.0, 1.0));
    }

    #[test]
    fn test_dot_parallel_matches_serial() {
        let a = Matrix::from_flat(
            &(0..35 * 17).map(|i| (i as f64).sin()).collect::<Vec<_>>(),
            17,
        )
        .unwrap();
        let b = Matrix::from_flat(
            &(0..17 * 9).map(|i| (i as f64 * 0.37).cos()).collect::<Vec<_>>(),
            9,
        )
        .unwrap();
        let serial = KernelConfig {
            parallel_threshold: usize::MAX,
            num_threads: 1,
        };
        let parallel = KernelConfig {
            parallel_threshold: 0,
            num_threads: 4,
        };
        let s = a.dot_with(&b, &serial).unwrap();
        let p = a.dot_with(&b, &parallel).unwrap();
        assert_eq!(s, p);
    }

    #[test]
    fn test_dot_identity_with_tolerance() {
        let a = mat![[0.1f32, 0.2, 0.3], [0.4, 0.5, 0.6]];
        let mut eye = Matrix::<f32>::zeros(3, 3);
        eye.identity();
        let c = a.dot(&eye).unwrap();
        for (x, y) in c.iter().zip(a.iter()) {
            assert_relative_eq!(*x, *y);
        }
    }

    fn arb_matrix() -> impl Strategy<Value = Matrix<f64>> {
        (1u32..6, 1u32..6).prop_flat_map(|(r, c)| {
            prop::collection::vec(-1e3f64..1e3, (r * c) as usize)
                .prop_map(move |v| Matrix::from_vec(r, c, v).unwrap())
        })
    }

    proptest! {
        #[test]
        fn prop_dot_identity(m in arb_matrix()) {
            let mut eye = Matrix::<f64>::zeros(m.cols(), m.cols());
            eye.identity();
            let c = m.dot(&eye).unwrap();
            prop_assert_eq!(c.shape(), m.shape());
            for (x, y) in c.iter().zip(m.iter()) {
                prop_assert!((x - y).abs() <= 1e-12 * y.abs().max(1.0));
            }
        }

        #[test]
        fn prop_sub_self_is_zero(m in arb_matrix()) {
            let z = (&m - &m).unwrap();
            prop_assert!(z.iter().all(|&x| x == 0.0));
        }
    }
}
