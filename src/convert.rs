use crate::element::{Complex32, Complex64, Element};
use crate::matrix::Matrix;

/// An explicit, per-element cast between precisions of the same kind.
pub trait PrecisionCast<U: Element>: Element {
    fn cast(self) -> U;
}

impl PrecisionCast<f64> for f32 {
    #[inline]
    fn cast(self) -> f64 {
        self as f64
    }
}

impl PrecisionCast<f32> for f64 {
    #[inline]
    fn cast(self) -> f32 {
        self as f32
    }
}

impl PrecisionCast<Complex64> for Complex32 {
    #[inline]
    fn cast(self) -> Complex64 {
        Complex64::new(self.re as f64, self.im as f64)
    }
}

impl PrecisionCast<Complex32> for Complex64 {
    #[inline]
    fn cast(self) -> Complex32 {
        Complex32::new(self.re as f32, self.im as f32)
    }
}

impl<T: Element> Matrix<T> {
    /// Same-shape matrix with every element cast to `U`.
    pub fn cast<U: Element>(&self) -> Matrix<U>
    where
        T: PrecisionCast<U>,
    {
        self.map_into(<T as PrecisionCast<U>>::cast)
    }
}

impl Matrix<f32> {
    pub fn to_real64(&self) -> Matrix<f64> {
        self.cast()
    }
}

impl Matrix<f64> {
    /// Narrows to single precision; values round to the nearest `f32`.
    pub fn to_real32(&self) -> Matrix<f32> {
        self.cast()
    }
}

impl Matrix<Complex32> {
    pub fn to_complex64(&self) -> Matrix<Complex64> {
        self.cast()
    }
}

impl Matrix<Complex64> {
    pub fn to_complex32(&self) -> Matrix<Complex32> {
        self.cast()
    }
}
