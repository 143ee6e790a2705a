use num_complex::Complex;
use num_traits::{Float, One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

pub use num_complex::{Complex32, Complex64};

/// The closed set of element kinds a matrix can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Real32,
    Real64,
    Complex32,
    Complex64,
}

impl ElementKind {
    /// Width in bytes of one underlying real scalar.
    pub fn scalar_size(&self) -> usize {
        match self {
            ElementKind::Real32 | ElementKind::Complex32 => 4,
            ElementKind::Real64 | ElementKind::Complex64 => 8,
        }
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, ElementKind::Complex32 | ElementKind::Complex64)
    }

    /// Width in bytes of one element; complex kinds count two scalars.
    pub fn size_of(&self) -> usize {
        if self.is_complex() {
            2 * self.scalar_size()
        } else {
            self.scalar_size()
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ElementKind::Real32 => "real32",
            ElementKind::Real64 => "real64",
            ElementKind::Complex32 => "complex32",
            ElementKind::Complex64 => "complex64",
        };
        f.write_str(s)
    }
}

/// A value storable in a [`Matrix`](crate::Matrix).
///
/// Arithmetic comes from the std operator traits, so real kinds use IEEE
/// float arithmetic and complex kinds use `num_complex`'s componentwise
/// add/sub and the textbook mul/div (division by the squared modulus).
pub trait Element:
    Copy
    + Send
    + Sync
    + fmt::Debug
    + PartialEq
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + 'static
{
    const KIND: ElementKind;

    /// Builds an element from its parts. Real kinds ignore `im`.
    fn from_parts(re: f64, im: f64) -> Self;
}

/// Element kinds with a total order over finite values.
pub trait RealElement: Element + Float {}

macro_rules! impl_real_element {
    ($($e:ident => $kind:ident),*) => {
        $(impl Element for $e {
            const KIND: ElementKind = ElementKind::$kind;

            #[inline]
            fn from_parts(re: f64, _im: f64) -> Self {
                re as $e
            }
        }

        impl RealElement for $e {})*
    };
}

macro_rules! impl_complex_element {
    ($($s:ident => $kind:ident),*) => {
        $(impl Element for Complex<$s> {
            const KIND: ElementKind = ElementKind::$kind;

            #[inline]
            fn from_parts(re: f64, im: f64) -> Self {
                Complex::new(re as $s, im as $s)
            }
        })*
    };
}

impl_real_element!(f32 => Real32, f64 => Real64);
impl_complex_element!(f32 => Complex32, f64 => Complex64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_sizes() {
        assert_eq!(f32::KIND.size_of(), 4);
        assert_eq!(f64::KIND.size_of(), 8);
        assert_eq!(Complex32::KIND.size_of(), 8);
        assert_eq!(Complex64::KIND.size_of(), 16);
        assert!(Complex64::KIND.is_complex());
        assert!(!f64::KIND.is_complex());
        assert_eq!(Complex32::KIND.to_string(), "complex32");
    }

    #[test]
    fn test_complex_arith() {
        let a = Complex64::new(2.0, 3.0);
        let b = Complex64::new(1.0, -1.0);
        assert_eq!(a * b, Complex64::new(5.0, 1.0));
        assert_eq!(a / b, Complex64::new(-0.5, 2.5));
        assert_eq!(a + b, Complex64::new(3.0, 2.0));
        assert_eq!(a - b, Complex64::new(1.0, 4.0));

        let a = Complex32::new(2.0, 3.0);
        let b = Complex32::new(1.0, -1.0);
        assert_eq!(a / b, Complex32::new(-0.5, 2.5));
    }

    #[test]
    fn test_zero_divisor_is_ieee() {
        let q = Complex64::new(2.0, 3.0) / Complex64::zero();
        assert!(q.re.is_nan() || q.re.is_infinite());
        assert!((1.0f32 / 0.0).is_infinite());
    }

    #[test]
    fn test_from_parts() {
        assert_eq!(f32::from_parts(1.5, 9.0), 1.5f32);
        assert_eq!(Complex64::from_parts(1.5, -2.0), Complex64::new(1.5, -2.0));
    }
}
