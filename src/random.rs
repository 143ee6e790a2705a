use crate::element::Element;
use crate::matrix::Matrix;
use rand::{Rng, RngCore};

/// A source of uniformly distributed `f64` values in `[0, 1)`.
pub trait UniformSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore> UniformSource for R {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Adapts a closure returning values in `[0, 1)`.
pub struct FnSource<F>(pub F);

impl<F: FnMut() -> f64> UniformSource for FnSource<F> {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        (self.0)()
    }
}

#[inline]
fn scale(u: f64, (min, max): (f64, f64)) -> f64 {
    u * (max - min) + min
}

impl<T: Element> Matrix<T> {
    /// Fills every element with values drawn from `[min, max)`.
    ///
    /// Complex kinds draw both parts from the same range.
    pub fn fill_random<S>(&mut self, src: &mut S, min: f64, max: f64)
    where
        S: UniformSource + ?Sized,
    {
        self.fill_random_parts(src, (min, max), (min, max))
    }

    /// Fills every element in row-major order. Complex kinds draw the real
    /// part from `re` and then the imaginary part from `im`.
    pub fn fill_random_parts<S>(&mut self, src: &mut S, re: (f64, f64), im: (f64, f64))
    where
        S: UniformSource + ?Sized,
    {
        let complex = T::KIND.is_complex();
        for x in self.as_slice_mut() {
            let r = scale(src.next_unit(), re);
            let i = if complex {
                scale(src.next_unit(), im)
            } else {
                0.0
            };
            *x = T::from_parts(r, i);
        }
    }
}
