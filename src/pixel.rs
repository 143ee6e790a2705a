//! Conversion between real matrices and 8-bit grayscale pixel buffers.
//!
//! Buffers are row-major with `stride` bytes per row; the `stride - width`
//! padding bytes at the end of each row never reach the matrix. Decoding and
//! encoding the image file itself is left to the caller.

use crate::element::RealElement;
use crate::error::{MatError, MatResult};
use crate::matrix::Matrix;
use num_traits::NumCast;

/// A borrowed, validated 8-bit grayscale buffer.
#[derive(Debug, Clone, Copy)]
pub struct GrayView<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    stride: usize,
}

impl<'a> GrayView<'a> {
    pub fn new(data: &'a [u8], width: u32, height: u32, stride: usize) -> MatResult<Self> {
        if stride < width as usize {
            return Err(MatError::InvalidBuffer("stride is smaller than width"));
        }
        if data.len() < required_len(width, height, stride) {
            return Err(MatError::InvalidBuffer("buffer is shorter than height rows"));
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The `width` visible samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: usize) -> &'a [u8] {
        assert!(y < self.height as usize, "row {} out of range", y);
        if self.width == 0 {
            return &[];
        }
        let start = y * self.stride;
        &self.data[start..start + self.width as usize]
    }
}

/// An owned 8-bit grayscale buffer produced from a matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    pub width: u32,
    pub height: u32,
    pub stride: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    pub fn view(&self) -> GrayView<'_> {
        GrayView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.stride,
        }
    }
}

// The last row does not need its padding.
fn required_len(width: u32, height: u32, stride: usize) -> usize {
    if height == 0 || width == 0 {
        0
    } else {
        (height as usize - 1) * stride + width as usize
    }
}

fn to_byte<T: RealElement>(v: T) -> u8 {
    if v.is_nan() {
        return 0;
    }
    let r = v.round();
    if r <= T::zero() {
        0
    } else {
        r.to_u8().unwrap_or(u8::MAX)
    }
}

impl<T: RealElement> Matrix<T> {
    fn from_gray_with<F>(view: &GrayView<'_>, f: F) -> Matrix<T>
    where
        F: Fn(u8) -> T,
    {
        let mut data = Vec::with_capacity(view.width as usize * view.height as usize);
        if view.width > 0 {
            for y in 0..view.height as usize {
                data.extend(view.row(y).iter().map(|&b| f(b)));
            }
        }
        Matrix::from_parts_unchecked(view.height, view.width, data)
    }

    /// One cell per pixel with the raw intensity, `0..=255`.
    pub fn from_gray8(view: &GrayView<'_>) -> Matrix<T> {
        Self::from_gray_with(view, |b| <T as NumCast>::from(b).unwrap_or_else(T::zero))
    }

    /// One cell per pixel with the intensity scaled to `0..=1`.
    pub fn from_gray8_normalized(view: &GrayView<'_>) -> Matrix<T> {
        let scale: T = <T as NumCast>::from(255u8).unwrap_or_else(T::one);
        Self::from_gray_with(view, |b| <T as NumCast>::from(b).unwrap_or_else(T::zero) / scale)
    }

    fn to_gray_with<F>(&self, stride: usize, f: F) -> MatResult<GrayImage>
    where
        F: Fn(T) -> u8,
    {
        let width = self.cols();
        if stride < width as usize {
            return Err(MatError::InvalidBuffer("stride is smaller than width"));
        }
        let mut data = vec![0u8; stride * self.rows() as usize];
        if width > 0 {
            for (y, out) in data.chunks_exact_mut(stride).enumerate() {
                for (dst, &v) in out.iter_mut().zip(self.row(y)) {
                    *dst = f(v);
                }
            }
        }
        Ok(GrayImage {
            width,
            height: self.rows(),
            stride,
            data,
        })
    }

    /// Inverse of [`from_gray8`](Self::from_gray8). Cells are rounded and
    /// clamped to `0..=255`; `NaN` becomes `0`; padding bytes are zero.
    pub fn to_gray8(&self, stride: usize) -> MatResult<GrayImage> {
        self.to_gray_with(stride, to_byte)
    }

    /// Inverse of [`from_gray8_normalized`](Self::from_gray8_normalized).
    pub fn to_gray8_normalized(&self, stride: usize) -> MatResult<GrayImage> {
        let scale: T = <T as NumCast>::from(255u8).unwrap_or_else(T::one);
        self.to_gray_with(stride, |v| to_byte(v * scale))
    }
}
