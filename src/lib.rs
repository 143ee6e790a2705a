//! Dense row-major matrices over `f32`, `f64`, `Complex32` and `Complex64`.
//!
//! ```
//! use densemat::{mat, Matrix};
//!
//! let a = mat![[1.0, 2.0], [3.0, 4.0]];
//! let b = Matrix::from_flat(&[5.0, 6.0, 7.0, 8.0], 2).unwrap();
//! let c = a.dot(&b).unwrap();
//! assert_eq!(c, mat![[19.0, 22.0], [43.0, 50.0]]);
//! ```

mod codec;
mod config;
mod convert;
mod element;
mod error;
mod matrix;
mod method;
mod op;
mod pixel;
mod random;
mod shape;
mod text;

pub use codec::{Precision, HEADER_LEN, TAG_LEN};
pub use config::{KernelConfig, DEFAULT_PAR_THRESHOLD};
pub use convert::PrecisionCast;
pub use element::{Complex32, Complex64, Element, ElementKind, RealElement};
pub use error::{FormatErrorKind, MatError, MatResult, ShapeErrorKind};
pub use matrix::Matrix;
pub use pixel::{GrayImage, GrayView};
pub use random::{FnSource, UniformSource};

/// Builds a [`Matrix`] from row literals.
///
/// ```
/// let m = densemat::mat![[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]];
/// assert_eq!(m.shape(), (2, 3));
/// ```
#[macro_export]
macro_rules! mat {
    ($([$($x:expr),* $(,)*]),+ $(,)*) => {{
        $crate::Matrix::from(vec![$([$($x,)*],)*])
    }};
}
