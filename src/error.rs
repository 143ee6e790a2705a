use std::io;
use std::io::Error as IOError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShapeErrorKind {
    #[error("row {row} has {got} elements, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("buffer of {got} elements cannot fill a {rows}x{cols} matrix")]
    LengthMismatch { rows: u32, cols: u32, got: usize },
    #[error("row of {got} elements does not fit in {cols} columns")]
    RowTooLong { cols: u32, got: usize },
    #[error("dimension {0} does not fit in u32")]
    Overflow(usize),
}

#[derive(Error, Debug)]
pub enum FormatErrorKind {
    #[error("expected precision tag {expected:?}, found {found:?}")]
    PrecisionMismatch {
        expected: &'static str,
        found: String,
    },
    #[error("stream ended before the {0} was complete")]
    Truncated(&'static str),
    #[error("negative dimension {0} in header")]
    NegativeDimension(i32),
    #[error("dimension {0} does not fit the int32 header field")]
    DimensionTooLarge(u32),
    #[error("invalid number {value:?} at row {row}, column {col}")]
    InvalidNumber { row: usize, col: usize, value: String },
}

pub type MatResult<T> = Result<T, MatError>;

#[derive(Error, Debug)]
pub enum MatError {
    #[error("shape error:{0}")]
    ShapeError(ShapeErrorKind),
    #[error("{op}: shape {lhs:?} does not match {rhs:?}")]
    ShapeMismatch {
        op: &'static str,
        lhs: (u32, u32),
        rhs: (u32, u32),
    },
    #[error("dot: inner dimensions differ, {lhs:?} x {rhs:?}")]
    DimensionMismatch { lhs: (u32, u32), rhs: (u32, u32) },
    #[error("format error:{0}")]
    FormatError(FormatErrorKind),
    #[error("index {index} out of bounds for {bound}")]
    IndexOutOfBounds { index: usize, bound: usize },
    #[error("invalid pixel buffer: {0}")]
    InvalidBuffer(&'static str),
    #[error("Unexpected io: {0}, {1}")]
    UnexpectIO(String, io::Error),
    #[error("Unexpected: {0}")]
    Unexpected(String),
}

impl From<ShapeErrorKind> for MatError {
    fn from(e: ShapeErrorKind) -> Self {
        MatError::ShapeError(e)
    }
}

impl From<FormatErrorKind> for MatError {
    fn from(e: FormatErrorKind) -> Self {
        MatError::FormatError(e)
    }
}

impl From<&str> for MatError {
    fn from(e: &str) -> Self {
        MatError::Unexpected(e.to_string())
    }
}

impl From<(&str, io::Error)> for MatError {
    fn from(e: (&str, io::Error)) -> Self {
        MatError::UnexpectIO(e.0.to_string(), e.1)
    }
}

impl From<IOError> for MatError {
    fn from(e: IOError) -> Self {
        MatError::UnexpectIO("io".to_string(), e)
    }
}

impl From<MatError> for String {
    fn from(e: MatError) -> Self {
        format!("{}", e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e: MatError = ShapeErrorKind::RaggedRows {
            row: 1,
            expected: 2,
            got: 3,
        }
        .into();
        assert_eq!(
            e.to_string(),
            "shape error:row 1 has 3 elements, expected 2"
        );

        let e = MatError::DimensionMismatch {
            lhs: (2, 3),
            rhs: (4, 5),
        };
        assert_eq!(e.to_string(), "dot: inner dimensions differ, (2, 3) x (4, 5)");
    }

    #[test]
    fn test_io_context() {
        let io = IOError::new(io::ErrorKind::NotFound, "missing");
        let e: MatError = ("open a.mat", io).into();
        assert!(matches!(e, MatError::UnexpectIO(ref ctx, _) if ctx == "open a.mat"));
        let s: String = e.into();
        assert!(s.starts_with("Unexpected io: open a.mat"));
    }
}
