//! Binary matrix records.
//!
//! # File Layout
//!
//! * a 6-byte ASCII precision tag, `double` or `single`, no terminator;
//! * `rows` as `i32` in little-endian;
//! * `cols` as `i32` in little-endian;
//! * `rows * cols` row-major IEEE-754 elements in little-endian, 8 bytes each
//!   for `double` and 4 bytes each for `single`.
//!
//! Only the two real kinds have a record format.

use crate::element::RealElement;
use crate::error::{FormatErrorKind, MatError, MatResult};
use crate::matrix::Matrix;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::trace;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

pub const TAG_LEN: usize = 6;
pub const HEADER_LEN: usize = TAG_LEN + 8;

/// Real element kinds that have a persisted record format.
pub trait Precision: RealElement {
    const TAG: &'static str;
    fn write_elem<W: Write>(self, w: &mut W) -> io::Result<()>;
    fn read_elem<R: Read>(r: &mut R) -> io::Result<Self>;
}

impl Precision for f64 {
    const TAG: &'static str = "double";

    fn write_elem<W: Write>(self, w: &mut W) -> io::Result<()> {
        w.write_f64::<LittleEndian>(self)
    }

    fn read_elem<R: Read>(r: &mut R) -> io::Result<Self> {
        r.read_f64::<LittleEndian>()
    }
}

impl Precision for f32 {
    const TAG: &'static str = "single";

    fn write_elem<W: Write>(self, w: &mut W) -> io::Result<()> {
        w.write_f32::<LittleEndian>(self)
    }

    fn read_elem<R: Read>(r: &mut R) -> io::Result<Self> {
        r.read_f32::<LittleEndian>()
    }
}

fn truncated(what: &'static str) -> impl FnOnce(io::Error) -> MatError {
    move |e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            FormatErrorKind::Truncated(what).into()
        } else {
            MatError::UnexpectIO(format!("read matrix {}", what), e)
        }
    }
}

fn header_dim(v: u32) -> MatResult<i32> {
    i32::try_from(v).map_err(|_| FormatErrorKind::DimensionTooLarge(v).into())
}

fn read_dim<R: Read>(r: &mut R) -> MatResult<u32> {
    let v = r.read_i32::<LittleEndian>().map_err(truncated("header"))?;
    u32::try_from(v).map_err(|_| FormatErrorKind::NegativeDimension(v).into())
}

impl<T: Precision> Matrix<T> {
    /// Serializes the matrix as one record.
    pub fn write_to<W: Write>(&self, w: &mut W) -> MatResult<()> {
        let rows = header_dim(self.rows())?;
        let cols = header_dim(self.cols())?;
        w.write_all(T::TAG.as_bytes())?;
        w.write_i32::<LittleEndian>(rows)?;
        w.write_i32::<LittleEndian>(cols)?;
        for &x in self.iter() {
            x.write_elem(w)?;
        }
        trace!("wrote {} record {}x{}", T::TAG, rows, cols);
        Ok(())
    }

    /// Reads one record whose tag must be `T::TAG`.
    pub fn read_from<R: Read>(r: &mut R) -> MatResult<Matrix<T>> {
        let mut tag = [0u8; TAG_LEN];
        r.read_exact(&mut tag).map_err(truncated("header"))?;
        if tag != T::TAG.as_bytes() {
            return Err(FormatErrorKind::PrecisionMismatch {
                expected: T::TAG,
                found: String::from_utf8_lossy(&tag).into_owned(),
            }
            .into());
        }
        let rows = read_dim(r)?;
        let cols = read_dim(r)?;
        let total = rows as usize * cols as usize;
        trace!("reading {} record {}x{}", T::TAG, rows, cols);

        // the header is untrusted, so grow with the data instead of reserving `total`
        let mut data = Vec::with_capacity(total.min(1 << 16));
        for _ in 0..total {
            data.push(T::read_elem(r).map_err(truncated("payload"))?);
        }
        Matrix::from_vec(rows, cols, data)
    }

    /// Writes the record to a new file at `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> MatResult<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| MatError::UnexpectIO(format!("create {}", path.display()), e))?;
        let mut w = BufWriter::new(file);
        self.write_to(&mut w)?;
        w.flush()
            .map_err(|e| MatError::UnexpectIO(format!("flush {}", path.display()), e))?;
        Ok(())
    }

    /// Reads the record stored at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> MatResult<Matrix<T>> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| MatError::UnexpectIO(format!("open {}", path.display()), e))?;
        Self::read_from(&mut BufReader::new(file))
    }
}
