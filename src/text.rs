//! Comma-separated text: one matrix row per line, no header, no quoting,
//! `.` as the decimal point.

use crate::element::RealElement;
use crate::error::{FormatErrorKind, MatError, MatResult};
use crate::matrix::Matrix;
use csv::{ReaderBuilder, WriterBuilder};
use num_traits::NumCast;
use std::fmt::Display;
use std::io::{Read, Write};
use std::str::FromStr;

fn csv_error(ctx: &str, e: csv::Error) -> MatError {
    if e.is_io_error() {
        match e.into_kind() {
            csv::ErrorKind::Io(io) => MatError::UnexpectIO(ctx.to_string(), io),
            other => MatError::Unexpected(format!("{}: {:?}", ctx, other)),
        }
    } else {
        MatError::Unexpected(format!("{}: {}", ctx, e))
    }
}

impl<T: RealElement + FromStr> Matrix<T> {
    /// Parses rows of comma-separated numbers. Every line must have the same
    /// number of fields.
    pub fn read_csv<R: Read>(r: R) -> MatResult<Matrix<T>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(r);
        let mut rows: Vec<Vec<T>> = Vec::new();
        for (y, record) in reader.records().enumerate() {
            let record = record.map_err(|e| csv_error("read csv", e))?;
            let row = record
                .iter()
                .enumerate()
                .map(|(x, field)| {
                    field.parse::<T>().map_err(|_| {
                        MatError::from(FormatErrorKind::InvalidNumber {
                            row: y,
                            col: x,
                            value: field.to_string(),
                        })
                    })
                })
                .collect::<MatResult<Vec<T>>>()?;
            rows.push(row);
        }
        Matrix::from_rows(rows.as_slice())
    }
}

impl<T: RealElement + Display> Matrix<T> {
    /// Writes one line per row using the shortest round-tripping decimal form.
    pub fn write_csv<W: Write>(&self, w: W) -> MatResult<()> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(w);
        for y in 0..self.rows() as usize {
            writer
                .write_record(self.row(y).iter().map(|v| v.to_string()))
                .map_err(|e| csv_error("write csv", e))?;
        }
        writer
            .flush()
            .map_err(|e| MatError::UnexpectIO("flush csv".to_string(), e))?;
        Ok(())
    }

    /// Like [`write_csv`](Self::write_csv) but converts through `f64`, so
    /// `f32` cells print with their widened value.
    pub fn write_csv_f64<W: Write>(&self, w: W) -> MatResult<()> {
        let wide = self.map_into(|v: T| <f64 as NumCast>::from(v).unwrap_or(f64::NAN));
        wide.write_csv(w)
    }
}
