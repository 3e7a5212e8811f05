use std::path::Path;

use nalgebra as na;
use num_traits::ToPrimitive;
use serde_derive::{Deserialize, Serialize};

use crate::error::Error;

const MIN_COLUMNS: usize = 5;

/// One observation line: `frame_id object_id raw_type x y [ignored...]`
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub frame_id: i64,
    pub object_id: i64,
    pub raw_type: i32,
    pub x: f64,
    pub y: f64,
}

impl Record {
    #[inline(always)]
    pub fn position(&self) -> na::Point2<f64> {
        na::Point2::new(self.x, self.y)
    }
}

pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, Error> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|err| Error::io(path, err))?;

    parse_records(path, &contents)
}

/// Blank lines are skipped, anything else must hold at least five numeric columns.
pub fn parse_records(path: &Path, contents: &str) -> Result<Vec<Record>, Error> {
    let mut records = Vec::new();

    for (idx, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        records.push(parse_line(path, idx + 1, line)?);
    }

    Ok(records)
}

fn parse_line(path: &Path, line_no: usize, line: &str) -> Result<Record, Error> {
    let parse_err = |column: usize, value: &str| Error::Parse {
        path: path.to_path_buf(),
        line: line_no,
        column,
        value: value.to_string(),
    };

    let mut values = [0.0f64; MIN_COLUMNS];
    let mut fields = line.split_whitespace();

    for (column, slot) in values.iter_mut().enumerate() {
        let field = fields.next().ok_or_else(|| parse_err(column, line))?;
        *slot = field.parse().map_err(|_| parse_err(column, field))?;
    }

    // ids may be written as reals ("12.0"), but must be integral
    let integral = |column: usize| -> Result<i64, Error> {
        let value = values[column];
        if value.fract() != 0.0 {
            return Err(parse_err(column, &value.to_string()));
        }

        value
            .to_i64()
            .ok_or_else(|| parse_err(column, &value.to_string()))
    };

    let raw_type = integral(2)?
        .to_i32()
        .ok_or_else(|| parse_err(2, &values[2].to_string()))?;

    Ok(Record {
        frame_id: integral(0)?,
        object_id: integral(1)?,
        raw_type,
        x: values[3],
        y: values[4],
    })
}
