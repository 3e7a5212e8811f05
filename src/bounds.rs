use std::path::Path;

use nalgebra as na;
use serde_derive::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Error;
use crate::record::{read_records, Record};

/// Global spatial extent of a dataset, the reference frame for normalization.
///
/// Computed over every row of every file, including rows with the invalid
/// raw type that windowing later drops.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds {
    #[inline]
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    #[inline]
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    #[inline]
    pub fn extend(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    #[inline]
    pub fn merge(&mut self, other: &Bounds) {
        if !other.is_empty() {
            self.extend(other.min_x, other.min_y);
            self.extend(other.max_x, other.max_y);
        }
    }

    pub fn from_records(records: &[Record]) -> Result<Self, Error> {
        let mut bounds = Self::empty();
        for rec in records {
            bounds.extend(rec.x, rec.y);
        }

        if bounds.is_empty() {
            return Err(Error::EmptyDataset);
        }

        Ok(bounds)
    }

    /// Scans every file in full. Any unreadable or unparseable file aborts the whole scan.
    pub fn from_files<I, P>(files: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut bounds = Self::empty();

        for path in files {
            let path = path.as_ref();
            let records = read_records(path)?;
            if records.is_empty() {
                debug!(path = %path.display(), "no rows, skipped for bounds");
                continue;
            }

            bounds.merge(&Self::from_records(&records)?);
        }

        if bounds.is_empty() {
            return Err(Error::EmptyDataset);
        }

        info!(
            min_x = bounds.min_x,
            max_x = bounds.max_x,
            min_y = bounds.min_y,
            max_y = bounds.max_y,
            "dataset bounds computed"
        );

        if bounds.is_degenerate_x() || bounds.is_degenerate_y() {
            warn!(
                degenerate_x = bounds.is_degenerate_x(),
                degenerate_y = bounds.is_degenerate_y(),
                "degenerate bounds axis, normalized values on it collapse to 0"
            );
        }

        Ok(bounds)
    }

    #[inline]
    pub fn is_degenerate_x(&self) -> bool {
        self.max_x <= self.min_x
    }

    #[inline]
    pub fn is_degenerate_y(&self) -> bool {
        self.max_y <= self.min_y
    }

    /// Maps `[min, max]` onto `[-1, 1]` per axis.
    #[inline]
    pub fn normalize(&self, pos: na::Point2<f64>) -> na::Point2<f64> {
        na::Point2::new(
            normalize_axis(pos.x, self.min_x, self.max_x),
            normalize_axis(pos.y, self.min_y, self.max_y),
        )
    }

    #[inline]
    pub fn denormalize(&self, pos: na::Point2<f64>) -> na::Point2<f64> {
        na::Point2::new(
            denormalize_axis(pos.x, self.min_x, self.max_x),
            denormalize_axis(pos.y, self.min_y, self.max_y),
        )
    }
}

#[inline(always)]
fn normalize_axis(v: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span <= 0.0 {
        return 0.0;
    }

    (v - min) / span * 2.0 - 1.0
}

#[inline(always)]
fn denormalize_axis(v: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span <= 0.0 {
        return min;
    }

    (v + 1.0) / 2.0 * span + min
}
