use ndarray::prelude::*;

use crate::bounds::Bounds;
use crate::window::Window;

pub const ID_COLUMN: usize = 0;
pub const X_COLUMN: usize = 1;
pub const Y_COLUMN: usize = 2;
pub const CLASS_COLUMN: usize = 3;
pub const NUM_COLUMNS: usize = 4;

/// Normalized model input for a single window.
///
/// `frames` has shape `(seq_length, n_objects, 4)` with columns
/// `(object_id, norm_x, norm_y, class)`. Row `i` is `object_ids[i]` in every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInput {
    pub object_ids: Vec<i64>,
    pub frames: Array3<f64>,
}

impl ModelInput {
    #[inline]
    pub fn seq_length(&self) -> usize {
        self.frames.shape()[0]
    }

    #[inline]
    pub fn num_objects(&self) -> usize {
        self.object_ids.len()
    }

    #[inline]
    pub fn frame(&self, frame_id: usize) -> ArrayView2<'_, f64> {
        self.frames.index_axis(Axis(0), frame_id)
    }

    /// Single-element batch, shape `(1, seq_length, n_objects, 4)`.
    #[inline]
    pub fn batch(&self) -> Array4<f64> {
        self.frames.clone().insert_axis(Axis(0))
    }
}

pub fn preprocess(window: &Window, bounds: &Bounds) -> ModelInput {
    let seq_length = window.seq_length();
    let object_ids = window.object_ids();
    let mut frames = Array3::zeros((seq_length, object_ids.len(), NUM_COLUMNS));

    for (row, (object_id, trace)) in window.iter().enumerate() {
        let class = trace.class.code() as f64;

        for frame_id in 0..seq_length {
            let pos = match trace.position(frame_id) {
                Some(pos) => bounds.normalize(pos),
                None => continue,
            };

            let mut cell = frames.slice_mut(s![frame_id, row, ..]);
            cell[ID_COLUMN] = object_id as f64;
            cell[X_COLUMN] = pos.x;
            cell[Y_COLUMN] = pos.y;
            cell[CLASS_COLUMN] = class;
        }
    }

    ModelInput { object_ids, frames }
}
