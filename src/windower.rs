use std::collections::BTreeMap;

use nalgebra as na;
use tracing::{debug, warn};

use crate::object_type::{classify, ObjectClass, INVALID_RAW_TYPE};
use crate::record::Record;
use crate::track::ObjectTrace;
use crate::window::Window;

/// Per-object bookkeeping while a single window is being filled.
#[derive(Debug)]
struct TraceBuilder {
    class: ObjectClass,
    observe: Vec<na::Point2<f64>>,
    future: Vec<na::Point2<f64>>,
    next_expected_frame: i64,
    frames_filled: usize,
}

impl TraceBuilder {
    fn new(class: ObjectClass, first_frame: i64, observe_length: usize, predict_length: usize) -> Self {
        Self {
            class,
            observe: Vec::with_capacity(observe_length),
            future: Vec::with_capacity(predict_length),
            next_expected_frame: first_frame,
            frames_filled: 0,
        }
    }

    /// Accepts a point only while the track is contiguous from the window start.
    /// A missed frame stalls the builder for the rest of the window.
    fn push(&mut self, frame_id: i64, pos: na::Point2<f64>, observe_length: usize, seq_length: usize) {
        if self.frames_filled >= seq_length || self.next_expected_frame != frame_id {
            return;
        }

        if self.frames_filled < observe_length {
            self.observe.push(pos);
        } else {
            self.future.push(pos);
        }

        self.frames_filled += 1;
        self.next_expected_frame += 1;
    }

    #[inline]
    fn is_complete(&self, seq_length: usize) -> bool {
        self.frames_filled == seq_length
    }

    fn finish(self) -> ObjectTrace {
        ObjectTrace::new(self.class, self.observe, self.future)
    }
}

/// Lazy sequence of non-overlapping windows over one file's records.
///
/// Frame ids are treated as a dense 0-based counter: window `w` covers frame ids
/// `[w * seq_length, (w + 1) * seq_length)`. Frames past the last full window are dropped.
#[derive(Debug)]
pub struct Windows {
    frames: BTreeMap<i64, Vec<Record>>,
    observe_length: usize,
    predict_length: usize,
    num_slices: usize,
    next_slice: usize,
}

impl Windows {
    pub fn new(records: Vec<Record>, observe_length: usize, predict_length: usize) -> Self {
        let mut frames: BTreeMap<i64, Vec<Record>> = BTreeMap::new();
        for rec in records {
            if rec.raw_type == INVALID_RAW_TYPE {
                continue;
            }

            frames.entry(rec.frame_id).or_insert_with(Vec::new).push(rec);
        }

        let seq_length = observe_length + predict_length;
        let num_frames = frames.len();
        let num_slices = if seq_length == 0 {
            0
        } else {
            num_frames / seq_length
        };

        let discarded_frames = num_frames - num_slices * seq_length;
        debug!(num_frames, num_slices, "windowing records");

        if discarded_frames > 0 {
            warn!(num_frames, discarded_frames, "trailing frames do not fill a window, discarded");
        }

        Self {
            frames,
            observe_length,
            predict_length,
            num_slices,
            next_slice: 0,
        }
    }

    #[inline]
    pub fn num_slices(&self) -> usize {
        self.num_slices
    }

    #[inline]
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Frames past the last full window, never yielded.
    #[inline]
    pub fn discarded_frames(&self) -> usize {
        self.num_frames() - self.num_slices * self.seq_length()
    }

    #[inline]
    fn seq_length(&self) -> usize {
        self.observe_length + self.predict_length
    }

    fn build(&self, slice_id: usize) -> Window {
        let seq_length = self.seq_length();
        let first_frame = (slice_id * seq_length) as i64;
        let last_frame = first_frame + seq_length as i64;

        let mut builders: BTreeMap<i64, TraceBuilder> = BTreeMap::new();

        for frame_id in first_frame..last_frame {
            let records = match self.frames.get(&frame_id) {
                Some(records) => records,
                None => continue,
            };

            for rec in records {
                builders
                    .entry(rec.object_id)
                    .or_insert_with(|| {
                        TraceBuilder::new(
                            classify(rec.raw_type),
                            first_frame,
                            self.observe_length,
                            self.predict_length,
                        )
                    })
                    .push(frame_id, rec.position(), self.observe_length, seq_length);
            }
        }

        let seen = builders.len();
        let objects: BTreeMap<i64, ObjectTrace> = builders
            .into_iter()
            .filter(|(_, builder)| builder.is_complete(seq_length))
            .map(|(object_id, builder)| (object_id, builder.finish()))
            .collect();

        let window = Window::from_objects(slice_id, self.observe_length, self.predict_length, objects);

        debug!(
            slice_id,
            seen,
            kept = window.len(),
            "window built"
        );

        window
    }
}

impl Iterator for Windows {
    type Item = Window;

    fn next(&mut self) -> Option<Window> {
        if self.next_slice >= self.num_slices {
            return None;
        }

        let window = self.build(self.next_slice);
        self.next_slice += 1;

        Some(window)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.num_slices - self.next_slice;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Windows {}
