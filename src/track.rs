use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

use crate::object_type::ObjectClass;

/// Complete track of one object within a window.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ObjectTrace {
    pub class: ObjectClass,

    // first `observe_length` points, frame order
    pub observe_trace: Vec<na::Point2<f64>>,

    // remaining `predict_length` points
    pub future_trace: Vec<na::Point2<f64>>,

    // world-space model output, unset until written back
    pub predict_trace: Vec<Option<na::Point2<f64>>>,
}

impl ObjectTrace {
    pub fn new(
        class: ObjectClass,
        observe_trace: Vec<na::Point2<f64>>,
        future_trace: Vec<na::Point2<f64>>,
    ) -> Self {
        let predict_trace = vec![None; future_trace.len()];

        Self {
            class,
            observe_trace,
            future_trace,
            predict_trace,
        }
    }

    #[inline]
    pub fn seq_length(&self) -> usize {
        self.observe_trace.len() + self.future_trace.len()
    }

    /// Position at window-relative frame `idx`, observed frames first.
    #[inline]
    pub fn position(&self, idx: usize) -> Option<na::Point2<f64>> {
        let observe_length = self.observe_trace.len();

        if idx < observe_length {
            self.observe_trace.get(idx).copied()
        } else {
            self.future_trace.get(idx - observe_length).copied()
        }
    }

    #[inline]
    pub fn is_predicted(&self) -> bool {
        self.predict_trace.iter().all(Option::is_some)
    }

    /// The full predicted trace once every future frame has been written.
    pub fn predicted(&self) -> Option<Vec<na::Point2<f64>>> {
        self.predict_trace.iter().copied().collect()
    }
}
