use std::collections::BTreeMap;

use serde_derive::{Deserialize, Serialize};

use crate::track::ObjectTrace;

/// One contiguous `seq_length`-frame slice of a file with every complete object track in it.
///
/// Objects are kept ordered by ascending id. That order is the row order of the
/// normalized model input and the order prediction rows are read back in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Window {
    slice_id: usize,
    observe_length: usize,
    predict_length: usize,
    objects: BTreeMap<i64, ObjectTrace>,
}

impl Window {
    pub fn new(slice_id: usize, observe_length: usize, predict_length: usize) -> Self {
        Self {
            slice_id,
            observe_length,
            predict_length,
            objects: BTreeMap::new(),
        }
    }

    /// Traces are expected to fit the window's lengths.
    pub(crate) fn from_objects(
        slice_id: usize,
        observe_length: usize,
        predict_length: usize,
        objects: BTreeMap<i64, ObjectTrace>,
    ) -> Self {
        Self {
            slice_id,
            observe_length,
            predict_length,
            objects,
        }
    }

    #[inline]
    pub fn slice_id(&self) -> usize {
        self.slice_id
    }

    #[inline]
    pub fn observe_length(&self) -> usize {
        self.observe_length
    }

    #[inline]
    pub fn predict_length(&self) -> usize {
        self.predict_length
    }

    #[inline]
    pub fn seq_length(&self) -> usize {
        self.observe_length + self.predict_length
    }

    /// Inserts a complete trace. Returns the trace back if its length does not fit the window.
    pub fn insert(&mut self, object_id: i64, trace: ObjectTrace) -> Result<(), ObjectTrace> {
        if !self.fits(&trace) {
            return Err(trace);
        }

        self.objects.insert(object_id, trace);

        Ok(())
    }

    #[inline]
    pub(crate) fn fits(&self, trace: &ObjectTrace) -> bool {
        trace.observe_trace.len() == self.observe_length
            && trace.future_trace.len() == self.predict_length
            && trace.predict_trace.len() == self.predict_length
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    #[inline]
    pub fn get(&self, object_id: i64) -> Option<&ObjectTrace> {
        self.objects.get(&object_id)
    }

    #[inline]
    pub fn contains(&self, object_id: i64) -> bool {
        self.objects.contains_key(&object_id)
    }

    /// Row order shared by the model input and output.
    #[inline]
    pub fn object_ids(&self) -> Vec<i64> {
        self.objects.keys().copied().collect()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (i64, &ObjectTrace)> {
        self.objects.iter().map(|(id, trace)| (*id, trace))
    }

    #[inline]
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (i64, &mut ObjectTrace)> {
        self.objects.iter_mut().map(|(id, trace)| (*id, trace))
    }
}
