use nalgebra as na;
use ndarray::prelude::*;

use crate::bounds::Bounds;
use crate::error::Error;
use crate::window::Window;

/// Writes model output back onto the window's predict traces, in world coordinates.
///
/// `output` is indexed `(frame_id, row, column)`; columns 0 and 1 hold the
/// normalized x and y. Rows are matched to objects by position in the window's
/// ascending-id order, so the output must keep the row order of the model input.
/// Only frames `[observe_length, seq_length)` are read.
pub fn postprocess(window: &mut Window, bounds: &Bounds, output: ArrayView3<'_, f64>) -> Result<(), Error> {
    check_shape(window, output)?;

    let observe_length = window.observe_length();
    let seq_length = window.seq_length();

    for (row, (_, trace)) in window.iter_mut().enumerate() {
        for frame_id in observe_length..seq_length {
            let norm = na::Point2::new(output[[frame_id, row, 0]], output[[frame_id, row, 1]]);
            trace.predict_trace[frame_id - observe_length] = Some(bounds.denormalize(norm));
        }
    }

    Ok(())
}

/// Same as [`postprocess`], additionally verifying that `object_ids` (the row order
/// the output was produced for) matches the window's current row order.
pub fn postprocess_checked(
    window: &mut Window,
    bounds: &Bounds,
    object_ids: &[i64],
    output: ArrayView3<'_, f64>,
) -> Result<(), Error> {
    let expected = window.object_ids();
    if expected.len() != object_ids.len() {
        let shape = output.dim();
        return Err(Error::ShapeMismatch {
            expected: (window.seq_length(), expected.len(), 2),
            actual: (shape.0, object_ids.len(), shape.2),
        });
    }

    if let Some((row, (&exp, &act))) = expected
        .iter()
        .zip(object_ids)
        .enumerate()
        .find(|(_, (a, b))| a != b)
    {
        return Err(Error::RowOrderMismatch {
            row,
            expected: exp,
            actual: act,
        });
    }

    postprocess(window, bounds, output)
}

fn check_shape(window: &Window, output: ArrayView3<'_, f64>) -> Result<(), Error> {
    let (frames, rows, cols) = output.dim();
    let expected = (window.seq_length(), window.len(), 2);

    let traces_fit = window
        .iter()
        .all(|(_, trace)| trace.predict_trace.len() == window.predict_length());

    if frames < expected.0 || rows != expected.1 || cols < expected.2 || !traces_fit {
        return Err(Error::ShapeMismatch {
            expected,
            actual: (frames, rows, cols),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::{preprocess, X_COLUMN};
    use crate::object_type::ObjectClass;
    use crate::track::ObjectTrace;

    const EPS: f64 = 1e-9;

    fn window() -> Window {
        let mut window = Window::new(0, 2, 2);
        for (id, base) in [(5, 1.0), (2, -3.0)] {
            let trace = ObjectTrace::new(
                ObjectClass::Vehicle,
                vec![na::Point2::new(base, base * 2.0), na::Point2::new(base + 0.5, base * 2.0 + 1.0)],
                vec![na::Point2::new(base + 1.0, base * 2.0 + 2.0), na::Point2::new(base + 1.5, base * 2.0 + 3.0)],
            );
            window.insert(id, trace).unwrap();
        }
        window
    }

    #[test]
    fn test_echo_prediction_reproduces_future() {
        let bounds = Bounds::new(-5.0, 5.0, -10.0, 10.0);
        let mut window = window();
        let input = preprocess(&window, &bounds);

        let echo = input.frames.slice(s![.., .., X_COLUMN..]).to_owned();
        postprocess(&mut window, &bounds, echo.view()).unwrap();

        for (_, trace) in window.iter() {
            let predicted = trace.predicted().unwrap();
            for (p, f) in predicted.iter().zip(&trace.future_trace) {
                assert!(na::distance(p, f) < EPS);
            }
        }
    }

    #[test]
    fn test_row_count_mismatch_fails() {
        let bounds = Bounds::new(0.0, 1.0, 0.0, 1.0);
        let mut window = window();

        let output = Array3::<f64>::zeros((4, 3, 2));
        assert!(matches!(
            postprocess(&mut window, &bounds, output.view()),
            Err(Error::ShapeMismatch { .. })
        ));

        let output = Array3::<f64>::zeros((3, 2, 2));
        assert!(matches!(
            postprocess(&mut window, &bounds, output.view()),
            Err(Error::ShapeMismatch { .. })
        ));

        let output = Array3::<f64>::zeros((4, 2, 1));
        assert!(matches!(
            postprocess(&mut window, &bounds, output.view()),
            Err(Error::ShapeMismatch { .. })
        ));

        assert!(window.iter().all(|(_, t)| t.predict_trace.iter().all(Option::is_none)));
    }

    #[test]
    fn test_short_predict_trace_fails_without_writing() {
        let bounds = Bounds::new(0.0, 1.0, 0.0, 1.0);
        let mut window = window();
        for (_, trace) in window.iter_mut() {
            trace.predict_trace.truncate(1);
        }

        let output = Array3::<f64>::zeros((4, 2, 2));
        assert!(matches!(
            postprocess(&mut window, &bounds, output.view()),
            Err(Error::ShapeMismatch { .. })
        ));
        assert!(window.iter().all(|(_, t)| t.predict_trace == vec![None]));
    }

    #[test]
    fn test_checked_detects_reordered_rows() {
        let bounds = Bounds::new(0.0, 1.0, 0.0, 1.0);
        let mut window = window();
        let output = Array3::<f64>::zeros((4, 2, 2));

        match postprocess_checked(&mut window, &bounds, &[5, 2], output.view()) {
            Err(Error::RowOrderMismatch { row, expected, actual }) => {
                assert_eq!((row, expected, actual), (0, 2, 5));
            }
            other => panic!("unexpected result: {:?}", other),
        }

        postprocess_checked(&mut window, &bounds, &[2, 5], output.view()).unwrap();
        let trace = window.get(2).unwrap();
        assert_eq!(trace.predicted(), Some(vec![na::Point2::new(0.5, 0.5); 2]));
    }
}
