use std::path::Path;

use nalgebra as na;
use ndarray::s;
use trajprep::normalizer::X_COLUMN;
use tempfile::tempdir;
use trajprep::{Bounds, Error, LoaderConfig, ObjectClass, TrajectoryLoader};

const EPS: f64 = 1e-9;

fn write(path: &Path, lines: &[String]) {
    std::fs::write(path, lines.join("\n")).unwrap();
}

/// Frames 0..5; objects 1 (vehicle) and 2 (pedestrian) complete in 0..3,
/// object 3 missing frame 2, plus an invalid-type row far outside the tracks.
fn scenario_lines() -> Vec<String> {
    let mut lines = Vec::new();
    for frame in 0..6 {
        if frame < 4 {
            lines.push(format!("{} 1 1 {} {} 4.5 1.8 1.5 0.0", frame, 10.0 + frame as f64, 20.0));
            lines.push(format!("{} 2 3 {} {} 0.5 0.5 1.7 0.0", frame, 0.0, 5.0 + frame as f64 * 0.5));
        }
        if frame != 2 && frame < 4 {
            lines.push(format!("{} 3 4 {} {} 1.8 0.6 1.5 0.0", frame, 30.0, 30.0 - frame as f64));
        }
        if frame >= 4 {
            lines.push(format!("{} 1 1 {} {} 4.5 1.8 1.5 0.0", frame, 14.0, 20.0));
        }
    }
    lines.push(String::from("5 9 5 -100.0 100.0 0 0 0 0"));
    lines
}

fn config(root: &Path) -> LoaderConfig {
    LoaderConfig::new(root).with_lengths(2, 2)
}

#[test]
fn test_end_to_end_scenario() {
    let tmp = tempdir().expect("Failed to create temp dir");
    let dir = tmp.path();
    let file = dir.join("seq_0.txt");
    write(&file, &scenario_lines());

    let loader = TrajectoryLoader::from_files(config(dir), vec![file]).unwrap();

    // invalid-type rows still contribute to the bounds
    assert_eq!(*loader.bounds(), Bounds::new(-100.0, 30.0, 5.0, 100.0));

    let windows: Vec<_> = loader.windows().collect::<Result<_, _>>().unwrap();
    assert_eq!(windows.len(), 1);

    let window = &windows[0];
    assert_eq!(window.object_ids(), vec![1, 2]);

    let vehicle = window.get(1).unwrap();
    assert_eq!(vehicle.class, ObjectClass::Vehicle);
    assert_eq!(vehicle.class.code(), 3);
    assert_eq!(vehicle.observe_trace, vec![na::Point2::new(10.0, 20.0), na::Point2::new(11.0, 20.0)]);
    assert_eq!(vehicle.future_trace, vec![na::Point2::new(12.0, 20.0), na::Point2::new(13.0, 20.0)]);

    let pedestrian = window.get(2).unwrap();
    assert_eq!(pedestrian.class.code(), 1);
    assert_eq!(pedestrian.observe_trace, vec![na::Point2::new(0.0, 5.0), na::Point2::new(0.0, 5.5)]);
    assert_eq!(pedestrian.future_trace, vec![na::Point2::new(0.0, 6.0), na::Point2::new(0.0, 6.5)]);

    assert!(!window.contains(3));
}

#[test]
fn test_echo_prediction_round_trip() {
    let tmp = tempdir().expect("Failed to create temp dir");
    let dir = tmp.path();
    let file = dir.join("seq_0.txt");
    write(&file, &scenario_lines());

    let loader = TrajectoryLoader::from_files(config(dir), vec![file]).unwrap();
    let mut window = loader.windows().next().unwrap().unwrap();

    let input = loader.preprocess(&window);
    assert_eq!(input.batch().shape(), &[1, 4, 2, 4]);

    let echo = input.frames.slice(s![.., .., X_COLUMN..]).to_owned();
    loader.postprocess_checked(&mut window, &input, echo.view()).unwrap();

    for (_, trace) in window.iter() {
        let predicted = trace.predicted().unwrap();
        assert_eq!(predicted.len(), 2);
        for (p, f) in predicted.iter().zip(&trace.future_trace) {
            assert!(na::distance(p, f) < EPS);
        }
    }
}

#[test]
fn test_windows_are_restartable() {
    let tmp = tempdir().expect("Failed to create temp dir");
    let dir = tmp.path();
    let a = dir.join("a.txt");
    let b = dir.join("b.txt");
    write(&a, &scenario_lines());
    let lines: Vec<_> = (0..9).map(|f| format!("{} 4 2 {} 1.0", f, f)).collect();
    write(&b, &lines);

    let loader = TrajectoryLoader::from_files(config(dir), vec![a, b]).unwrap();

    let first: Vec<_> = loader.windows().collect::<Result<_, _>>().unwrap();
    let second: Vec<_> = loader.windows().collect::<Result<_, _>>().unwrap();

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
    assert_eq!(first[2].slice_id(), 1);
    assert_eq!(first[2].object_ids(), vec![4]);
}

#[test]
fn test_parse_failure_is_fatal() {
    let tmp = tempdir().expect("Failed to create temp dir");
    let dir = tmp.path();
    let good = dir.join("good.txt");
    let bad = dir.join("bad.txt");
    write(&good, &scenario_lines());
    write(&bad, &[String::from("0 1 1 1.0 2.0"), String::from("1 1 x 1.0 2.0")]);

    let res = TrajectoryLoader::from_files(config(dir), vec![good, bad]);
    assert!(matches!(res, Err(Error::Parse { line: 2, column: 2, .. })));

    let missing = dir.join("missing.txt");
    let res = TrajectoryLoader::from_files(config(dir), vec![missing]);
    assert!(matches!(res, Err(Error::Io { .. })));
}

#[test]
fn test_generation_stops_after_first_error() {
    let tmp = tempdir().expect("Failed to create temp dir");
    let dir = tmp.path();
    let a = dir.join("a.txt");
    let b = dir.join("b.txt");
    let c = dir.join("c.txt");
    for file in [&a, &b, &c] {
        write(file, &scenario_lines());
    }

    let loader = TrajectoryLoader::from_files(config(dir), vec![a, b.clone(), c]).unwrap();
    std::fs::remove_file(&b).unwrap();

    let mut windows = loader.windows();
    assert!(matches!(windows.next(), Some(Ok(_))));
    assert!(matches!(windows.next(), Some(Err(Error::Io { .. }))));
    assert!(windows.next().is_none());
    assert!(windows.next().is_none());

    write(&b, &[String::from("0 1 1 1.0 2.0"), String::from("1 1 1 abc 2.0")]);
    let items: Vec<_> = loader.windows().map(|w| w.is_ok()).collect();
    assert_eq!(items, vec![true, false]);
}

#[test]
fn test_partitioned_loader() {
    let tmp = tempdir().expect("Failed to create temp dir");
    let dir = tmp.path();
    let train_dir = dir.join("prediction_train");
    std::fs::create_dir_all(&train_dir).unwrap();

    for i in 0..10 {
        let lines: Vec<_> = (0..4).map(|f| format!("{} {} 1 {} {}", f, i, f + i, i)).collect();
        write(&train_dir.join(format!("seq_{:02}.txt", i)), &lines);
    }

    let train = TrajectoryLoader::new(config(dir)).unwrap();
    let eval = TrajectoryLoader::new(config(dir).with_infer(true)).unwrap();

    assert_eq!(train.files().len(), 9);
    assert_eq!(eval.files().len(), 1);
    assert!(!train.files().contains(&eval.files()[0]));

    assert_eq!(train.windows().count(), 9);
    assert_eq!(eval.windows().count(), 1);
}
