use std::path::{Path, PathBuf};

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::info;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Train,
    Eval,
}

/// Regular files directly under `dir`, sorted by file name.
pub fn list_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, Error> {
    let dir = dir.as_ref();
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir).map_err(|err| Error::io(dir, err))? {
        let entry = entry.map_err(|err| Error::io(dir, err))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort();

    Ok(files)
}

/// Deterministic split: shuffle with a seeded rng, the first `floor(n * train_ratio)`
/// files are the training partition and the rest the eval partition.
pub fn split(mut files: Vec<PathBuf>, train_ratio: f64, seed: u64, partition: Partition) -> Vec<PathBuf> {
    let mut rng = StdRng::seed_from_u64(seed);
    files.shuffle(&mut rng);

    let train_count = ((files.len() as f64 * train_ratio).floor() as usize).min(files.len());
    let eval = files.split_off(train_count);

    match partition {
        Partition::Train => files,
        Partition::Eval => eval,
    }
}

pub fn select_files<P: AsRef<Path>>(
    dir: P,
    train_ratio: f64,
    seed: u64,
    partition: Partition,
) -> Result<Vec<PathBuf>, Error> {
    let files = list_files(dir.as_ref())?;
    let total = files.len();
    let selected = split(files, train_ratio, seed, partition);

    info!(
        dir = %dir.as_ref().display(),
        total,
        selected = selected.len(),
        ?partition,
        "trajectory files selected"
    );

    Ok(selected)
}
