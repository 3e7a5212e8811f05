use std::path::PathBuf;

use ndarray::ArrayView3;
use tracing::debug;

use crate::bounds::Bounds;
use crate::config::LoaderConfig;
use crate::dataset::{select_files, Partition};
use crate::denormalizer;
use crate::error::Error;
use crate::normalizer::{self, ModelInput};
use crate::record::read_records;
use crate::window::Window;
use crate::windower::Windows;

/// Serves fixed-length windows from a set of trajectory files, normalized against
/// bounds computed once over the same set.
#[derive(Debug, Clone)]
pub struct TrajectoryLoader {
    config: LoaderConfig,
    files: Vec<PathBuf>,
    bounds: Bounds,
}

impl TrajectoryLoader {
    /// Selects the train or eval partition (per `config.infer`) of the data root.
    pub fn new(config: LoaderConfig) -> Result<Self, Error> {
        config.validate()?;

        let partition = if config.infer {
            Partition::Eval
        } else {
            Partition::Train
        };

        let files = select_files(config.train_path(), config.train_ratio, config.seed, partition)?;

        Self::from_files(config, files)
    }

    pub fn from_files(config: LoaderConfig, files: Vec<PathBuf>) -> Result<Self, Error> {
        config.validate()?;

        let bounds = Bounds::from_files(&files)?;

        Ok(Self {
            config,
            files,
            bounds,
        })
    }

    #[inline]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    #[inline]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Fresh pass over every file. Files are re-read as they are reached.
    pub fn windows(&self) -> LoaderWindows<'_> {
        LoaderWindows {
            loader: self,
            next_file: 0,
            current: None,
            failed: false,
        }
    }

    #[inline]
    pub fn preprocess(&self, window: &Window) -> ModelInput {
        normalizer::preprocess(window, &self.bounds)
    }

    #[inline]
    pub fn postprocess(&self, window: &mut Window, output: ArrayView3<'_, f64>) -> Result<(), Error> {
        denormalizer::postprocess(window, &self.bounds, output)
    }

    #[inline]
    pub fn postprocess_checked(
        &self,
        window: &mut Window,
        input: &ModelInput,
        output: ArrayView3<'_, f64>,
    ) -> Result<(), Error> {
        denormalizer::postprocess_checked(window, &self.bounds, &input.object_ids, output)
    }
}

pub struct LoaderWindows<'a> {
    loader: &'a TrajectoryLoader,
    next_file: usize,
    current: Option<Windows>,
    failed: bool,
}

impl<'a> Iterator for LoaderWindows<'a> {
    type Item = Result<Window, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            if let Some(window) = self.current.as_mut().and_then(|windows| windows.next()) {
                return Some(Ok(window));
            }

            let path = self.loader.files.get(self.next_file)?;
            self.next_file += 1;

            let records = match read_records(path) {
                Ok(records) => records,
                Err(err) => {
                    self.failed = true;
                    self.current = None;
                    return Some(Err(err));
                }
            };

            debug!(path = %path.display(), rows = records.len(), "trajectory file loaded");

            self.current = Some(Windows::new(
                records,
                self.loader.config.observe_length,
                self.loader.config.predict_length,
            ));
        }
    }
}
