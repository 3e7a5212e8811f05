use std::path::PathBuf;

use serde_derive::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoaderConfig {
    /// Root holding the per-sequence trajectory directory
    pub data_root: PathBuf,
    pub train_dir: String,
    pub observe_length: usize,
    pub predict_length: usize,

    // share of shuffled files kept for training, the rest is the eval partition
    pub train_ratio: f64,
    pub seed: u64,

    // serve the eval partition instead of the training one
    pub infer: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("data"),
            train_dir: String::from("prediction_train"),
            observe_length: 4,
            predict_length: 6,
            train_ratio: 0.9,
            seed: 42,
            infer: false,
        }
    }
}

impl LoaderConfig {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
            ..Default::default()
        }
    }

    pub fn with_lengths(mut self, observe_length: usize, predict_length: usize) -> Self {
        self.observe_length = observe_length;
        self.predict_length = predict_length;
        self
    }

    pub fn with_infer(mut self, infer: bool) -> Self {
        self.infer = infer;
        self
    }

    #[inline]
    pub fn seq_length(&self) -> usize {
        self.observe_length + self.predict_length
    }

    #[inline]
    pub fn train_path(&self) -> PathBuf {
        self.data_root.join(&self.train_dir)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.observe_length == 0 {
            return Err(Error::InvalidConfig("observe_length must be positive".into()));
        }

        if self.predict_length == 0 {
            return Err(Error::InvalidConfig("predict_length must be positive".into()));
        }

        if !(0.0..=1.0).contains(&self.train_ratio) {
            return Err(Error::InvalidConfig(format!(
                "train_ratio must be within [0, 1], got {}",
                self.train_ratio
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoaderConfig::new("/tmp/traffic");

        assert_eq!(config.seq_length(), 10);
        assert_eq!(config.seed, 42);
        assert_eq!(config.train_path(), PathBuf::from("/tmp/traffic/prediction_train"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(LoaderConfig::default().with_lengths(0, 2).validate().is_err());
        assert!(LoaderConfig::default().with_lengths(2, 0).validate().is_err());

        let mut config = LoaderConfig::default();
        config.train_ratio = 1.5;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }
}
