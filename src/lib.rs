pub mod bounds;
pub mod config;
pub mod dataset;
pub mod denormalizer;
pub mod error;
pub mod loader;
pub mod normalizer;
pub mod object_type;
pub mod record;
pub mod windower;

mod track;
mod window;

pub use bounds::Bounds;
pub use config::LoaderConfig;
pub use error::Error;
pub use loader::TrajectoryLoader;
pub use normalizer::ModelInput;
pub use object_type::{classify, ObjectClass};
pub use record::Record;
pub use track::ObjectTrace;
pub use window::Window;
pub use windower::Windows;
