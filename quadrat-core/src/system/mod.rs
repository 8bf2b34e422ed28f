pub mod paths;

pub use paths::{config_path, quadrat_home};
