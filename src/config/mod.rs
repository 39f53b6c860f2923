//! Configuration model for assetgen.
//!
//! This module defines the Config struct that represents `assetgen.yaml` at the
//! project root. The file is optional: a project without one runs entirely on
//! defaults. Unknown fields are ignored and every value is validated on load.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use operations::CONFIG_FILE_NAME;
pub use types::ImageQuality;
