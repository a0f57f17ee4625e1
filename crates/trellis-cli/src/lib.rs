//! Trellis CLI library for testing and reusability.

pub mod pipeline;
pub mod project;
pub mod utils;

pub use project::Project;
pub use trellis_utils::Config;
