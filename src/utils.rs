//! Utility functions and helpers.

pub mod preflight;
pub mod settings;

pub use preflight::check_repository_path;
pub use settings::Settings;
