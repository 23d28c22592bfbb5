// Suzume image delivery library

pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod loader;
pub mod logging;
pub mod rewrite;
