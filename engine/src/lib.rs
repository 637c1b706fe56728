// Engine library root
// Loading, cleaning and analysis of municipal spending spreadsheets.

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod services;

pub use error::{EngineError, SkipReason, SkippedFile};
