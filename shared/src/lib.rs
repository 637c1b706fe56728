// Record types and locale helpers shared between the engine and its callers.
pub mod models;
pub mod utils;
