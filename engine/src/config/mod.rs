// Engine configuration module
pub mod settings;
