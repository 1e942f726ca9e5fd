//! Runtime configuration.

pub mod settings;
