// Library exports for the shot-coach CLI
// This allows testing of internal modules

pub mod commands;
pub mod config;
pub mod input;
