// file: src/logging/mod.rs
// version: 1.0.0
// guid: 6b0d4e27-e9f3-4c58-b1a2-c5d6e7f8a9b0

//! Logging for the sandbox shell

pub mod logger;

pub use logger::init_logger;
