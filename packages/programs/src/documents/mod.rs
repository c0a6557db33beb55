// ABOUTME: Program document module for attachment metadata
// ABOUTME: Provides types and storage for document records; file content lives elsewhere

pub mod storage;
pub mod types;

pub use storage::*;
pub use types::*;
