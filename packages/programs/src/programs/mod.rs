// ABOUTME: Active program module covering post-activation state
// ABOUTME: Provides types and storage for running, completed, and halted programs

pub mod storage;
pub mod types;

pub use storage::*;
pub use types::*;
