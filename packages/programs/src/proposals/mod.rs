// ABOUTME: Program proposal module covering the pre-activation lifecycle
// ABOUTME: Provides types and storage for submitted, reviewed, and activated proposals

pub mod storage;
pub mod types;

pub use storage::*;
pub use types::*;
