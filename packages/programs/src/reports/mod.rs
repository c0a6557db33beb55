// ABOUTME: Progress report module covering financial and narrative reporting
// ABOUTME: Provides types and storage for kind-tagged report payloads and their queries

pub mod storage;
pub mod types;

pub use storage::*;
pub use types::*;
