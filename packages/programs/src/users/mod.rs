// ABOUTME: User account module with the ADMIN/USER role split
// ABOUTME: Provides types and storage for the people who author and oversee programs

pub mod storage;
pub mod types;

pub use storage::*;
pub use types::*;
