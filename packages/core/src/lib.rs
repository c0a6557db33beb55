// ABOUTME: Core constants and utilities for Peduli
// ABOUTME: Foundational package shared by the storage, oversight, and API packages

pub mod constants;
pub mod utils;

pub use constants::{database_file, peduli_dir};
pub use utils::generate_id;
