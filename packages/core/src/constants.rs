use std::env;
use std::path::PathBuf;

/// Get the path to the Peduli data directory (~/.peduli)
pub fn peduli_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".peduli")
    } else {
        // Fall back to dirs crate for normal usage
        dirs::home_dir()
            .expect("Unable to get home directory")
            .join(".peduli")
    }
}

/// Get the path to the SQLite database file (~/.peduli/peduli.db)
pub fn database_file() -> PathBuf {
    peduli_dir().join("peduli.db")
}
