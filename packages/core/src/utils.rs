// ABOUTME: Shared utility functions for Peduli
// ABOUTME: Entity id generation used by every storage layer

use uuid::Uuid;

/// Generate a unique entity id
///
/// Every persisted entity (user, proposal, program, report, document) gets
/// one of these as its primary key and foreign-key target.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id() {
        let id1 = generate_id();
        let id2 = generate_id();

        // Canonical hyphenated UUID form
        assert_eq!(id1.len(), 36);
        assert_eq!(id2.len(), 36);
        assert_ne!(id1, id2);

        assert!(id1
            .chars()
            .all(|c| c.is_ascii_hexdigit() || c == '-'));
    }
}
