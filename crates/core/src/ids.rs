//! Opaque identifier generation.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use uuid::Uuid;

/// Length of every generated id.
pub const ID_LENGTH: usize = 22;

/// Generates a new opaque identifier.
///
/// 122 random bits of a v4 UUID, base64url-encoded without padding. The
/// result is URL-safe (`A-Z a-z 0-9 - _`), carries no ordering and is used
/// both for entity ids and for export tracking ids.
pub fn generate_id() -> String {
    URL_SAFE_NO_PAD.encode(Uuid::new_v4().as_bytes())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_generated_id_has_fixed_length() {
        for _ in 0..100 {
            assert_eq!(generate_id().len(), ID_LENGTH);
        }
    }

    #[test]
    fn test_generated_id_is_url_safe() {
        let id = generate_id();
        assert!(
            id.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "unexpected character in {id}"
        );
    }

    #[test]
    fn test_generated_id_never_contains_tag_delimiter() {
        assert!(!generate_id().contains('#'));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: HashSet<String> = (0..1_000_000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1_000_000);
    }
}
