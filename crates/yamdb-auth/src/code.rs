//! Confirmation codes mailed to users at signup.

use uuid::Uuid;

/// Generate a fresh confirmation code (UUID v4 in hyphenated text form).
pub fn generate_confirmation_code() -> String {
    Uuid::new_v4().to_string()
}

/// Whether a supplied code matches the stored one. A blank stored code
/// never matches.
pub fn code_matches(stored: &str, supplied: &str) -> bool {
    !stored.is_empty() && stored == supplied
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_fresh_uuids() {
        let first = generate_confirmation_code();
        let second = generate_confirmation_code();
        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
        assert_eq!(first.len(), 36);
    }

    #[test]
    fn test_blank_stored_code_never_matches() {
        assert!(!code_matches("", ""));
        assert!(code_matches("abc", "abc"));
        assert!(!code_matches("abc", "abd"));
    }
}
