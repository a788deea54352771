//! Enum token normalization
//!
//! Seed source refers to enumeration constants by qualified name
//! (`UserRole.ADMIN`, `CaseStatus.IN_PROGRESS`). Documents store only the
//! final segment.

/// Reduce a possibly-qualified dotted token to its final segment.
///
/// An absent token stays absent. Any string splits safely: a token without
/// a dot is returned as-is and a trailing dot yields an empty segment.
///
/// # Examples
///
/// ```
/// use seedport_domain::normalize_enum_token;
///
/// assert_eq!(normalize_enum_token(Some("Role.ADMIN")), Some("ADMIN"));
/// assert_eq!(normalize_enum_token(Some("OPEN")), Some("OPEN"));
/// assert_eq!(normalize_enum_token(None), None);
/// ```
pub fn normalize_enum_token(token: Option<&str>) -> Option<&str> {
    token.map(last_segment)
}

/// Final dot-separated segment of `token`.
pub fn last_segment(token: &str) -> &str {
    match token.rfind('.') {
        Some(idx) => &token[idx + 1..],
        None => token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_qualified_token() {
        assert_eq!(last_segment("Category.SUBCATEGORY.LEAF"), "LEAF");
    }

    #[test]
    fn test_unqualified_token() {
        assert_eq!(last_segment("ADMIN"), "ADMIN");
    }

    #[test]
    fn test_trailing_dot() {
        assert_eq!(last_segment("Role."), "");
    }

    #[test]
    fn test_absent_token() {
        assert_eq!(normalize_enum_token(None), None);
    }

    #[test]
    fn test_empty_token_unchanged() {
        assert_eq!(normalize_enum_token(Some("")), Some(""));
    }

    proptest! {
        #[test]
        fn prop_yields_text_after_last_dot(token in "[A-Za-z0-9_.]{0,40}") {
            let expected = token.split('.').last().unwrap_or("").to_string();
            prop_assert_eq!(last_segment(&token), expected.as_str());
        }

        #[test]
        fn prop_dotless_token_unchanged(token in "[A-Za-z0-9_]{0,40}") {
            prop_assert_eq!(last_segment(&token), token.as_str());
        }
    }
}
