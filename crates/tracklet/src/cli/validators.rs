//! CLI input validation functions.
//!
//! Used by clap's `value_parser` attribute so bad input is reported at
//! parse time. Title and description rules live in the service and are
//! reported from there.

/// Longest issue ID accepted on the command line.
pub const MAX_ISSUE_ID_LENGTH: usize = 64;

/// Validate issue ID prefix format.
///
/// Delegates to [`crate::commands::init::validate_prefix`].
///
/// # Errors
///
/// Returns the validation message for an invalid prefix.
pub fn validate_prefix(s: &str) -> Result<String, String> {
    use crate::commands::init;

    let trimmed = s.trim();
    init::validate_prefix(trimmed).map_err(|e| e.to_string())?;
    Ok(trimmed.to_string())
}

/// Validate an issue ID argument.
///
/// IDs are either generated (`iss-a3f8`) or the seed IDs (`1`, `2`, `3`),
/// so only the character set and length are checked.
///
/// # Errors
///
/// Returns a message if the ID is empty, too long, or contains characters
/// other than ASCII letters, digits and hyphens.
pub fn validate_issue_id(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Issue ID cannot be empty".to_string());
    }

    if s.len() > MAX_ISSUE_ID_LENGTH {
        return Err(format!(
            "Issue ID cannot exceed {MAX_ISSUE_ID_LENGTH} characters"
        ));
    }

    if !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(format!(
            "Invalid issue ID '{s}': only letters, digits and hyphens are allowed"
        ));
    }

    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1")]
    #[case("iss-a3f8")]
    #[case("  proj-0z9k  ")]
    fn test_validate_issue_id_accepts(#[case] input: &str) {
        assert_eq!(validate_issue_id(input).unwrap(), input.trim());
    }

    #[rstest]
    #[case::empty("", "cannot be empty")]
    #[case::blank("   ", "cannot be empty")]
    #[case::slash("iss/abc", "only letters")]
    #[case::space("iss abc", "only letters")]
    fn test_validate_issue_id_rejects(#[case] input: &str, #[case] expected: &str) {
        let err = validate_issue_id(input).unwrap_err();
        assert!(err.contains(expected), "{err}");
    }

    #[test]
    fn test_validate_issue_id_too_long() {
        let id = "a".repeat(MAX_ISSUE_ID_LENGTH + 1);
        assert!(validate_issue_id(&id).is_err());
    }

    #[test]
    fn test_validate_prefix_trims() {
        assert_eq!(validate_prefix(" proj ").unwrap(), "proj");
        assert!(validate_prefix("x").is_err());
    }
}
