//! Timestamped annotation rules.
//!
//! Provides the content and offset checks shared by the append and replace
//! operations. Replace drops blank items silently; append rejects them.

use crate::error::CoreError;

/// Maximum characters in a single annotation's content.
pub const MAX_CONTENT_LENGTH: usize = 10_000;

/// Maximum number of items accepted by one replace call.
pub const MAX_ITEMS_PER_REPLACE: usize = 5_000;

/// Whether annotation content is empty or whitespace-only.
pub fn is_blank(content: &str) -> bool {
    content.trim().is_empty()
}

/// Validate a timestamp offset (seconds into the recording).
pub fn validate_offset(offset: f64) -> Result<(), CoreError> {
    if !offset.is_finite() {
        return Err(CoreError::Validation(
            "timestamp_offset must be a finite number".into(),
        ));
    }
    if offset < 0.0 {
        return Err(CoreError::Validation(format!(
            "timestamp_offset must be >= 0, got {offset}"
        )));
    }
    Ok(())
}

/// Validate content length. Blank content is not checked here.
pub fn validate_content_length(content: &str) -> Result<(), CoreError> {
    let len = content.chars().count();
    if len > MAX_CONTENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "content must be at most {MAX_CONTENT_LENGTH} characters, got {len}"
        )));
    }
    Ok(())
}

/// Validate a single appended annotation. Blank content is an error.
pub fn validate_append(offset: f64, content: &str) -> Result<(), CoreError> {
    validate_offset(offset)?;
    if is_blank(content) {
        return Err(CoreError::Validation("content must not be empty".into()));
    }
    validate_content_length(content)
}

/// Validate the items of a replace call.
///
/// Offsets are checked on every item, including blank ones that will later be
/// dropped, so a malformed request never partially applies.
pub fn validate_replace<'a, I>(items: I) -> Result<(), CoreError>
where
    I: IntoIterator<Item = (f64, &'a str)>,
{
    let mut count = 0usize;
    for (offset, content) in items {
        count += 1;
        if count > MAX_ITEMS_PER_REPLACE {
            return Err(CoreError::Validation(format!(
                "at most {MAX_ITEMS_PER_REPLACE} annotations may be saved at once"
            )));
        }
        validate_offset(offset)?;
        validate_content_length(content)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank("   \t\n"));
        assert!(!is_blank(" ok "));
    }

    #[test]
    fn offsets() {
        assert!(validate_offset(0.0).is_ok());
        assert!(validate_offset(12.75).is_ok());
        assert!(validate_offset(-0.5).is_err());
        assert!(validate_offset(f64::NAN).is_err());
        assert!(validate_offset(f64::INFINITY).is_err());
    }

    #[test]
    fn append_rejects_blank() {
        assert!(validate_append(1.0, "  ").is_err());
        assert!(validate_append(1.0, "push B").is_ok());
    }

    #[test]
    fn replace_allows_blank_items() {
        assert!(validate_replace([(0.0, "  "), (5.0, "ok")]).is_ok());
        assert!(validate_replace(std::iter::empty()).is_ok());
    }

    #[test]
    fn replace_rejects_bad_offset_even_on_blank_item() {
        assert!(validate_replace([(-1.0, " "), (5.0, "ok")]).is_err());
    }

    #[test]
    fn content_length_limit() {
        let long = "a".repeat(MAX_CONTENT_LENGTH + 1);
        assert!(validate_content_length(&long).is_err());
        assert!(validate_append(0.0, &long).is_err());
    }
}
