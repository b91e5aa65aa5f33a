//! Result type alias for ADE Bridge

use super::errors::AdeError;

/// Result type alias for ADE Bridge operations
///
/// # Examples
///
/// ```
/// use ade_bridge::domain::result::Result;
/// use ade_bridge::domain::errors::AdeError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(AdeError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, AdeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::AdeError;

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(AdeError::Validation("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
