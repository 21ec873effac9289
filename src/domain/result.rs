//! Result type alias for envject

use super::errors::EnvjectError;

/// Result type alias for envject operations
///
/// # Examples
///
/// ```
/// use envject::domain::result::Result;
/// use envject::domain::errors::EnvjectError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(EnvjectError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, EnvjectError>;
