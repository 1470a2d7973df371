//! Result type alias for fhir-fetch
//!
//! This module provides a convenient Result type alias that uses FetchError
//! as the error type.

use super::errors::FetchError;

/// Result type alias for fhir-fetch operations
///
/// # Examples
///
/// ```
/// use fhir_fetch::domain::result::Result;
/// use fhir_fetch::domain::errors::FetchError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(FetchError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, FetchError>;
