//! Input validation utilities
//!
//! Provides sanitation for lines read from the console.

/// Strip the line terminator and surrounding whitespace from console input.
pub fn sanitize_input(input: &str) -> String {
    input.trim().to_string()
}

/// Reject input carrying control characters that have no place in a field.
pub fn is_valid_input(input: &str) -> bool {
    !input.contains(['\0', '\r', '\n'])
}
