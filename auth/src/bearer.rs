use crate::domain::errors::AuthError;

/// Extract the token from an `Authorization` header value.
///
/// The scheme is matched case-insensitively.
///
/// # Errors
/// * `Unauthorized` - Not a `Bearer` header, or the token is empty
pub fn extract_bearer(header_value: &str) -> Result<&str, AuthError> {
    let (scheme, token) = header_value
        .trim()
        .split_once(' ')
        .ok_or(AuthError::Unauthorized)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::Unauthorized);
    }

    match token.trim() {
        "" => Err(AuthError::Unauthorized),
        token => Ok(token),
    }
}
