//! Normalization shared by services that accept free-form input.

use taskhub_core::error::AppError;

/// Trim and lowercase an email address.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trim and lowercase a subdomain, rejecting anything not alphanumeric.
pub(crate) fn normalize_subdomain(subdomain: &str) -> Result<String, AppError> {
    let subdomain = subdomain.trim().to_lowercase();
    if subdomain.is_empty() || !subdomain.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::validation(
            "Subdomain must contain only letters and digits",
        ));
    }
    Ok(subdomain)
}

/// Trim a required text field, rejecting blanks.
pub(crate) fn required(field: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}
