//! Input validation helpers for the HTTP boundary.
//!
//! Everything here runs before the domain service is invoked: the
//! service trusts shape-checked input and only re-checks existence,
//! duplication, and capacity.

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::lesson::LessonStatus;

/// Minimum and maximum accepted participant age.
pub const AGE_RANGE: (u8, u8) = (16, 100);

/// Trims a required string field, rejecting empty results.
pub fn required_trimmed(field: &str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::new(
            ErrorCode::EmptyField,
            format!("{} cannot be empty", field),
        )
        .with_detail("field", field));
    }
    Ok(trimmed.to_string())
}

/// Trims an optional string field, mapping whitespace-only to `None`.
pub fn optional_trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Validates the shape `local@domain.tld` with no whitespace, matching
/// the boundary rule the UI relies on, and lowercases the result.
pub fn email(value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    let invalid = || {
        DomainError::new(
            ErrorCode::InvalidFormat,
            "Please provide a valid email address",
        )
        .with_detail("field", "email")
    };

    if trimmed.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = trimmed.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let (host, tld) = domain.rsplit_once('.').ok_or_else(invalid)?;
    if host.is_empty() || tld.is_empty() {
        return Err(invalid());
    }

    Ok(trimmed.to_lowercase())
}

/// Validates the 16-100 age range.
pub fn age(value: u8) -> Result<u8, DomainError> {
    let (min, max) = AGE_RANGE;
    if value < min || value > max {
        return Err(DomainError::new(
            ErrorCode::OutOfRange,
            format!("Age must be between {} and {}", min, max),
        )
        .with_detail("field", "age"));
    }
    Ok(value)
}

/// Rejects zero for a positive numeric field.
pub fn positive(field: &str, value: u32) -> Result<u32, DomainError> {
    if value == 0 {
        return Err(DomainError::new(
            ErrorCode::OutOfRange,
            format!("{} must be a positive number", field),
        )
        .with_detail("field", field));
    }
    Ok(value)
}

/// Rejects negative (or non-finite) prices.
pub fn price(value: f64) -> Result<f64, DomainError> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::new(
            ErrorCode::OutOfRange,
            "Price must be a non-negative number",
        )
        .with_detail("field", "price"));
    }
    Ok(value)
}

/// Parses an ISO-8601 lesson date and rejects past dates unless the
/// lesson is (or stays) completed.
pub fn lesson_date(
    value: &str,
    new_status: Option<LessonStatus>,
    existing_status: Option<LessonStatus>,
) -> Result<Timestamp, DomainError> {
    let parsed = Timestamp::parse(value).map_err(|_| {
        DomainError::new(
            ErrorCode::InvalidFormat,
            "Date must be a valid ISO date string",
        )
        .with_detail("field", "dateTime")
    })?;

    let completed = new_status == Some(LessonStatus::Completed)
        || existing_status == Some(LessonStatus::Completed);
    if parsed.is_past() && !completed {
        return Err(DomainError::validation(
            "dateTime",
            "Lesson cannot be scheduled in the past",
        ));
    }

    Ok(parsed)
}
