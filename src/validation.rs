//! Input validation for todo payloads.
//!
//! Validation is a pure function from an input shape to a list of
//! field/message pairs. An empty list means the payload is acceptable.
//! Handlers run validation before invoking the service and translate a
//! non-empty list into a structured bad-request response.

use crate::model::TodoDraft;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Maximum accepted title length, in characters.
pub const TITLE_MAX_LEN: usize = 200;

/// Maximum accepted description length, in characters.
pub const DESCRIPTION_MAX_LEN: usize = 1000;

/// A single validation failure, identified by the wire-level field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Wire-level name of the offending field.
    pub field: &'static str,
    /// Human-readable message.
    pub message: &'static str,
}

impl FieldError {
    const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Validate a creation or replacement draft.
///
/// `now` is the moment of validation; the expiry must be strictly later.
/// Note the done flag is not an input here: it is derived by the service
/// from the percent, so a draft with `percent_complete == 100` is valid
/// without any done-flag requirement.
#[must_use]
pub fn validate_draft(draft: &TodoDraft, now: DateTime<Utc>) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if draft.title.is_empty() {
        errors.push(FieldError::new("title", "Title is required"));
    } else if draft.title.chars().count() > TITLE_MAX_LEN {
        errors.push(FieldError::new(
            "title",
            "Title must not exceed 200 characters",
        ));
    }

    if draft.description.chars().count() > DESCRIPTION_MAX_LEN {
        errors.push(FieldError::new(
            "description",
            "Description must not exceed 1000 characters",
        ));
    }

    if draft.expiry_date_time <= now {
        errors.push(FieldError::new(
            "expiryDateTime",
            "Expiry date and time must be in the future",
        ));
    }

    errors.extend(validate_percent(draft.percent_complete));

    errors
}

/// Validate a completion percentage, for both drafts and percent-only
/// updates.
#[must_use]
pub fn validate_percent(percent: i32) -> Vec<FieldError> {
    if (0..=100).contains(&percent) {
        Vec::new()
    } else {
        vec![FieldError::new(
            "percentComplete",
            "Percent complete must be between 0 and 100",
        )]
    }
}
