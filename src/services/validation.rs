//! Field validation shared by create and update.
//!
//! Every applicable rule runs and every failure is collected, so one request
//! reports all of its problems. Rules run in a fixed order and the error list
//! preserves it.

use crate::models::{input::VideoInput, timestamp, video::Resolution};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

const TITLE_MAX_CHARS: usize = 40;
const AUTHOR_MAX_CHARS: usize = 20;
const MIN_AGE_LOWER: i64 = 0;
const MIN_AGE_UPPER: i64 = 18;

/// Which rules apply to a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSet {
    /// title, author, availableResolutions
    Create,
    /// the create rules plus minAgeRestriction, canBeDownloaded, publicationDate
    Update,
}

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub message: String,
    pub field: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field,
        }
    }
}

/// Ordered list of failures, serialized as `{"errorsMessages": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("validation failed with {} error(s)", .errors_messages.len())]
pub struct ValidationErrors {
    pub errors_messages: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn fields(&self) -> Vec<&'static str> {
        self.errors_messages.iter().map(|e| e.field).collect()
    }
}

/// A payload that passed validation, with typed fields.
///
/// Under `RuleSet::Create` the update-only fields hold their defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoDraft {
    pub title: String,
    pub author: String,
    pub available_resolutions: Vec<Resolution>,
    pub min_age_restriction: Option<u8>,
    pub can_be_downloaded: bool,
    pub publication_date: Option<DateTime<Utc>>,
}

/// Validate `input` under `rules`.
pub fn validate(input: &VideoInput, rules: RuleSet) -> Result<VideoDraft, ValidationErrors> {
    let mut errors = Vec::new();

    let title = check_text(&input.title, "title", "Title", TITLE_MAX_CHARS, &mut errors);
    let author = check_text(&input.author, "author", "Author", AUTHOR_MAX_CHARS, &mut errors);

    let min_age_restriction = match rules {
        RuleSet::Create => Some(None),
        RuleSet::Update => check_min_age(&input.min_age_restriction, &mut errors),
    };

    let available_resolutions = check_resolutions(&input.available_resolutions, &mut errors);

    let (can_be_downloaded, publication_date) = match rules {
        RuleSet::Create => (Some(false), Some(None)),
        RuleSet::Update => (
            check_flag(&input.can_be_downloaded, &mut errors),
            check_publication_date(&input.publication_date, &mut errors),
        ),
    };

    match (
        title,
        author,
        available_resolutions,
        min_age_restriction,
        can_be_downloaded,
        publication_date,
    ) {
        (
            Some(title),
            Some(author),
            Some(available_resolutions),
            Some(min_age_restriction),
            Some(can_be_downloaded),
            Some(publication_date),
        ) if errors.is_empty() => Ok(VideoDraft {
            title,
            author,
            available_resolutions,
            min_age_restriction,
            can_be_downloaded,
            publication_date,
        }),
        _ => Err(ValidationErrors {
            errors_messages: errors,
        }),
    }
}

/// Required, non-empty string no longer than `max` characters.
///
/// Length is counted in Unicode scalar values, so an emoji counts once.
fn check_text(
    value: &Value,
    field: &'static str,
    label: &str,
    max: usize,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match value.as_str() {
        Some(text) if !text.is_empty() => {
            if text.chars().count() > max {
                errors.push(FieldError::new(
                    field,
                    format!("{label} can't be more than {max} characters"),
                ));
                None
            } else {
                Some(text.to_owned())
            }
        }
        _ => {
            errors.push(FieldError::new(field, format!("{label} can't be empty")));
            None
        }
    }
}

/// Optional integer in `0..=18`. Outer `None` means the check failed.
///
/// Integral floats such as `5.0` count as integers; `5.5` or `"5"` do not.
fn check_min_age(value: &Value, errors: &mut Vec<FieldError>) -> Option<Option<u8>> {
    const FIELD: &str = "minAgeRestriction";

    if value.is_null() {
        return Some(None);
    }
    let Some(age) = value
        .as_f64()
        .filter(|n| n.is_finite() && n.fract() == 0.0)
    else {
        errors.push(FieldError::new(FIELD, "MinAgeRestriction must be an integer"));
        return None;
    };

    let mut ok = true;
    if age > MIN_AGE_UPPER as f64 {
        errors.push(FieldError::new(
            FIELD,
            format!("MinAgeRestriction can't be more than {MIN_AGE_UPPER}"),
        ));
        ok = false;
    }
    if age < MIN_AGE_LOWER as f64 {
        errors.push(FieldError::new(
            FIELD,
            format!("MinAgeRestriction can't be less than {MIN_AGE_LOWER}"),
        ));
        ok = false;
    }

    // within 0..=18 and integral, so the cast is exact
    if ok { Some(Some(age as u8)) } else { None }
}

/// Keeps only known labels, de-duplicated in first-seen order; at least one must remain.
fn check_resolutions(value: &Value, errors: &mut Vec<FieldError>) -> Option<Vec<Resolution>> {
    let mut accepted: Vec<Resolution> = Vec::new();
    for resolution in value
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .filter_map(Resolution::from_label)
    {
        if !accepted.contains(&resolution) {
            accepted.push(resolution);
        }
    }

    if accepted.is_empty() {
        errors.push(FieldError::new(
            "availableResolutions",
            "AvailableResolutions can't be invalid",
        ));
        None
    } else {
        Some(accepted)
    }
}

/// Optional boolean; absent means `false`.
fn check_flag(value: &Value, errors: &mut Vec<FieldError>) -> Option<bool> {
    match value {
        Value::Null => Some(false),
        Value::Bool(flag) => Some(*flag),
        _ => {
            errors.push(FieldError::new(
                "canBeDownloaded",
                "CanBeDownloaded can be only boolean",
            ));
            None
        }
    }
}

/// Optional strict ISO timestamp. Outer `None` means the check failed.
fn check_publication_date(
    value: &Value,
    errors: &mut Vec<FieldError>,
) -> Option<Option<DateTime<Utc>>> {
    if value.is_null() {
        return Some(None);
    }
    match value.as_str().and_then(timestamp::parse_strict) {
        Some(ts) => Some(Some(ts)),
        None => {
            errors.push(FieldError::new(
                "publicationDate",
                "PublicationDate can be only date",
            ));
            None
        }
    }
}
