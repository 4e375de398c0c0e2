//! Input Validation
//!
//! Field rules applied right before anything is sent to the hosted service.
//! Every rule returns the first failing message for its field.
//!
//! Lengths count `char`s, so multi-byte titles are measured the way a user
//! sees them.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use crate::domain::Priority;

pub const EMAIL_MAX_LEN: usize = 100;
pub const PASSWORD_MIN_LEN: usize = 6;
pub const PASSWORD_MAX_LEN: usize = 100;
pub const TITLE_MAX_LEN: usize = 200;
pub const DESCRIPTION_MAX_LEN: usize = 1000;
pub const SANITIZED_MAX_LEN: usize = 1000;

/// Due dates are exchanged as `YYYY-MM-DD`, matching `<input type="date">`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub type FieldResult<T> = Result<T, String>;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
            .expect("email pattern is valid")
    })
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Address shape check only; deliverability is the auth service's problem
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, _)) = email.split_once('@') else {
        return false;
    };
    !local.starts_with('.') && !local.contains("..") && email_regex().is_match(email)
}

pub fn validate_sign_up_email(email: &str) -> FieldResult<String> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email is required".into());
    }
    if !is_valid_email(email) {
        return Err("Please enter a valid email address".into());
    }
    if char_len(email) > EMAIL_MAX_LEN {
        return Err("Email must be less than 100 characters".into());
    }
    Ok(email.to_string())
}

pub fn validate_sign_in_email(email: &str) -> FieldResult<String> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email is required".into());
    }
    if !is_valid_email(email) {
        return Err("Please enter a valid email address".into());
    }
    Ok(email.to_string())
}

pub fn validate_new_password(password: &str) -> FieldResult<String> {
    let len = char_len(password);
    if len < PASSWORD_MIN_LEN {
        return Err("Password must be at least 6 characters".into());
    }
    if len > PASSWORD_MAX_LEN {
        return Err("Password must be less than 100 characters".into());
    }
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_lower && has_upper && has_digit) {
        return Err(
            "Password must contain at least one uppercase letter, one lowercase letter, and one number"
                .into(),
        );
    }
    Ok(password.to_string())
}

pub fn validate_existing_password(password: &str) -> FieldResult<String> {
    if password.is_empty() {
        return Err("Password is required".into());
    }
    Ok(password.to_string())
}

pub fn validate_title(title: &str) -> FieldResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Title is required".into());
    }
    if char_len(title) > TITLE_MAX_LEN {
        return Err("Title must be less than 200 characters".into());
    }
    Ok(title.to_string())
}

/// Empty input means "no description"
pub fn validate_description(description: &str) -> FieldResult<Option<String>> {
    let description = description.trim();
    if char_len(description) > DESCRIPTION_MAX_LEN {
        return Err("Description must be less than 1000 characters".into());
    }
    Ok((!description.is_empty()).then(|| description.to_string()))
}

/// Empty input means "no due date". Past dates are rejected unless `allow_past`.
pub fn validate_due_date(value: &str, today: NaiveDate, allow_past: bool) -> FieldResult<Option<NaiveDate>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| "Please enter a valid date".to_string())?;
    if !allow_past && date < today {
        return Err("Due date cannot be in the past".into());
    }
    Ok(Some(date))
}

pub fn validate_priority(value: &str) -> FieldResult<Priority> {
    Priority::parse(value.trim()).ok_or_else(|| "Priority must be low, medium, or high".to_string())
}

/// Trim, drop angle brackets and cap the length
pub fn sanitize_string(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .take(SANITIZED_MAX_LEN)
        .collect()
}
