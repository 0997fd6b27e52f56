//! Normalization of raw form input into entity-ready values.
//!
//! The primary CPF is the only hard-rejecting path; every other field
//! falls back to a caller-supplied previous value (edit) or a default
//! (create) when the input is empty or unparseable.

use chrono::NaiveDate;
use validator::Validate;

use crate::errors::AppError;

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), actix_web::Error> {
    payload.validate()
        .map_err(|err| actix_web::error::ErrorBadRequest(err))
}

fn strip_cpf_punctuation(raw: &str) -> String {
    raw.trim().replace(['.', '-'], "")
}

fn is_cpf_shaped(s: &str) -> bool {
    s.len() == 11 && s.chars().all(|c| c.is_ascii_digit())
}

/// Normalize the primary CPF: strip `.`/`-`, trim whitespace, require
/// exactly 11 digits.
pub fn normalize_cpf(raw: &str) -> Result<String, AppError> {
    let cpf = strip_cpf_punctuation(raw);
    if is_cpf_shaped(&cpf) {
        Ok(cpf)
    } else {
        Err(AppError::InvalidIdentifier(format!(
            "CPF must be exactly 11 digits, got {:?}",
            raw.trim()
        )))
    }
}

/// Normalize a supervisor reference. Unlike [`normalize_cpf`], anything
/// that does not strip down to 11 digits is treated as absent rather
/// than rejected, so a top-level manager can be saved with the field
/// left blank or malformed.
pub fn normalize_supervisor_cpf(raw: &str) -> Option<String> {
    let cpf = strip_cpf_punctuation(raw);
    if is_cpf_shaped(&cpf) {
        Some(cpf)
    } else {
        None
    }
}

/// Parse an ISO `YYYY-MM-DD` date. Empty or unparseable input yields the
/// fallback (the prior stored value on edit, `None` on create).
pub fn parse_birth_date(raw: &str, fallback: Option<NaiveDate>) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return fallback;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or(fallback)
}

/// Parse a salary. Empty, unparseable, or negative input yields the
/// fallback, defaulting to 0.0.
pub fn parse_salary(raw: &str, fallback: Option<f64>) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v >= 0.0 => v,
        _ => fallback.unwrap_or(0.0),
    }
}

/// Parse a department number. Empty or unparseable input yields the
/// fallback.
pub fn parse_department(raw: &str, fallback: Option<i32>) -> Option<i32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return fallback;
    }
    raw.parse::<i32>().ok().or(fallback)
}

/// Group an 11-digit CPF as `XXX.XXX.XXX-XX` for display. Anything that
/// is not exactly 11 ASCII characters is returned unchanged.
pub fn format_cpf(cpf: &str) -> String {
    if cpf.len() != 11 || !cpf.is_ascii() {
        return cpf.to_string();
    }
    format!("{}.{}.{}-{}", &cpf[0..3], &cpf[3..6], &cpf[6..9], &cpf[9..11])
}
