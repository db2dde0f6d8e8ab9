//! Registration payload validation

use crate::auth::models::RegisterRequest;
use crate::error::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

pub const MIN_PASSWORD_LEN: usize = 6;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .expect("Invalid regex pattern - this is a bug in the codebase")
    })
}

/// Check every field, reporting all failures in one `Validation` error
pub fn validate_registration(req: &RegisterRequest) -> Result<()> {
    let mut errors = Vec::new();

    if req.fullname.trim().is_empty() {
        errors.push("fullname is required".to_string());
    }

    if req.email.trim().is_empty() {
        errors.push("email is required".to_string());
    } else if !email_pattern().is_match(req.email.trim()) {
        errors.push("email must be a valid email".to_string());
    }

    if req.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(format!(
            "password must be at least {} characters long",
            MIN_PASSWORD_LEN
        ));
    }

    if req.repeat_password != req.password {
        errors.push("repeatPassword must match password".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(errors.join("; ")))
    }
}
