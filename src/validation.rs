use regex::Regex;

use crate::db::property_repo::NewProperty;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("{0} is empty")]
    Empty(&'static str),
    #[error("{0} too long (max 255 characters)")]
    TooLong(&'static str),
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("password too short (min 8 characters)")]
    PasswordTooShort,
    #[error("{0} must not be negative")]
    Negative(&'static str),
    #[error("cost_per_night must be greater than zero")]
    NonPositiveCost,
}

const MAX_LEN: usize = 255;
const MIN_PASSWORD_LEN: usize = 8;

lazy_static::lazy_static! {
    /// local@domain.tld, no whitespace
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

fn validate_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field));
    }
    if value.chars().count() > MAX_LEN {
        return Err(ValidationError::TooLong(field));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    validate_text("name", name)
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    validate_text("email", email)?;
    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_new_property(p: &NewProperty) -> Result<(), ValidationError> {
    validate_text("title", &p.title)?;
    for (field, value) in [
        ("country", &p.country),
        ("street", &p.street),
        ("city", &p.city),
        ("province", &p.province),
        ("post_code", &p.post_code),
    ] {
        validate_text(field, value)?;
    }
    if p.cost_per_night <= 0 {
        return Err(ValidationError::NonPositiveCost);
    }
    for (field, value) in [
        ("parking_spaces", p.parking_spaces),
        ("number_of_bathrooms", p.number_of_bathrooms),
        ("number_of_bedrooms", p.number_of_bedrooms),
    ] {
        if value < 0 {
            return Err(ValidationError::Negative(field));
        }
    }
    Ok(())
}
