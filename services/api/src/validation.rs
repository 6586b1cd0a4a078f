//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{CreateUserRequest, VerifyOtpRequest};

/// Validate a mobile number: exactly ten digits
pub fn validate_mobile_number(mobile_number: &str) -> Result<(), String> {
    if mobile_number.trim().is_empty() {
        return Err("Mobile number is required".to_string());
    }

    static MOBILE_NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = MOBILE_NUMBER_REGEX
        .get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("Failed to compile mobile number regex"));

    if !regex.is_match(mobile_number.trim()) {
        return Err("Mobile number must be 10 digits".to_string());
    }

    Ok(())
}

/// Validate a first or last name
pub fn validate_name(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }

    if value.len() > 100 {
        return Err(format!("{} must be at most 100 characters long", field));
    }

    Ok(())
}

/// Validate an account registration payload
pub fn validate_create_user(request: &CreateUserRequest) -> Result<(), String> {
    validate_name("First name", &request.first_name)?;
    validate_name("Last name", &request.last_name)?;
    validate_mobile_number(&request.mobile_number)
}

/// Validate an OTP verification payload
pub fn validate_verify_otp(request: &VerifyOtpRequest) -> Result<(), String> {
    if request.request_id.trim().is_empty() {
        return Err("Request id is required".to_string());
    }

    if request.prefix.trim().is_empty() {
        return Err("Prefix is required".to_string());
    }

    Ok(())
}
