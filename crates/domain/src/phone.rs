use thiserror::Error;

const SEPARATORS: [char; 4] = ['-', '.', '(', ')'];
const MIN_DIGITS: usize = 8;
const MAX_DIGITS: usize = 15;

#[derive(Error, Debug, PartialEq)]
pub enum InvalidPhoneError {
    #[error("Phone number: `{0}` is not a valid phone number (example: 010-1234-5678)")]
    Malformed(String),
}

/// Strips whitespace and separator characters so that `010-1234 5678`
/// and `01012345678` compare equal.
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_whitespace() && !SEPARATORS.contains(c))
        .collect()
}

pub fn validate_phone(phone: &str) -> Result<(), InvalidPhoneError> {
    let normalized = normalize_phone(phone);
    let digits = normalized.strip_prefix('+').unwrap_or(&normalized);
    let valid = (MIN_DIGITS..=MAX_DIGITS).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(InvalidPhoneError::Malformed(phone.to_string()))
    }
}

pub fn phones_match(a: &str, b: &str) -> bool {
    normalize_phone(a) == normalize_phone(b)
}
