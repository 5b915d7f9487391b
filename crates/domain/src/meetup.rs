use crate::shared::entity::{Entity, ID};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use trustkeeper_utils::create_hex_token;

pub const MIN_CAPACITY: i64 = 2;
const HOST_CODE_BYTES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetupStatus {
    Upcoming,
    Completed,
    Cancelled,
}

impl MeetupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Default for MeetupStatus {
    fn default() -> Self {
        Self::Upcoming
    }
}

impl FromStr for MeetupStatus {
    type Err = MeetupValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(MeetupValidationError::UnknownStatus(s.to_string())),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum MeetupValidationError {
    #[error("Capacity must be at least 2, got {0}")]
    CapacityTooSmall(i64),
    #[error("Waitlist capacity can not be negative, got {0}")]
    NegativeWaitlistCapacity(i64),
    #[error("Fee must be a non-negative whole number, got `{0}`")]
    InvalidFee(String),
    #[error("The field `{0}` can not be empty")]
    EmptyField(&'static str),
    #[error("Meetup status: `{0}` is not one of upcoming, completed, cancelled")]
    UnknownStatus(String),
}

/// A `Meetup` is an event created by a host that participants register to.
///
/// `capacity` bounds the participants holding a slot, everyone beyond that
/// lands on the waitlist which is bounded by `waitlist_capacity` when set.
#[derive(Debug, Clone, PartialEq)]
pub struct Meetup {
    pub id: ID,
    pub title: String,
    pub description: Option<String>,
    /// Start of the meetup in millis
    pub start_ts: i64,
    pub location: String,
    pub capacity: i64,
    /// `None` means the waitlist is unbounded
    pub waitlist_capacity: Option<i64>,
    pub fee_display: Option<String>,
    pub host_name: String,
    pub host_phone: String,
    /// Shared secret that authorizes host actions without a session
    pub host_code: String,
    pub host_id: Option<ID>,
    pub status: MeetupStatus,
    pub confirmation_sent: bool,
    pub created: i64,
    pub updated: i64,
}

impl Meetup {
    pub fn generate_host_code() -> String {
        create_hex_token(HOST_CODE_BYTES)
    }

    pub fn verify_host_code(&self, code: &str) -> bool {
        constant_time_eq(self.host_code.as_bytes(), code.as_bytes())
    }

    pub fn is_owned_by(&self, host_id: &ID) -> bool {
        self.host_id.as_ref() == Some(host_id)
    }

    pub fn is_open_for_registration(&self) -> bool {
        self.status == MeetupStatus::Upcoming
    }

    pub fn validate(&self) -> Result<(), MeetupValidationError> {
        if self.title.trim().is_empty() {
            return Err(MeetupValidationError::EmptyField("title"));
        }
        if self.location.trim().is_empty() {
            return Err(MeetupValidationError::EmptyField("location"));
        }
        if self.host_name.trim().is_empty() {
            return Err(MeetupValidationError::EmptyField("hostName"));
        }
        validate_capacity(self.capacity, self.waitlist_capacity)
    }
}

impl Entity for Meetup {
    fn id(&self) -> &ID {
        &self.id
    }
}

pub fn validate_capacity(
    capacity: i64,
    waitlist_capacity: Option<i64>,
) -> Result<(), MeetupValidationError> {
    if capacity < MIN_CAPACITY {
        return Err(MeetupValidationError::CapacityTooSmall(capacity));
    }
    match waitlist_capacity {
        Some(cap) if cap < 0 => Err(MeetupValidationError::NegativeWaitlistCapacity(cap)),
        _ => Ok(()),
    }
}

/// Parses a fee given as a whole amount (`15000`, `15,000`) and renders it
/// the way it is shown to participants (`15,000원`).
/// An empty fee means the meetup is free and yields `None`.
pub fn format_fee(fee: &str) -> Result<Option<String>, MeetupValidationError> {
    let raw = fee.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let digits: String = raw.chars().filter(|c| *c != ',').collect();
    let amount = digits
        .parse::<u64>()
        .map_err(|_| MeetupValidationError::InvalidFee(fee.to_string()))?;

    let plain = amount.to_string();
    let mut grouped = String::with_capacity(plain.len() + plain.len() / 3);
    for (i, c) in plain.chars().enumerate() {
        if i > 0 && (plain.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    Ok(Some(format!("{}원", grouped)))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn validates_capacity() {
        assert!(validate_capacity(2, None).is_ok());
        assert!(validate_capacity(10, Some(0)).is_ok());
        assert_eq!(
            validate_capacity(1, None),
            Err(MeetupValidationError::CapacityTooSmall(1))
        );
        assert_eq!(
            validate_capacity(5, Some(-1)),
            Err(MeetupValidationError::NegativeWaitlistCapacity(-1))
        );
    }

    #[test]
    fn formats_fees() {
        assert_eq!(format_fee("").unwrap(), None);
        assert_eq!(format_fee("0").unwrap(), Some("0원".into()));
        assert_eq!(format_fee("500").unwrap(), Some("500원".into()));
        assert_eq!(format_fee("15000").unwrap(), Some("15,000원".into()));
        assert_eq!(format_fee("1,234,567").unwrap(), Some("1,234,567원".into()));
        assert!(format_fee("-100").is_err());
        assert!(format_fee("12.5").is_err());
        assert!(format_fee("free").is_err());
    }

    #[test]
    fn host_code_verification() {
        let code = Meetup::generate_host_code();
        assert_eq!(code.len(), 8);
        let meetup = Meetup {
            id: Default::default(),
            title: "Book club".into(),
            description: None,
            start_ts: 0,
            location: "Library".into(),
            capacity: 4,
            waitlist_capacity: None,
            fee_display: None,
            host_name: "Kim".into(),
            host_phone: "010-1111-2222".into(),
            host_code: code.clone(),
            host_id: None,
            status: Default::default(),
            confirmation_sent: false,
            created: 0,
            updated: 0,
        };
        assert!(meetup.verify_host_code(&code));
        assert!(!meetup.verify_host_code("deadbeef0"));
        assert!(!meetup.verify_host_code(""));
        assert!(meetup.validate().is_ok());
    }
}
