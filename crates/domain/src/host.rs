use crate::shared::entity::{Entity, ID};
use constant_time_eq::constant_time_eq;
use sha2::{Digest, Sha256};
use thiserror::Error;
use trustkeeper_utils::create_random_secret;

const MIN_USERNAME_LEN: usize = 4;
const MIN_PASSWORD_LEN: usize = 6;
const SALT_LEN: usize = 16;

#[derive(Error, Debug, PartialEq)]
pub enum HostValidationError {
    #[error("Username must be at least {0} characters long")]
    UsernameTooShort(usize),
    #[error("Password must be at least {0} characters long")]
    PasswordTooShort(usize),
    #[error("The field `{0}` can not be empty")]
    EmptyField(&'static str),
}

/// A `Host` is an account that creates and owns `Meetup`s
#[derive(Debug, Clone, PartialEq)]
pub struct Host {
    pub id: ID,
    pub username: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_salt: String,
    /// Hex encoded sha256 of salt and password
    pub password_hash: String,
    pub created: i64,
}

impl Host {
    pub fn new(
        username: String,
        password: &str,
        name: String,
        email: String,
        phone: String,
        now: i64,
    ) -> Result<Self, HostValidationError> {
        if username.trim().chars().count() < MIN_USERNAME_LEN {
            return Err(HostValidationError::UsernameTooShort(MIN_USERNAME_LEN));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(HostValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
        }
        if name.trim().is_empty() {
            return Err(HostValidationError::EmptyField("name"));
        }

        let password_salt = create_random_secret(SALT_LEN);
        let password_hash = hash_password(&password_salt, password);
        Ok(Self {
            id: Default::default(),
            username: username.trim().to_string(),
            name,
            email,
            phone,
            password_salt,
            password_hash,
            created: now,
        })
    }

    pub fn verify_password(&self, password: &str) -> bool {
        let hash = hash_password(&self.password_salt, password);
        constant_time_eq(hash.as_bytes(), self.password_hash.as_bytes())
    }
}

impl Entity for Host {
    fn id(&self) -> &ID {
        &self.id
    }
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod test {
    use super::*;

    fn host(username: &str, password: &str) -> Result<Host, HostValidationError> {
        Host::new(
            username.into(),
            password,
            "Park".into(),
            "park@example.com".into(),
            "010-2222-3333".into(),
            0,
        )
    }

    #[test]
    fn verifies_passwords() {
        let host = host("parkhost", "secret123").unwrap();
        assert_ne!(host.password_hash, "secret123");
        assert_eq!(host.password_hash.len(), 64);
        assert!(host.verify_password("secret123"));
        assert!(!host.verify_password("secret124"));
        assert!(!host.verify_password(""));
    }

    #[test]
    fn salts_each_host() {
        let a = host("parkhost", "secret123").unwrap();
        let b = host("kimhost", "secret123").unwrap();
        assert_ne!(a.password_hash, b.password_hash);
    }

    #[test]
    fn validates_credentials() {
        assert_eq!(
            host("abc", "secret123"),
            Err(HostValidationError::UsernameTooShort(4))
        );
        assert_eq!(
            host("parkhost", "12345"),
            Err(HostValidationError::PasswordTooShort(6))
        );
    }
}
