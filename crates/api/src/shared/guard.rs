use crate::error::KeeperError;
use trustkeeper_domain::phone::validate_phone;

pub struct Guard {}

impl Guard {
    pub fn against_empty(field: &str, val: &str) -> Result<(), KeeperError> {
        if val.trim().is_empty() {
            return Err(KeeperError::BadClientData(format!(
                "The field `{}` can not be empty",
                field
            )));
        }
        Ok(())
    }

    pub fn against_malformed_phone(phone: &str) -> Result<(), KeeperError> {
        validate_phone(phone).map_err(|e| KeeperError::BadClientData(e.to_string()))
    }
}
