mod sms;

pub use sms::{HttpSmsProvider, ISmsProvider, InMemorySmsProvider};
