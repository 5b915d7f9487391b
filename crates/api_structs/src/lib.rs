mod host;
mod meetup;
mod notification;
mod participant;
mod reminder;
mod status;

pub mod dtos {
    pub use crate::host::dtos::*;
    pub use crate::meetup::dtos::*;
    pub use crate::participant::dtos::*;
    pub use crate::reminder::dtos::*;
}

pub use crate::host::api::*;
pub use crate::meetup::api::*;
pub use crate::notification::api::*;
pub use crate::participant::api::*;
pub use crate::reminder::api::*;
pub use crate::status::api::*;
