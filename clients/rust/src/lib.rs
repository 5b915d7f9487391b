mod base;
mod host;
mod meetup;
mod notification;
mod participant;
mod reminder;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
use host::HostClient;
pub use host::SignupHostInput;
use meetup::MeetupClient;
pub use meetup::{CreateMeetupInput, UpdateMeetupInput};
use notification::NotificationClient;
pub use notification::DispatchNotificationInput;
use participant::ParticipantClient;
pub use participant::{
    AttendanceAction, MarkAttendanceInput, OfferAction, RegisterParticipantInput, ResponseAction,
};
use reminder::ReminderClient;
pub use reminder::MarkReminderSentInput;
use status::StatusClient;
use std::sync::Arc;
pub use trustkeeper_api_structs::dtos::*;
pub use trustkeeper_api_structs::SessionRole;
pub use trustkeeper_domain::{MeetupStatus, NotificationKind, ParticipantStatus, ReminderType, ID};

/// Trustkeeper Server SDK
///
/// The SDK contains methods for interacting with the Trustkeeper server
/// API. Host routes need either a session token or the access code of the
/// meetup.
#[derive(Clone)]
pub struct KeeperSDK {
    pub host: HostClient,
    pub meetup: MeetupClient,
    pub notification: NotificationClient,
    pub participant: ParticipantClient,
    pub reminder: ReminderClient,
    pub status: StatusClient,
}

impl KeeperSDK {
    /// Client without any credentials, for the public and self-service routes
    pub fn new<T: Into<String>>(address: T) -> Self {
        Self::from_base(BaseClient::new(address.into()))
    }

    /// Client acting with a session token of a host or the operator
    pub fn with_session<T: Into<String>>(address: T, token: T) -> Self {
        let mut base = BaseClient::new(address.into());
        base.set_session_token(token.into());
        Self::from_base(base)
    }

    /// Client acting with the access code of a single meetup
    pub fn with_host_code<T: Into<String>>(address: T, code: T) -> Self {
        let mut base = BaseClient::new(address.into());
        base.set_host_code(code.into());
        Self::from_base(base)
    }

    fn from_base(base: BaseClient) -> Self {
        let base = Arc::new(base);
        let host = HostClient::new(base.clone());
        let meetup = MeetupClient::new(base.clone());
        let notification = NotificationClient::new(base.clone());
        let participant = ParticipantClient::new(base.clone());
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base);

        Self {
            host,
            meetup,
            notification,
            participant,
            reminder,
            status,
        }
    }
}
