use serde::{Deserialize, Serialize};
use trustkeeper_domain::ID;

pub mod dispatch_notification {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub meetup_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// The kind of message, e.g. `d7` or `waitlist_promote`
        #[serde(rename = "type")]
        pub kind: String,
        /// Restricts the recipients to these participants
        pub targets: Option<Vec<ID>>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        /// Number of messages handed to the sms provider
        pub count: usize,
    }
}
