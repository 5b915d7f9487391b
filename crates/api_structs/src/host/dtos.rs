use serde::{Deserialize, Serialize};
use trustkeeper_domain::{Host, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HostDTO {
    pub id: ID,
    pub username: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl HostDTO {
    pub fn new(host: Host) -> Self {
        Self {
            id: host.id,
            username: host.username,
            name: host.name,
            email: host.email,
            phone: host.phone,
        }
    }
}
