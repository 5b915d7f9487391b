use super::IHostRepo;
use crate::repos::shared::inmemory_repo::*;
use trustkeeper_domain::{Host, ID};

pub struct InMemoryHostRepo {
    hosts: std::sync::Mutex<Vec<Host>>,
}

impl InMemoryHostRepo {
    pub fn new() -> Self {
        Self {
            hosts: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IHostRepo for InMemoryHostRepo {
    async fn insert(&self, host: &Host) -> anyhow::Result<()> {
        if count_by(&self.hosts, |h| h.username == host.username) > 0 {
            anyhow::bail!("Username: {} is already taken", host.username);
        }
        insert(host, &self.hosts);
        Ok(())
    }

    async fn find(&self, host_id: &ID) -> Option<Host> {
        find(host_id, &self.hosts)
    }

    async fn find_by_username(&self, username: &str) -> Option<Host> {
        find_by(&self.hosts, |h| h.username == username)
            .into_iter()
            .next()
    }
}
