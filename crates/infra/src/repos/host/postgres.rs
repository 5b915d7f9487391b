use super::IHostRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;
use trustkeeper_domain::{Host, ID};

pub struct PostgresHostRepo {
    pool: PgPool,
}

impl PostgresHostRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct HostRaw {
    host_uid: Uuid,
    username: String,
    name: String,
    email: String,
    phone: String,
    password_salt: String,
    password_hash: String,
    created: i64,
}

impl From<HostRaw> for Host {
    fn from(raw: HostRaw) -> Self {
        Self {
            id: raw.host_uid.into(),
            username: raw.username,
            name: raw.name,
            email: raw.email,
            phone: raw.phone,
            password_salt: raw.password_salt,
            password_hash: raw.password_hash,
            created: raw.created,
        }
    }
}

#[async_trait::async_trait]
impl IHostRepo for PostgresHostRepo {
    async fn insert(&self, host: &Host) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO hosts(host_uid, username, name, email, phone, password_salt, password_hash, created)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(host.id.inner_ref())
        .bind(&host.username)
        .bind(&host.name)
        .bind(&host.email)
        .bind(&host.phone)
        .bind(&host.password_salt)
        .bind(&host.password_hash)
        .bind(host.created)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert host with username: {}. DB returned error: {:?}",
                host.username, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, host_id: &ID) -> Option<Host> {
        sqlx::query_as::<_, HostRaw>("SELECT * FROM hosts WHERE host_uid = $1")
            .bind(host_id.inner_ref())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Find host with id: {} failed. DB returned error: {:?}", host_id, e);
                e
            })
            .ok()?
            .map(Host::from)
    }

    async fn find_by_username(&self, username: &str) -> Option<Host> {
        sqlx::query_as::<_, HostRaw>("SELECT * FROM hosts WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    "Find host with username: {} failed. DB returned error: {:?}",
                    username, e
                );
                e
            })
            .ok()?
            .map(Host::from)
    }
}
