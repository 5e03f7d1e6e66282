use gatehouse_access::AccessPolicy;
use gatehouse_core::types::DbId;

/// Unit configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database URL (default: `sqlite://gatehouse.db`).
    pub database_url: String,
    /// Base URL of the remote booking backend.
    pub backend_url: String,
    /// Optional bearer token for backend calls.
    pub backend_token: Option<String>,
    /// Site this unit serves; scopes snapshot fetches.
    pub site_id: DbId,
    /// Seconds between scheduled reconcile passes (default: `60`).
    pub sync_interval_secs: u64,
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Authorization predicate variant (default: standard).
    pub access_policy: AccessPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `BACKEND_URL` and `SITE_ID` are required; everything else has a
    /// default suitable for local development:
    ///
    /// | Env Var              | Default                 |
    /// |----------------------|-------------------------|
    /// | `DATABASE_URL`       | `sqlite://gatehouse.db` |
    /// | `BACKEND_TOKEN`      | unset                   |
    /// | `SYNC_INTERVAL_SECS` | `60`                    |
    /// | `HOST`               | `0.0.0.0`               |
    /// | `PORT`               | `3000`                  |
    /// | `ACCESS_POLICY`      | `standard`              |
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://gatehouse.db".into());

        let backend_url = std::env::var("BACKEND_URL").expect("BACKEND_URL must be set");
        let backend_token = std::env::var("BACKEND_TOKEN").ok();

        let site_id: DbId = std::env::var("SITE_ID")
            .expect("SITE_ID must be set")
            .parse()
            .expect("SITE_ID must be a valid integer");

        let sync_interval_secs: u64 = std::env::var("SYNC_INTERVAL_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("SYNC_INTERVAL_SECS must be a valid u64");

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let access_policy = match std::env::var("ACCESS_POLICY").as_deref() {
            Ok("strict") => AccessPolicy::Strict,
            _ => AccessPolicy::Standard,
        };

        Self {
            database_url,
            backend_url,
            backend_token,
            site_id,
            sync_interval_secs,
            host,
            port,
            access_policy,
        }
    }
}
