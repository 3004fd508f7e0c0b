//! oru-config
//!
//! Connection settings for the reconciler. Resolution order, lowest to
//! highest: built-in defaults, ORU_ORACLE_* environment variables, explicit
//! CLI overrides. The defaults mirror a stock local Oracle listener.

use serde::{Deserialize, Serialize};

pub const ENV_HOST: &str = "ORU_ORACLE_HOST";
pub const ENV_PORT: &str = "ORU_ORACLE_PORT";
pub const ENV_USER: &str = "ORU_ORACLE_USER";
pub const ENV_PASS: &str = "ORU_ORACLE_PASS";
pub const ENV_SERVICE: &str = "ORU_ORACLE_SERVICE";

/// How to reach the database and as whom. The `password` here is the
/// administrative connect credential, not the managed account's hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub service: String,
}

impl Default for ConnectSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 1521,
            username: "SYSTEM".to_string(),
            password: "manager".to_string(),
            service: "ORCL".to_string(),
        }
    }
}

/// Per-field overrides from the CLI surface. `None` leaves the resolved
/// value alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub service: Option<String>,
}

impl ConnectSettings {
    /// Defaults overlaid with ORU_ORACLE_* environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same resolution against an arbitrary lookup; tests inject maps here
    /// instead of mutating process environment.
    ///
    /// An unparseable port falls back to the default silently, matching how
    /// the rest of the tool treats malformed optional inputs.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup(ENV_HOST).unwrap_or(defaults.host),
            port: lookup(ENV_PORT)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            username: lookup(ENV_USER).unwrap_or(defaults.username),
            password: lookup(ENV_PASS).unwrap_or(defaults.password),
            service: lookup(ENV_SERVICE).unwrap_or(defaults.service),
        }
    }

    pub fn apply_overrides(&mut self, overrides: &ConnectOverrides) {
        if let Some(host) = &overrides.host {
            self.host = host.clone();
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(username) = &overrides.username {
            self.username = username.clone();
        }
        if let Some(password) = &overrides.password {
            self.password = password.clone();
        }
        if let Some(service) = &overrides.service {
            self.service = service.clone();
        }
    }

    /// Easy-connect descriptor consumed by the driver.
    pub fn dsn(&self) -> String {
        format!("//{}:{}/{}", self.host, self.port, self.service)
    }
}
