//! Connection and scan settings, resolved once from environment variables.
//!
//! | variable | default | meaning |
//! |---|---|---|
//! | `HOST` | `localhost` | store hostname |
//! | `PORT` | `6379` | store port |
//! | `USER` | unset | auth username |
//! | `PASSWORD` | unset | auth password |
//! | `AUDIT_NAMESPACE` | `*` | namespace segment of the conversation keys |
//!
//! `HOST`, `PORT`, `USER` and `PASSWORD` may also be given with a `REDIS_` prefix, which wins
//! over the plain name when both are set and non-empty. Credentials are taken as a pair: if
//! either `REDIS_USER` or `REDIS_PASSWORD` is set, the plain `USER` and `PASSWORD` are ignored.
use std::env;

use tracing::debug;

use crate::conversation::messages_pattern;
use crate::error::{AuditError, Result};

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 6379;
const DEFAULT_NAMESPACE: &str = "*";

/// [`Config`] holds the parsed and validated settings of one audit run
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// hostname of the store
    pub host: String,
    /// port of the store
    pub port: u16,
    /// optional ACL username
    pub username: Option<String>,
    /// optional password, `None` means no AUTH is sent
    pub password: Option<String>,
    /// namespace segment that prefixes every conversation key
    pub namespace: String,
}

impl Config {
    /// resolves the configuration from the process environment
    ///
    /// # Errors
    /// returns [`AuditError::InvalidConfig`] if `PORT` is not a valid port number
    pub fn from_env() -> Result<Config> {
        Config::from_lookup(|name| env::var(name).ok())
    }

    /// resolves the configuration using `lookup` to read each variable by name
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &'static str| lookup(name).filter(|v| !v.is_empty()).map(|v| (name, v));

        let host = var("REDIS_HOST")
            .or_else(|| var("HOST"))
            .map(|(_, v)| v)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match var("REDIS_PORT").or_else(|| var("PORT")) {
            Some((name, value)) => parse_port(name, &value)?,
            None => DEFAULT_PORT,
        };

        // username and password always come from the same family, so a login shell's USER is
        // never paired with a REDIS_PASSWORD
        let (username, password) = match (var("REDIS_USER"), var("REDIS_PASSWORD")) {
            (None, None) => (var("USER"), var("PASSWORD")),
            prefixed => prefixed,
        };

        let namespace = lookup("AUDIT_NAMESPACE")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

        let config = Config {
            host,
            port,
            username: username.map(|(_, v)| v),
            password: password.map(|(_, v)| v),
            namespace,
        };
        debug!(?config, "resolved configuration");
        Ok(config)
    }

    /// the glob pattern matching every conversation message list in this namespace
    pub fn pattern(&self) -> String {
        messages_pattern(&self.namespace)
    }
}

// the password is never written to the logs
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("namespace", &self.namespace)
            .finish()
    }
}

fn parse_port(var: &'static str, value: &str) -> Result<u16> {
    value.trim().parse::<u16>().map_err(|e| AuditError::InvalidConfig {
        var,
        value: value.to_string(),
        reason: format!("must be an integer between 0 and {} ({})", u16::MAX, e),
    })
}
