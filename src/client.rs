use redis::{Client, Connection, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use tracing::{debug, info};

use crate::engine::ConversationStore;
use crate::{AuditError, Config, Result};

/// `RedisStore` reads conversations from a Redis server over a single synchronous connection.
///
/// The connection is opened by [`RedisStore::connect`] and closed when the `RedisStore` is
/// dropped, so one audit run owns exactly one connection for its whole lifetime.
pub struct RedisStore {
    conn: Connection,
}

impl RedisStore {
    /// opens a connection to the server described by `config` and verifies it with a `PING`
    ///
    /// # Errors
    /// `AuditError::Authentication` if the server rejected the credentials,
    /// `AuditError::Connection` for any other failure
    pub fn connect(config: &Config) -> Result<Self> {
        info!("connecting to {}:{}", config.host, config.port);
        let client = Client::open(connection_info(config)).map_err(AuditError::from_connect)?;
        let conn = client.get_connection().map_err(AuditError::from_connect)?;

        let mut store = RedisStore { conn };
        store.ping()?;
        Ok(store)
    }
}

impl ConversationStore for RedisStore {
    fn ping(&mut self) -> Result<()> {
        let pong: String = redis::cmd("PING")
            .query(&mut self.conn)
            .map_err(AuditError::from_connect)?;
        debug!("server answered {}", pong);
        Ok(())
    }

    fn scan_page(&mut self, cursor: u64, pattern: &str) -> Result<(u64, Vec<String>)> {
        redis::cmd("SCAN")
            .arg(cursor)
            .arg("MATCH")
            .arg(pattern)
            .query(&mut self.conn)
            .map_err(AuditError::Iteration)
    }

    fn messages(&mut self, key: &str) -> Result<Vec<String>> {
        redis::cmd("LRANGE")
            .arg(key)
            .arg(0)
            .arg(-1)
            .query(&mut self.conn)
            .map_err(AuditError::Iteration)
    }
}

/// builds the connection parameters for `config`.
/// No AUTH is sent unless a password is configured
fn connection_info(config: &Config) -> ConnectionInfo {
    ConnectionInfo {
        addr: ConnectionAddr::Tcp(config.host.clone(), config.port),
        redis: RedisConnectionInfo {
            db: 0,
            username: config.username.clone(),
            password: config.password.clone(),
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(username: Option<&str>, password: Option<&str>) -> Config {
        Config {
            host: "cache.local".to_string(),
            port: 6380,
            username: username.map(String::from),
            password: password.map(String::from),
            namespace: "*".to_string(),
        }
    }

    #[test]
    fn connection_info_carries_address_and_credentials() {
        let info = connection_info(&config(Some("auditor"), Some("pw")));
        match info.addr {
            ConnectionAddr::Tcp(host, port) => {
                assert_eq!(host, "cache.local");
                assert_eq!(port, 6380);
            }
            other => panic!("unexpected address {:?}", other),
        }
        assert_eq!(info.redis.username.as_deref(), Some("auditor"));
        assert_eq!(info.redis.password.as_deref(), Some("pw"));
        assert_eq!(info.redis.db, 0);
    }

    #[test]
    fn anonymous_connection_info() {
        let info = connection_info(&config(None, None));
        assert!(info.redis.username.is_none());
        assert!(info.redis.password.is_none());
    }

    // needs a local redis-server on the default port
    #[test]
    #[ignore]
    fn connects_to_a_local_server() {
        let cfg = Config::from_env().unwrap();
        let mut store = RedisStore::connect(&cfg).unwrap();
        store.ping().unwrap();
    }
}
