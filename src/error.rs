use std::io;

use redis::{ErrorKind, RedisError};
use thiserror::Error;

/// type alias for all operations of an audit run that could fail with an [`AuditError`]
pub type Result<T> = std::result::Result<T, AuditError>;

/// The error variants of an audit run.
///
/// Every variant is fatal. Its `Display` output is the one line diagnostic printed to STDERR,
/// and [`AuditError::exit_code`] gives the process exit status for it.
#[derive(Debug, Error)]
pub enum AuditError {
    /// an environment variable held a value that could not be used
    #[error("{var} {reason}, got '{value}'")]
    InvalidConfig {
        /// name of the offending environment variable
        var: &'static str,
        /// the rejected value
        value: String,
        /// what was expected of the value
        reason: String,
    },

    /// a key pattern could not be compiled
    #[error("invalid key pattern '{pattern}': {source}")]
    InvalidPattern {
        /// the rejected pattern
        pattern: String,
        /// why it was rejected
        source: glob::PatternError,
    },

    /// the store rejected the configured credentials
    #[error("Authentication failed. Please check USER and PASSWORD.")]
    Authentication(#[source] RedisError),

    /// any other failure while opening or checking the connection
    #[error("could not connect to the store: {0}")]
    Connection(#[source] RedisError),

    /// a key scan or list fetch failed part way through the run
    #[error("failed while processing keys: {0}")]
    Iteration(#[source] RedisError),

    /// the transcript could not be written to STDOUT
    #[error("could not write the transcript: {0}")]
    Output(#[from] io::Error),
}

impl AuditError {
    /// classifies an error raised while connecting or pinging the store.
    /// Credential problems become [`AuditError::Authentication`], everything else is a
    /// [`AuditError::Connection`]
    pub fn from_connect(err: RedisError) -> Self {
        if is_auth_error(&err) {
            AuditError::Authentication(err)
        } else {
            AuditError::Connection(err)
        }
    }

    /// the process exit status for this error, distinct for each failure path
    pub fn exit_code(&self) -> i32 {
        match self {
            AuditError::InvalidConfig { .. } | AuditError::InvalidPattern { .. } => 2,
            AuditError::Authentication(_) => 3,
            AuditError::Connection(_) => 4,
            AuditError::Iteration(_) => 5,
            AuditError::Output(_) => 6,
        }
    }
}

// reply codes a server uses to refuse a command over missing or bad credentials
const AUTH_REPLY_CODES: [&str; 2] = ["NOAUTH", "WRONGPASS"];

// the client only reports AuthenticationFailed for a rejected AUTH during the handshake,
// servers answer a command sent without credentials with a NOAUTH reply
fn is_auth_error(err: &RedisError) -> bool {
    if err.kind() == ErrorKind::AuthenticationFailed {
        return true;
    }
    if err.kind() != ErrorKind::ExtensionError {
        return false;
    }
    // the reply code leads the rendered error whichever way it was built
    let reply = err.code().map(String::from).unwrap_or_else(|| err.to_string());
    AUTH_REPLY_CODES.iter().any(|code| reply.starts_with(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_are_classified_separately() {
        let err = RedisError::from((ErrorKind::AuthenticationFailed, "Password authentication failed"));
        let err = AuditError::from_connect(err);
        assert!(matches!(err, AuditError::Authentication(_)));
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.to_string(), "Authentication failed. Please check USER and PASSWORD.");
    }

    #[test]
    fn noauth_and_wrongpass_replies_are_auth_failures() {
        for code in &["NOAUTH", "WRONGPASS"] {
            let err = RedisError::from((
                ErrorKind::ExtensionError,
                *code,
                "Authentication required.".to_string(),
            ));
            let err = AuditError::from_connect(err);
            assert!(matches!(err, AuditError::Authentication(_)), "{} was not an auth failure", code);
            assert_eq!(err.exit_code(), 3);
        }
    }

    #[test]
    fn other_extension_replies_are_generic() {
        let err = RedisError::from((ErrorKind::ExtensionError, "LOADING", "still loading".to_string()));
        assert!(matches!(AuditError::from_connect(err), AuditError::Connection(_)));
    }

    #[test]
    fn other_connect_failures_are_generic() {
        let err = RedisError::from((ErrorKind::IoError, "connection refused"));
        let err = AuditError::from_connect(err);
        assert!(matches!(err, AuditError::Connection(_)));
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().starts_with("could not connect to the store: "));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn invalid_config_names_the_variable() {
        let err = AuditError::InvalidConfig {
            var: "PORT",
            value: "notanumber".to_string(),
            reason: "must be an integer".to_string(),
        };
        assert_eq!(err.to_string(), "PORT must be an integer, got 'notanumber'");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn bad_patterns_are_configuration_errors() {
        let source = glob::Pattern::new("[a").unwrap_err();
        let err = AuditError::InvalidPattern { pattern: "[a".to_string(), source };
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().starts_with("invalid key pattern '[a': "));
    }

    #[test]
    fn every_failure_path_has_its_own_exit_code() {
        let codes = [
            AuditError::InvalidConfig { var: "PORT", value: String::new(), reason: String::new() }.exit_code(),
            AuditError::Authentication(RedisError::from((ErrorKind::AuthenticationFailed, "x"))).exit_code(),
            AuditError::Connection(RedisError::from((ErrorKind::IoError, "x"))).exit_code(),
            AuditError::Iteration(RedisError::from((ErrorKind::IoError, "x"))).exit_code(),
            AuditError::Output(io::Error::new(io::ErrorKind::BrokenPipe, "x")).exit_code(),
        ];
        for (i, code) in codes.iter().enumerate() {
            assert_ne!(*code, 0);
            assert!(!codes[i + 1..].contains(code));
        }
    }
}
