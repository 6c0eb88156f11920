use std::fmt;
use std::time::Duration;

use crate::errors::MessagingError;

pub const DEFAULT_SEND_URL: &str = "https://fcm.googleapis.com/fcm/send";
pub const DEFAULT_IID_URL: &str = "https://iid.googleapis.com/iid/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 35;

/// Messenger Configuration
#[derive(Clone)]
pub struct MessengerConfig {
    /// Legacy server key, sent as `Authorization: key=<server_key>`
    pub server_key: Option<String>,
    /// Downstream send endpoint
    pub send_url: String,
    /// Instance ID API base for topic subscriptions
    pub iid_url: String,
    /// Connect timeout, 0 disables it
    pub connect_timeout_secs: u64,
    /// Whole-request timeout, 0 disables it
    pub timeout_secs: u64,
}

impl fmt::Debug for MessengerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessengerConfig")
            .field("server_key", &self.server_key.as_ref().map(|_| "[REDACTED]"))
            .field("send_url", &self.send_url)
            .field("iid_url", &self.iid_url)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for MessengerConfig {
    fn default() -> Self {
        Self {
            server_key: None,
            send_url: DEFAULT_SEND_URL.to_string(),
            iid_url: DEFAULT_IID_URL.to_string(),
            connect_timeout_secs: DEFAULT_TIMEOUT_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl MessengerConfig {
    /// Create new configuration with the given server key
    pub fn new(server_key: impl Into<String>) -> Self {
        Self {
            server_key: Some(server_key.into()),
            ..Self::default()
        }
    }

    /// Load configuration from `FCM_*` environment variables
    pub fn from_env() -> Result<Self, MessagingError> {
        let defaults = Self::default();

        Ok(Self {
            server_key: std::env::var("FCM_SERVER_KEY").ok(),
            send_url: std::env::var("FCM_SEND_URL").unwrap_or(defaults.send_url),
            iid_url: std::env::var("FCM_IID_URL").unwrap_or(defaults.iid_url),
            connect_timeout_secs: env_secs(
                "FCM_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            timeout_secs: env_secs("FCM_TIMEOUT_SECS", defaults.timeout_secs)?,
        })
    }

    /// Set endpoints, e.g. to point at a local test server
    pub fn with_endpoints(
        mut self,
        send_url: impl Into<String>,
        iid_url: impl Into<String>,
    ) -> Self {
        self.send_url = send_url.into();
        self.iid_url = iid_url.into();
        self
    }

    /// Set both timeouts
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self.timeout_secs = secs;
        self
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        non_zero(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        non_zero(self.timeout_secs)
    }
}

fn env_secs(name: &str, default: u64) -> Result<u64, MessagingError> {
    match std::env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| {
            MessagingError::Config(format!(
                "{} must be a number of seconds, got '{}'",
                name, value
            ))
        }),
        Err(_) => Ok(default),
    }
}

fn non_zero(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
