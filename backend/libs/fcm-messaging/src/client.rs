use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::MessengerConfig;
use crate::errors::MessagingError;
use crate::message::Message;
use crate::models::{SendResponse, SerializeOptions};

/// Firebase Cloud Messaging legacy HTTP client
///
/// Serializes messages and posts them to FCM with a server key. Each call is
/// a single blocking request; nothing is retried.
pub struct Messenger {
    authorization_key: Option<String>,
    config: MessengerConfig,
    http_client: Client,
}

impl Messenger {
    /// Create new messenger with the default endpoints and timeouts
    ///
    /// # Arguments
    /// * `authorization_key` - FCM legacy server key
    pub fn new(authorization_key: impl Into<String>) -> Result<Self, MessagingError> {
        Self::with_config(MessengerConfig::new(authorization_key))
    }

    /// Create messenger from an explicit configuration
    ///
    /// The configuration may leave `server_key` unset; a key must then be
    /// provided through [`set_authorization_key`](Self::set_authorization_key)
    /// before anything is sent.
    pub fn with_config(mut config: MessengerConfig) -> Result<Self, MessagingError> {
        let http_client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                MessagingError::Transport(format!("Failed to build HTTP client: {}", e))
            })?;

        debug!(
            send_url = %config.send_url,
            iid_url = %config.iid_url,
            timeout_secs = config.timeout_secs,
            "Initialized FCM messenger"
        );

        Ok(Self {
            authorization_key: config.server_key.take(),
            config,
            http_client,
        })
    }

    /// Create messenger from `FCM_*` environment variables
    pub fn from_env() -> Result<Self, MessagingError> {
        Self::with_config(MessengerConfig::from_env()?)
    }

    pub fn authorization_key(&self) -> Option<&str> {
        self.authorization_key.as_deref()
    }

    pub fn set_authorization_key(&mut self, authorization_key: impl Into<String>) {
        self.authorization_key = Some(authorization_key.into());
    }

    pub fn config(&self) -> &MessengerConfig {
        &self.config
    }

    /// Serialize a message to its JSON wire form
    pub fn serialize(&self, message: &Message) -> Result<String, MessagingError> {
        self.serialize_with(message, &SerializeOptions::default())
    }

    /// Serialize a message with explicit writer options
    ///
    /// The options apply to the message and its notification; the `data`
    /// payload is written exactly as stored.
    pub fn serialize_with(
        &self,
        message: &Message,
        options: &SerializeOptions,
    ) -> Result<String, MessagingError> {
        message.validate()?;
        let value = to_wire_value(message, options)?;
        Ok(serde_json::to_string(&value)?)
    }

    /// Send a downstream message
    ///
    /// Non-2xx answers come back as [`MessagingError::RemoteRejection`] with
    /// the response body; network failures as [`MessagingError::Transport`].
    pub fn send(&self, message: &Message) -> Result<SendResponse, MessagingError> {
        let body = self.serialize(message)?;
        let recipient = describe_recipient(message);

        debug!(recipient = %recipient, dry_run = ?message.dry_run(), "Sending FCM message");

        let response = self.post(&self.config.send_url, body)?;

        info!(recipient = %recipient, status = response.status, "FCM message accepted");
        Ok(response)
    }

    /// Subscribe an app instance to a topic through the Instance ID API
    ///
    /// # Arguments
    /// * `id_token` - Registration token of the app instance
    /// * `topic` - Topic name, without the `/topics/` prefix
    pub fn subscribe_to_topic(
        &self,
        id_token: &str,
        topic: &str,
    ) -> Result<SendResponse, MessagingError> {
        let url = format!(
            "{}/{}/rel/topics/{}",
            self.config.iid_url.trim_end_matches('/'),
            urlencoding::encode(id_token),
            urlencoding::encode(topic)
        );

        let token = token_prefix(id_token);
        debug!(token = %token, topic, "Subscribing to FCM topic");

        let response = self.post(&url, String::new())?;

        info!(token = %token, topic, "Subscribed to FCM topic");
        Ok(response)
    }

    fn post(&self, url: &str, body: String) -> Result<SendResponse, MessagingError> {
        let authorization_key = self
            .authorization_key
            .as_deref()
            .ok_or(MessagingError::MissingCredential)?;

        let response = self
            .http_client
            .post(url)
            .header(AUTHORIZATION, format!("key={}", authorization_key))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|e| {
                warn!(url, error = %e, "FCM request failed");
                MessagingError::Transport(e.to_string())
            })?;

        let status = response.status();

        if status.is_success() {
            let body = response.text()?;
            Ok(SendResponse {
                status: status.as_u16(),
                body,
            })
        } else {
            let body = response.text().unwrap_or_default();
            warn!(url, status = status.as_u16(), body = %body, "FCM rejected request");
            Err(MessagingError::RemoteRejection {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Message as a JSON object with omitted members removed
fn to_wire_value(
    message: &Message,
    options: &SerializeOptions,
) -> Result<Value, MessagingError> {
    let mut value = serde_json::to_value(message)?;

    let Value::Object(object) = &mut value else {
        return Err(MessagingError::Serialization(
            "message did not serialize to a JSON object".to_string(),
        ));
    };

    if let Some(Value::Object(notification)) = object.get_mut("notification") {
        options.prune(notification);
    }
    options.prune(object);

    Ok(value)
}

fn describe_recipient(message: &Message) -> String {
    if let Some(to) = message.to() {
        token_prefix(to)
    } else if let Some(ids) = message.registration_ids() {
        format!("{} registration ids", ids.len())
    } else if let Some(condition) = message.condition() {
        condition.to_string()
    } else {
        "no target".to_string()
    }
}

fn token_prefix(token: &str) -> String {
    token.chars().take(8).collect()
}
