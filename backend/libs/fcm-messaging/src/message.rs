use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::MessagingError;
use crate::notification::Notification;

/// Maximum time to live accepted by FCM (4 weeks, in seconds)
pub const MAX_TTL: u32 = 2_419_200;

/// Top-level wire names of a downstream message
pub const WIRE_FIELDS: [&str; 12] = [
    "to",
    "registration_ids",
    "condition",
    "collapse_key",
    "priority",
    "content_available",
    "delay_while_idle",
    "time_to_live",
    "restricted_package_name",
    "dry_run",
    "data",
    "notification",
];

const RESERVED_DATA_KEYS: [&str; 2] = ["from", "message_type"];
const RESERVED_DATA_PREFIXES: [&str; 2] = ["google", "gcm"];

/// Delivery priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Normal,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Normal => "normal",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = MessagingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            other => Err(MessagingError::Validation(format!(
                "unknown priority '{}', expected 'normal' or 'high'",
                other
            ))),
        }
    }
}

/// Downstream message for the FCM legacy HTTP API
///
/// Only explicitly set fields are sent. `time_to_live` is clamped to
/// `[0, MAX_TTL]` on the way in; everything else is stored as given.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Message {
    // Declared in wire-name order so serialized keys come out sorted
    collapse_key: Option<String>,
    condition: Option<String>,
    content_available: Option<bool>,
    data: Option<serde_json::Value>,
    delay_while_idle: Option<bool>,
    dry_run: Option<bool>,
    notification: Option<Notification>,
    priority: Option<Priority>,
    registration_ids: Option<Vec<String>>,
    restricted_package_name: Option<String>,
    time_to_live: Option<u32>,
    to: Option<String>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    /// Message addressed to a topic (`/topics/<topic>`)
    pub fn to_topic(topic: &str) -> Self {
        let mut message = Self::new();
        message.set_to(format!("/topics/{}", topic));
        message
    }

    /// Registration token, notification key or topic of a single recipient.
    /// Leave unset when targeting several topics through `condition`.
    pub fn to(&self) -> Option<&str> {
        self.to.as_deref()
    }

    pub fn set_to(&mut self, to: impl Into<String>) -> &mut Self {
        self.to = Some(to.into());
        self
    }

    /// Multicast recipients. FCM accepts between 1 and 1000 tokens; the
    /// bound is checked server side.
    pub fn registration_ids(&self) -> Option<&[String]> {
        self.registration_ids.as_deref()
    }

    pub fn set_registration_ids<I, S>(&mut self, ids: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.registration_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Topic expression such as `'dogs' in topics || 'cats' in topics`
    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    pub fn set_condition(&mut self, condition: impl Into<String>) -> &mut Self {
        self.condition = Some(condition.into());
        self
    }

    /// Group of collapsible messages. FCM keeps at most 4 distinct keys per
    /// client at a time.
    pub fn collapse_key(&self) -> Option<&str> {
        self.collapse_key.as_deref()
    }

    pub fn set_collapse_key(&mut self, collapse_key: impl Into<String>) -> &mut Self {
        self.collapse_key = Some(collapse_key.into());
        self
    }

    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    pub fn set_priority(&mut self, priority: Priority) -> &mut Self {
        self.priority = Some(priority);
        self
    }

    pub fn content_available(&self) -> Option<bool> {
        self.content_available
    }

    pub fn set_content_available(&mut self, content_available: bool) -> &mut Self {
        self.content_available = Some(content_available);
        self
    }

    pub fn delay_while_idle(&self) -> Option<bool> {
        self.delay_while_idle
    }

    pub fn set_delay_while_idle(&mut self, delay_while_idle: bool) -> &mut Self {
        self.delay_while_idle = Some(delay_while_idle);
        self
    }

    /// Seconds the message is kept while the device is offline
    pub fn time_to_live(&self) -> Option<u32> {
        self.time_to_live
    }

    pub fn set_time_to_live(&mut self, seconds: i64) -> &mut Self {
        self.time_to_live = Some(clamp_ttl(seconds));
        self
    }

    pub fn restricted_package_name(&self) -> Option<&str> {
        self.restricted_package_name.as_deref()
    }

    pub fn set_restricted_package_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.restricted_package_name = Some(name.into());
        self
    }

    pub fn dry_run(&self) -> Option<bool> {
        self.dry_run
    }

    pub fn set_dry_run(&mut self, dry_run: bool) -> &mut Self {
        self.dry_run = Some(dry_run);
        self
    }

    /// Custom key/value payload delivered to the app
    pub fn data(&self) -> Option<&serde_json::Value> {
        self.data.as_ref()
    }

    pub fn set_data(&mut self, data: serde_json::Value) -> &mut Self {
        self.data = Some(data);
        self
    }

    /// Convert any serializable value into the data payload
    pub fn set_data_from<T: Serialize + ?Sized>(
        &mut self,
        data: &T,
    ) -> Result<&mut Self, MessagingError> {
        let value = serde_json::to_value(data)?;
        Ok(self.set_data(value))
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn notification_mut(&mut self) -> Option<&mut Notification> {
        self.notification.as_mut()
    }

    pub fn set_notification(&mut self, notification: Notification) -> &mut Self {
        self.notification = Some(notification);
        self
    }

    /// Reject data payloads using keys FCM reserves for itself
    ///
    /// Applies to object payloads only: `from`, `message_type`, any key
    /// starting with `google` or `gcm`, and the top-level message field names.
    pub fn validate(&self) -> Result<(), MessagingError> {
        let Some(serde_json::Value::Object(map)) = &self.data else {
            return Ok(());
        };

        for key in map.keys() {
            let lower = key.to_lowercase();
            let reserved = RESERVED_DATA_KEYS.contains(&lower.as_str())
                || RESERVED_DATA_PREFIXES
                    .iter()
                    .any(|prefix| lower.starts_with(prefix))
                || WIRE_FIELDS.contains(&key.as_str());

            if reserved {
                return Err(MessagingError::Validation(format!(
                    "data key '{}' is reserved",
                    key
                )));
            }
        }

        Ok(())
    }
}

fn clamp_ttl(seconds: i64) -> u32 {
    seconds.clamp(0, i64::from(MAX_TTL)) as u32
}
