use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::MessagingError;

/// JSON writer settings, passed explicitly on every serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Drop members whose value is `[]`
    pub omit_empty_arrays: bool,
    /// Drop members that were never set (`null`)
    pub omit_absent_fields: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            omit_empty_arrays: true,
            omit_absent_fields: true,
        }
    }
}

impl SerializeOptions {
    /// Remove omitted members from one object level
    pub(crate) fn prune(&self, object: &mut Map<String, Value>) {
        object.retain(|_, value| match value {
            Value::Null => !self.omit_absent_fields,
            Value::Array(items) => !(self.omit_empty_arrays && items.is_empty()),
            _ => true,
        });
    }
}

/// Successful (2xx) answer of an FCM endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendResponse {
    pub status: u16,
    pub body: String,
}

impl SendResponse {
    /// Parse the body of a downstream send
    pub fn downstream(&self) -> Result<DownstreamResponse, MessagingError> {
        serde_json::from_str(&self.body).map_err(|e| {
            MessagingError::Serialization(format!("Failed to parse FCM response: {}", e))
        })
    }
}

/// FCM legacy send response
///
/// Token sends fill the counters and `results`; topic sends only carry
/// `message_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownstreamResponse {
    pub multicast_id: Option<i64>,
    pub success: u32,
    pub failure: u32,
    pub canonical_ids: u32,
    pub results: Vec<DownstreamResult>,
    pub message_id: Option<i64>,
    pub error: Option<String>,
}

/// Per-recipient outcome, in the order of `registration_ids`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownstreamResult {
    pub message_id: Option<String>,
    /// Canonical token to use instead of the one sent
    pub registration_id: Option<String>,
    pub error: Option<String>,
}

impl DownstreamResponse {
    /// Recipients whose token FCM reported as no longer valid
    pub fn invalid_tokens<'a>(&self, registration_ids: &'a [String]) -> Vec<&'a str> {
        self.results
            .iter()
            .zip(registration_ids)
            .filter(|(result, _)| {
                matches!(
                    result.error.as_deref(),
                    Some("NotRegistered") | Some("InvalidRegistration")
                )
            })
            .map(|(_, token)| token.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prune_with_defaults() {
        let mut object = json!({
            "to": "token",
            "condition": null,
            "registration_ids": [],
            "body_loc_args": ["a"],
            "dry_run": false
        })
        .as_object()
        .cloned()
        .unwrap();

        SerializeOptions::default().prune(&mut object);

        assert_eq!(
            Value::Object(object),
            json!({ "to": "token", "body_loc_args": ["a"], "dry_run": false })
        );
    }

    #[test]
    fn test_prune_keeps_everything_when_disabled() {
        let original = json!({ "condition": null, "registration_ids": [] });
        let mut object = original.as_object().cloned().unwrap();

        let options = SerializeOptions {
            omit_empty_arrays: false,
            omit_absent_fields: false,
        };
        options.prune(&mut object);

        assert_eq!(Value::Object(object), original);
    }

    #[test]
    fn test_parse_multicast_response() {
        let response = SendResponse {
            status: 200,
            body: json!({
                "multicast_id": 108,
                "success": 1,
                "failure": 1,
                "canonical_ids": 0,
                "results": [
                    { "message_id": "1:08" },
                    { "error": "NotRegistered" }
                ]
            })
            .to_string(),
        };

        let parsed = response.downstream().unwrap();
        assert_eq!(parsed.multicast_id, Some(108));
        assert_eq!(parsed.success, 1);
        assert_eq!(parsed.failure, 1);
        assert_eq!(parsed.results[0].message_id.as_deref(), Some("1:08"));

        let ids = vec!["good".to_string(), "stale".to_string()];
        assert_eq!(parsed.invalid_tokens(&ids), vec!["stale"]);
    }

    #[test]
    fn test_parse_topic_response() {
        let response = SendResponse {
            status: 200,
            body: r#"{"message_id":5000}"#.to_string(),
        };

        let parsed = response.downstream().unwrap();
        assert_eq!(parsed.message_id, Some(5000));
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn test_parse_invalid_body() {
        let response = SendResponse {
            status: 200,
            body: "not json".to_string(),
        };

        assert!(matches!(
            response.downstream(),
            Err(MessagingError::Serialization(_))
        ));
    }
}
