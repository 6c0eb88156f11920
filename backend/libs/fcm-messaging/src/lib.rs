//! FCM Messaging Library
//!
//! This library provides a blocking client for the Firebase Cloud Messaging
//! legacy HTTP API, authenticated with a server key.
//!
//! It handles:
//! - Building downstream messages and their notification payload
//! - Serializing them to the FCM wire format, omitting unset fields
//! - Sending a message to a token, topic, condition or list of tokens
//! - Subscribing an app instance to a topic
//! - Reporting transport failures separately from FCM rejections

pub mod client;
pub mod config;
pub mod errors;
pub mod message;
pub mod models;
pub mod notification;

pub use client::Messenger;
pub use config::MessengerConfig;
pub use errors::MessagingError;
pub use message::{Message, Priority, MAX_TTL};
pub use models::{DownstreamResponse, DownstreamResult, SendResponse, SerializeOptions};
pub use notification::Notification;
