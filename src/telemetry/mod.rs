//! Device telemetry over a publish/subscribe broker.
//!
//! Topics follow `devices/{device_id}/{command|status|heartbeat|data|logs}`. Received messages
//! pass through a bounded queue to a single consumer task that runs the registered handlers.

pub(crate) mod client;
pub(crate) mod topics;

pub use client::{
    DeliveryError, Inbound, LoopbackTransport, Message, TelemetryClient, Transport,
};
pub use topics::{DEVICE_ROOT, DeviceTopic, TopicKind, topic_matches};
