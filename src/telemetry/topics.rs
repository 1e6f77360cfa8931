use std::fmt;
use std::str::FromStr;

/// Root segment of every device topic.
pub const DEVICE_ROOT: &str = "devices";

/// Message stream of a device topic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TopicKind {
    /// Commands sent to the device.
    Command,
    /// Device state reports.
    Status,
    /// Liveness pings.
    Heartbeat,
    /// Measurement or event payloads.
    Data,
    /// Device log lines.
    Logs,
}

impl TopicKind {
    /// Every kind, in topic-table order.
    pub const ALL: [TopicKind; 5] = [
        TopicKind::Command,
        TopicKind::Status,
        TopicKind::Heartbeat,
        TopicKind::Data,
        TopicKind::Logs,
    ];

    /// Last topic segment.
    pub fn as_str(self) -> &'static str {
        match self {
            TopicKind::Command => "command",
            TopicKind::Status => "status",
            TopicKind::Heartbeat => "heartbeat",
            TopicKind::Data => "data",
            TopicKind::Logs => "logs",
        }
    }

    /// Filter matching this kind for every device: `devices/+/<kind>`.
    pub fn wildcard(self) -> String {
        format!("{DEVICE_ROOT}/+/{}", self.as_str())
    }
}

impl fmt::Display for TopicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TopicKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TopicKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown topic kind '{s}'"))
    }
}

/// A concrete `devices/{device_id}/{kind}` topic.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeviceTopic {
    /// Device identifier; never empty and never contains `/`, `+` or `#`.
    pub device_id: String,
    /// Stream on that device.
    pub kind: TopicKind,
}

impl DeviceTopic {
    /// Topic for `device_id`, or `None` when the id is not a single plain topic level.
    pub fn new(device_id: impl Into<String>, kind: TopicKind) -> Option<Self> {
        let device_id = device_id.into();
        if device_id.is_empty() || device_id.contains(['/', '+', '#']) {
            return None;
        }
        Some(Self { device_id, kind })
    }

    /// Split a concrete topic string into device id and kind.
    pub fn parse(topic: &str) -> Option<Self> {
        let mut levels = topic.split('/');
        let (Some(root), Some(device), Some(kind), None) =
            (levels.next(), levels.next(), levels.next(), levels.next())
        else {
            return None;
        };
        if root != DEVICE_ROOT {
            return None;
        }
        Self::new(device, kind.parse().ok()?)
    }

    /// Wire form of the topic.
    pub fn topic(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DeviceTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{DEVICE_ROOT}/{}/{}", self.device_id, self.kind)
    }
}

/// MQTT-style filter matching: `+` matches exactly one level, a trailing `#` matches the rest
/// (including nothing).
pub fn topic_matches(filter: &str, topic: &str) -> bool {
    let mut filter_levels = filter.split('/');
    let mut topic_levels = topic.split('/');
    loop {
        match (filter_levels.next(), topic_levels.next()) {
            (Some("#"), _) => return filter_levels.next().is_none(),
            (Some("+"), Some(_)) => {}
            (Some(f), Some(t)) if f == t => {}
            (None, None) => return true,
            _ => return false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/telemetry/topics.rs"]
mod tests;
