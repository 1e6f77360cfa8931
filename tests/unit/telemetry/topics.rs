use super::*;

#[test]
fn device_topics_round_trip_through_their_wire_form() {
    let t = DeviceTopic::new("pi-01", TopicKind::Heartbeat).unwrap();
    assert_eq!(t.topic(), "devices/pi-01/heartbeat");
    assert_eq!(DeviceTopic::parse("devices/pi-01/heartbeat"), Some(t));
}

#[test]
fn parse_rejects_foreign_and_malformed_topics() {
    assert_eq!(DeviceTopic::parse("sensors/pi-01/data"), None);
    assert_eq!(DeviceTopic::parse("devices/pi-01/video"), None);
    assert_eq!(DeviceTopic::parse("devices/pi-01"), None);
    assert_eq!(DeviceTopic::parse("devices/pi-01/data/extra"), None);
    assert_eq!(DeviceTopic::parse("devices//data"), None);
    assert_eq!(DeviceTopic::parse("devices/+/data"), None);
}

#[test]
fn wildcards_cover_every_device() {
    assert_eq!(TopicKind::Status.wildcard(), "devices/+/status");
    assert!(topic_matches(&TopicKind::Status.wildcard(), "devices/a/status"));
    assert!(!topic_matches(&TopicKind::Status.wildcard(), "devices/a/logs"));
}

#[test]
fn plus_matches_exactly_one_level() {
    assert!(topic_matches("devices/+/data", "devices/x/data"));
    assert!(!topic_matches("devices/+/data", "devices/x/y/data"));
    assert!(!topic_matches("devices/+", "devices"));
}

#[test]
fn hash_matches_the_remainder() {
    assert!(topic_matches("devices/#", "devices/x/logs"));
    assert!(topic_matches("devices/#", "devices"));
    assert!(topic_matches("#", "anything/at/all"));
    assert!(!topic_matches("devices/#/logs", "devices/x/logs"));
}

#[test]
fn exact_filters_need_exact_topics() {
    assert!(topic_matches("devices/a/command", "devices/a/command"));
    assert!(!topic_matches("devices/a/command", "devices/a/command/extra"));
    assert!(!topic_matches("devices/a/command/extra", "devices/a/command"));
}
