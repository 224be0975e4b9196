use paper_macros::subscriber_command;

#[subscriber_command]
struct Notify {
    device_id: String,
    level: Option<u8>,
}

fn main() {
    let n: Notify = serde_json::from_value(serde_json::json!({
        "device_id": "epd-1",
        "occurred_at": "2024-01-01T00:00:00Z"
    }))
    .unwrap();
    assert_eq!(n.device_id, "epd-1");
    assert!(n.level.is_none());

    let empty: Notify = serde_json::from_value(serde_json::json!({})).unwrap();
    assert!(empty.device_id.is_empty());
}
