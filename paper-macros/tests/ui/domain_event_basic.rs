use paper_domain::domain_event::{DomainEvent, EventRecord};
use paper_macros::domain_event;

#[domain_event(kind = "panel.refreshed")]
struct PanelRefreshed {
    panel: String,
    pages: u8,
}

#[domain_event]
struct BatteryLow {
    percent: u8,
}

fn main() {
    let event = PanelRefreshed::new("kitchen".to_string(), 3);
    assert_eq!(PanelRefreshed::KIND, "panel.refreshed");
    assert_eq!(event.occurred_at(), event.occurred_at);
    assert_eq!(event.clone(), event);

    let record = EventRecord::from_event(&event).unwrap();
    assert_eq!(record.kind(), "panel.refreshed");
    assert_eq!(record.field("pages"), Some(&serde_json::json!(3)));

    assert_eq!(BatteryLow::KIND, "BatteryLow");
    assert_eq!(BatteryLow::new(12).percent, 12);
}
