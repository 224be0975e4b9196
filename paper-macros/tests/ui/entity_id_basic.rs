use paper_macros::entity_id;
use std::collections::HashSet;
use uuid::Uuid;

#[entity_id]
struct PanelId(Uuid);

#[entity_id]
#[derive(Copy, PartialOrd, Ord)]
struct SlotId(u32);

fn main() {
    let raw = Uuid::new_v4();
    let id = PanelId::new(raw);
    assert_eq!(id.to_string(), raw.to_string());
    assert_eq!(id.to_string().parse::<PanelId>().unwrap(), id);
    assert_eq!(serde_json::to_value(&id).unwrap(), serde_json::json!(raw.to_string()));
    assert_eq!(*id.as_ref(), raw);
    assert_eq!(id.clone().into_inner(), raw);

    let mut seen = HashSet::new();
    seen.insert(PanelId::from(raw));
    assert!(seen.contains(&id));

    let a = SlotId::new(1);
    let b = a;
    assert!(a < SlotId::new(2));
    assert_eq!(b, SlotId::default().max(a));
}
