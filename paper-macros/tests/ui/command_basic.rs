use paper_macros::command;

#[command]
struct Rename {
    name: String,
    #[serde(default)]
    note: String,
}

#[command]
struct Ping {}

fn main() {
    let ok: Rename = serde_json::from_value(serde_json::json!({ "name": "desk" })).unwrap();
    assert_eq!(ok.name, "desk");
    assert!(ok.note.is_empty());

    let unknown = serde_json::from_value::<Rename>(serde_json::json!({ "name": "desk", "nme": 1 }));
    assert!(unknown.is_err());

    let _: Ping = serde_json::from_value(serde_json::json!({})).unwrap();
    let _ = format!("{:?}", ok);
}
