#[test]
fn ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/entity_id_basic.rs");
    t.pass("tests/ui/domain_event_basic.rs");
    t.pass("tests/ui/command_basic.rs");
    t.pass("tests/ui/subscriber_command_basic.rs");
    t.pass("tests/ui/inject_basic.rs");
}
