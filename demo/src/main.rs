use paper_application::bootstrap;
use paper_application::command_bus::CommandBus;
use paper_application::config::Settings;
use paper_application::error::AppError;
use paper_application::telemetry;
use paper_domain::persist::inmemory::InMemoryStore;
use serde_json::json;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    telemetry::init(&settings);

    let store = InMemoryStore::new();
    let bus = bootstrap::prepare(&settings, store.clone())?;
    tracing::info!(database_url = %settings.database_url, "using in-memory store");

    // 屏幕：创建两块，查看当前展示项
    let weather = bus
        .execute_named(
            "CreateScreen",
            json!({ "title": "Weather", "screen_type": "weather", "display_order": 1 }),
        )
        .await?;
    bus.execute_named("CreateScreen", json!({ "title": "Agenda", "display_order": 2 }))
        .await?;
    let current = bus.execute_named("GetCurrentScreen", json!(null)).await?;
    println!("current screen: {}", current["title"]);

    bus.execute_named(
        "UpdateScreen",
        json!({ "screen_id": weather["id"], "is_active": false }),
    )
    .await?;
    let current = bus.execute_named("GetCurrentScreen", json!(null)).await?;
    println!("after hiding weather: {}", current["title"]);

    // 闹钟
    bus.execute_named(
        "CreateAlarm",
        json!({ "name": "Wake up", "trigger_time": "06:45:00", "repeat_days": [0, 1, 2, 3, 4] }),
    )
    .await?;
    let alarms = bus.execute_named("GetActiveAlarms", json!(null)).await?;
    println!("active alarms: {alarms}");

    // 设备心跳
    bus.execute_named(
        "RecordHeartbeat",
        json!({ "device_id": "epd-hall", "ip_address": "192.168.1.40", "battery_level": 76 }),
    )
    .await?;
    let status = bus
        .execute_named("GetDeviceStatus", json!({ "device_id": "epd-hall" }))
        .await?;
    println!("device: {status}");

    // 未知参数名 -> 调用方错误，不产生任何写入
    match bus
        .execute_named("CreateScreen", json!({ "title": "Oops", "colour": "red" }))
        .await
    {
        Err(AppError::Validation(reason)) => println!("rejected: {reason}"),
        other => println!("unexpected: {other:?}"),
    }

    println!(
        "stored screens={} alarms={} commits={}",
        store.screen_count(),
        store.alarm_count(),
        store.commits()
    );
    Ok(())
}
