use anyhow::Result;
use paper_domain::error::DomainError;
use paper_domain::model::{DeviceStatus, Screen};
use paper_domain::persist::{UnitOfWork, UnitOfWorkFactory};
use paper_domain::persist::inmemory::{
    InMemoryDeviceRepository, InMemoryScreenRepository, InMemoryStore, Stage,
};
use paper_domain::ports::{DeviceRepository, ScreenRepository};

#[tokio::test]
async fn sessions_do_not_see_each_others_uncommitted_writes() -> Result<()> {
    let store = InMemoryStore::new();
    let a = store.begin();
    let b = store.begin();
    let screens_a = InMemoryScreenRepository::bind(a.clone())?;
    let screens_b = InMemoryScreenRepository::bind(b.clone())?;

    let screen = screens_a
        .create(Screen::builder().title("Only in A").build())
        .await?;

    assert!(screens_b.get_by_id(&screen.id).await?.is_none());
    assert_eq!(store.open_sessions(), 2);

    a.commit().await?;
    a.close().await?;
    b.rollback().await?;
    b.close().await?;

    assert!(store.screen(&screen.id).is_some());
    assert_eq!(store.open_sessions(), 0);
    Ok(())
}

#[tokio::test]
async fn rollback_restores_committed_state() -> Result<()> {
    let store = InMemoryStore::new();
    let uow = store.begin();
    let screens = InMemoryScreenRepository::bind(uow.clone())?;
    let kept = screens.create(Screen::builder().title("Kept").build()).await?;
    uow.commit().await?;

    assert!(screens.delete(&kept.id).await?);
    screens
        .create(Screen::builder().title("Discarded").build())
        .await?;
    uow.rollback().await?;

    let titles: Vec<_> = screens.get_all().await?.into_iter().map(|s| s.title).collect();
    assert_eq!(titles, ["Kept"]);
    Ok(())
}

#[tokio::test]
async fn duplicate_device_id_from_another_row_violates_uniqueness() -> Result<()> {
    let store = InMemoryStore::new();

    let first = store.begin();
    InMemoryDeviceRepository::bind(first.clone())?
        .upsert_heartbeat(DeviceStatus::builder().device_id("epd-1").build())
        .await?;

    // 两个会话各自认为设备不存在，后提交者在 flush 时冲突
    let second = store.begin();
    InMemoryDeviceRepository::bind(second.clone())?
        .upsert_heartbeat(DeviceStatus::builder().device_id("epd-1").build())
        .await?;

    first.commit().await?;
    let err = second.commit().await.unwrap_err();
    assert!(matches!(err, DomainError::Constraint { .. }));
    Ok(())
}

#[tokio::test]
async fn uniqueness_is_rechecked_when_flushed_writes_commit() -> Result<()> {
    let store = InMemoryStore::new();
    let a = store.begin();
    let b = store.begin();

    let row_a = InMemoryDeviceRepository::bind(a.clone())?
        .upsert_heartbeat(DeviceStatus::builder().device_id("epd-1").build())
        .await?;
    InMemoryDeviceRepository::bind(b.clone())?
        .upsert_heartbeat(DeviceStatus::builder().device_id("epd-1").build())
        .await?;

    a.flush().await?;
    b.flush().await?;
    a.commit().await?;

    let err = b.commit().await.unwrap_err();
    assert!(matches!(err, DomainError::Constraint { reason } if reason.contains("epd-1")));
    assert_eq!(store.device("epd-1").map(|d| d.id), Some(row_a.id));
    assert_eq!(store.commits(), 1);
    Ok(())
}

#[tokio::test]
async fn oversized_fields_fail_flush() -> Result<()> {
    let store = InMemoryStore::new();
    let uow = store.begin();
    InMemoryDeviceRepository::bind(uow.clone())?
        .upsert_heartbeat(
            DeviceStatus::builder()
                .device_id("epd-2")
                .firmware_version("v".repeat(51))
                .build(),
        )
        .await?;

    assert!(matches!(
        uow.flush().await,
        Err(DomainError::Constraint { reason }) if reason.contains("firmware_version")
    ));
    Ok(())
}

#[tokio::test]
async fn flush_fault_fires_once() -> Result<()> {
    let store = InMemoryStore::new();
    store.fail_next(Stage::Flush);
    let uow = store.begin();

    assert!(matches!(uow.flush().await, Err(DomainError::Fault { stage: "flush" })));
    uow.flush().await?;
    Ok(())
}
