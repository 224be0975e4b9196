use crate::model::AlarmId;
use paper_macros::domain_event;

#[domain_event(kind = "AlarmCreated")]
pub struct AlarmCreated {
    pub alarm_id: AlarmId,
}

/// 闹钟到点；由外部调度方发布，当前无默认订阅者
#[domain_event(kind = "AlarmTriggered")]
pub struct AlarmTriggered {
    pub alarm_id: AlarmId,
}
