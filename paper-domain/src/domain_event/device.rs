use paper_macros::domain_event;

#[domain_event(kind = "DeviceHeartbeatReceived")]
pub struct DeviceHeartbeatReceived {
    pub device_id: String,
}
