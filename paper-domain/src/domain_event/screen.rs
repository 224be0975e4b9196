use crate::model::ScreenId;
use paper_macros::domain_event;

#[domain_event(kind = "ScreenCreated")]
pub struct ScreenCreated {
    pub screen_id: ScreenId,
}

#[domain_event(kind = "ScreenUpdated")]
pub struct ScreenUpdated {
    pub screen_id: ScreenId,
}

#[domain_event(kind = "ScreenDeleted")]
pub struct ScreenDeleted {
    pub screen_id: ScreenId,
}
