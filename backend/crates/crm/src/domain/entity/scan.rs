use chrono::{DateTime, Utc};
use kernel::id::{PersonId, QrCodeScanId};
use platform::client::ClientInfo;

/// One recorded QR code scan
#[derive(Debug, Clone)]
pub struct QrCodeScan {
    pub id: QrCodeScanId,
    pub person_id: PersonId,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub scanned_at: DateTime<Utc>,
}

impl QrCodeScan {
    pub fn new(person_id: PersonId, client: ClientInfo, now: DateTime<Utc>) -> Self {
        Self {
            id: QrCodeScanId::new(),
            person_id,
            ip_address: client.ip_address,
            user_agent: client.user_agent,
            scanned_at: now,
        }
    }
}
