//! Application Configuration

/// CRM application configuration
#[derive(Debug, Clone)]
pub struct CrmConfig {
    /// Base URL of the web frontend; QR codes and email links point here
    pub frontend_url: String,
    /// Sender address for outbound email
    pub mail_from: String,
}

impl CrmConfig {
    pub fn new(frontend_url: impl Into<String>, mail_from: impl Into<String>) -> Self {
        Self {
            frontend_url: frontend_url.into().trim_end_matches('/').to_string(),
            mail_from: mail_from.into(),
        }
    }

    /// Public lead form for a seller's QR code
    pub fn lead_form_url(&self, qr_code: &str) -> String {
        format!("{}/lead/new?qr={}", self.frontend_url, qr_code)
    }

    pub fn verification_url(&self, token: &str) -> String {
        format!("{}/verify-email?token={}", self.frontend_url, token)
    }
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000", "no-reply@localhost")
    }
}
