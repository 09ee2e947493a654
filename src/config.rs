use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub check_booking_url: String,
    pub make_booking_url: String,
    pub openrouter_api_key: String,
    pub openrouter_model: String,
    pub embedded: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            check_booking_url: env::var("CHECK_BOOKING_URL")
                .unwrap_or_else(|_| "http://localhost:5678/webhook/check-booking-date".to_string()),
            make_booking_url: env::var("MAKE_BOOKING_URL")
                .unwrap_or_else(|_| "http://localhost:5678/webhook/make-booking".to_string()),
            openrouter_api_key: env::var("OPENROUTER_API_KEY").unwrap_or_default(),
            openrouter_model: env::var("OPENROUTER_MODEL")
                .unwrap_or_else(|_| "openai/gpt-3.5-turbo".to_string()),
            embedded: env::var("EMBEDDED_MODE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}
