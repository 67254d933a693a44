use std::env;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub clinic_backend_url: String,
    pub clinic_open_hour: u32,
    pub slot_width_minutes: u32,
    pub slot_count: u32,
    pub distinguish_today: bool,
    pub server_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            clinic_backend_url: "http://localhost:8000".to_string(),
            clinic_open_hour: 8,
            slot_width_minutes: 30,
            slot_count: 10,
            distinguish_today: false,
            server_port: 3000,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            clinic_backend_url: env::var("CLINIC_BACKEND_URL")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_BACKEND_URL not set, using default");
                    defaults.clinic_backend_url.clone()
                }),
            clinic_open_hour: parse_var("CLINIC_OPEN_HOUR", defaults.clinic_open_hour),
            slot_width_minutes: parse_var("SLOT_WIDTH_MINUTES", defaults.slot_width_minutes),
            slot_count: parse_var("SLOT_COUNT", defaults.slot_count),
            distinguish_today: parse_var("DISTINGUISH_TODAY", defaults.distinguish_today),
            server_port: parse_var("SERVER_PORT", defaults.server_port),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - clinic backend URL is empty");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.clinic_backend_url.trim().is_empty()
    }

    /// Base URL without a trailing slash, so paths can be appended directly.
    pub fn backend_base_url(&self) -> &str {
        self.clinic_backend_url.trim_end_matches('/')
    }
}

fn parse_var<T: FromStr + Copy>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using default", name, raw);
            default
        }),
        Err(_) => default,
    }
}
