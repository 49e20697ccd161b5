use std::env;
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_AVERAGE_WAIT_MINUTES: u32 = 15;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub queue_data_file: Option<PathBuf>,
    pub jwt_secret: String,
    pub default_average_wait_minutes: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            queue_data_file: None,
            jwt_secret: String::new(),
            default_average_wait_minutes: DEFAULT_AVERAGE_WAIT_MINUTES,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            host: env::var("HOST")
                .unwrap_or_else(|_| {
                    warn!("HOST not set, using default");
                    defaults.host.clone()
                }),
            port: env::var("PORT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or_else(|| {
                    warn!("PORT not set or invalid, using {}", defaults.port);
                    defaults.port
                }),
            queue_data_file: env::var("QUEUE_DATA_FILE")
                .map(PathBuf::from)
                .map_err(|_| {
                    warn!("QUEUE_DATA_FILE not set, appointments will not survive a restart");
                })
                .ok(),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("JWT_SECRET not set, using empty value");
                    String::new()
                }),
            default_average_wait_minutes: env::var("DEFAULT_AVERAGE_WAIT_MINUTES")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or_else(|| {
                    warn!(
                        "DEFAULT_AVERAGE_WAIT_MINUTES not set or invalid, using {}",
                        DEFAULT_AVERAGE_WAIT_MINUTES
                    );
                    DEFAULT_AVERAGE_WAIT_MINUTES
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.jwt_secret.is_empty()
    }

    pub fn is_persistent(&self) -> bool {
        self.queue_data_file.is_some()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
