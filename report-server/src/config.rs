use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub reports: ReportSettings,
    pub logo: LogoSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Rows in the sample user roster.
    pub user_count: usize,
    /// Line items on the sample invoice.
    pub invoice_items: usize,
    pub margin: f64,
    pub compress: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoSettings {
    pub enabled: bool,
    pub url: String,
    pub timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            reports: ReportSettings {
                user_count: 1001,
                invoice_items: 150,
                margin: 40.0,
                compress: true,
            },
            logo: LogoSettings {
                enabled: true,
                url: "https://assets.velorona.com/logos/v2/icon-only/100x100px/png/transparent/blue.png"
                    .to_string(),
                timeout_ms: 3000,
            },
        }
    }
}

impl Settings {
    /// Built-in defaults (with `PORT` applied), then an optional TOML file,
    /// then `REPORT_SERVICE__SECTION__KEY` environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut defaults = Settings::default();
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            defaults.server.port = port;
        }

        let mut builder = config::Config::builder().add_source(config::Config::try_from(&defaults)?);

        // Env override first, then the conventional location.
        let file = std::env::var("REPORT_SERVICE_CONFIG")
            .ok()
            .filter(|path| !path.is_empty())
            .unwrap_or_else(|| "config/default".to_string());
        if Path::new(&format!("{}.toml", file)).exists() {
            builder = builder.add_source(config::File::with_name(&file));
        }

        builder = builder.add_source(config::Environment::with_prefix("REPORT_SERVICE").separator("__"));

        builder.build()?.try_deserialize()
    }
}
