use std::sync::Arc;

use report_core::RenderOptions;

use crate::config::Settings;
use crate::logo::LogoFetcher;

/// Shared application state accessible to all handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,

    /// Absent when the logo is disabled.
    pub logo: Option<Arc<LogoFetcher>>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let logo = settings
            .logo
            .enabled
            .then(|| Arc::new(LogoFetcher::new(&settings.logo)));
        Self {
            settings: Arc::new(settings),
            logo,
        }
    }

    /// Report defaults with the configured margin and compression applied.
    pub fn render_options(&self, defaults: RenderOptions) -> RenderOptions {
        RenderOptions {
            margin: self.settings.reports.margin,
            compress: self.settings.reports.compress,
            ..defaults
        }
    }
}
