use std::sync::Arc;

use invitation_core::site::SiteContent;

use crate::{config::Config, error::AppError};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub site: Arc<SiteContent>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let site = SiteContent::load_or_default(config.site_content.as_deref())?;
        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            config: Arc::new(config),
            site: Arc::new(site),
            http,
        })
    }
}
