use crate::config::Config;
use crate::database::Connector;
use crate::homepage::render::site_templates;
use crate::session::SessionStore;
use color_eyre::Result;
use tera::Tera;

pub mod config;
pub mod database;
pub mod homepage;
pub mod models;
pub mod server;
pub mod session;
pub mod util;

pub struct AppState {
    pub database: Connector,
    pub sessions: SessionStore,
    pub config: Config,
    pub templates: Tera,
}

impl AppState {
    pub fn new(config: Config) -> Result<AppState> {
        let database = Connector::PerRequest(config.connect_options()?);
        AppState::with_connector(config, database)
    }

    pub fn with_connector(config: Config, database: Connector) -> Result<AppState> {
        Ok(AppState {
            database,
            sessions: SessionStore::new(),
            config,
            templates: site_templates()?,
        })
    }
}
