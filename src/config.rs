use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct SmtpConfig {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
    pub to_address: String,
}

fn default_smtp_port() -> u16 {
    587
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub server_addr: String,
    pub secret_key: String,
    pub run_migrations: bool,
    pub smtp: Option<SmtpConfig>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("database_url", "sqlite://blog.db?mode=rwc")?
            .set_default("server_addr", "0.0.0.0:5000")?
            .set_default("run_migrations", true)?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::default().separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
