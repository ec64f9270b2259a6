use std::path::PathBuf;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Runtime settings, read from the process environment (and `.env`, if present).
///
/// | Variable  | Default   |
/// |-----------|-----------|
/// | `DB_PATH` | required  |
/// | `HOST`    | `0.0.0.0` |
/// | `PORT`    | `8080`    |
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_env(Environment::default())
    }

    pub fn from_env(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
