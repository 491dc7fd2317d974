//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml` and overridden by `DOMPET__<SECTION>__<KEY>`
//! environment variables (e.g. `DOMPET__SERVER__PORT=8080`).
//!
//! See `settings.example.toml` for the configuration.
use config::{Config, ConfigError, Environment, File, Source};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Default for Database {
    fn default() -> Self {
        Database::Sqlite("dompet.db".to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub database: Database,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3000,
            database: Database::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Engine {
    /// Flat delivery fee added to every order, in major units.
    pub delivery_fee: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub engine: Engine,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_file(File::with_name("settings").required(false))
    }

    fn from_file<S>(file: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("DOMPET")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use config::FileFormat;

    #[test]
    fn missing_sections_use_defaults() {
        let settings = Settings::from_file(File::from_str("", FileFormat::Toml)).unwrap();
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.port, 3000);
        assert!(matches!(settings.server.database, Database::Sqlite(ref path) if path == "dompet.db"));
        assert_eq!(settings.engine.delivery_fee, None);
    }

    #[test]
    fn file_values_are_read() {
        let toml = r#"
            [app]
            level = "debug"

            [server]
            bind = "0.0.0.0"
            port = 8081
            database = "memory"

            [engine]
            delivery_fee = 5.5
        "#;
        let settings = Settings::from_file(File::from_str(toml, FileFormat::Toml)).unwrap();
        assert_eq!(settings.app.level, "debug");
        assert_eq!(settings.server.bind, "0.0.0.0");
        assert_eq!(settings.server.port, 8081);
        assert!(matches!(settings.server.database, Database::Memory));
        assert_eq!(settings.engine.delivery_fee, Some(5.5));
    }
}
