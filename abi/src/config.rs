// db config
// server config
// log config

use crate::errors::{Error, ErrorKind};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub db: DbConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DbBackend {
    #[default]
    MongoDb,
    Memory,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DbConfig {
    #[serde(default)]
    pub backend: DbBackend,
    pub mongodb: MongoDbConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MongoDbConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    pub database: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    #[serde(default = "default_level")]
    pub level: String,
    /// `console` or a directory for daily rolling files
    #[serde(default = "default_output")]
    pub output: String,
}

fn default_level() -> String {
    String::from("debug")
}

fn default_output() -> String {
    String::from("console")
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            output: default_output(),
        }
    }
}

impl Config {
    pub fn load(filename: impl AsRef<Path>) -> Result<Self, Error> {
        let content = fs::read_to_string(filename)
            .map_err(|e| Error::new(ErrorKind::ConfigReadError, e.to_string(), e))?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

impl ServerConfig {
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl MongoDbConfig {
    pub fn server_url(&self) -> String {
        match (self.user.is_empty(), self.password.is_empty()) {
            (true, _) => format!("mongodb://{}:{}", self.host, self.port),
            (false, true) => format!("mongodb://{}@{}:{}", self.user, self.host, self.port),
            (false, false) => format!(
                "mongodb://{}:{}@{}:{}",
                self.user, self.password, self.host, self.port
            ),
        }
    }

    pub fn url(&self) -> String {
        format!("{}/{}", self.server_url(), self.database)
    }
}

impl LogConfig {
    pub fn is_console(&self) -> bool {
        self.output.eq_ignore_ascii_case("console")
    }
}
