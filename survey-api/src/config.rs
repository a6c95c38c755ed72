use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub cors: Option<CorsConfig>,
    #[serde(default)]
    pub responses: ResponsesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ResponsesConfig {
    /// Reject submissions that leave `isRequired` questions unanswered.
    #[serde(default)]
    pub enforce_required: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Local dev front end and the hosted one.
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "https://my-nps-platform.vercel.app",
];

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            storage: StorageConfig {
                backend: StorageBackend::Sqlite,
                path: get_default_db_path(),
            },
            cors: Some(CorsConfig {
                allowed_origins: DEFAULT_ALLOWED_ORIGINS
                    .iter()
                    .map(|origin| origin.to_string())
                    .collect(),
            }),
            responses: ResponsesConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Loads `path` (or the default location), writing a default file first
    /// when none exists. `SURVEY_API__SECTION__KEY` variables override the file;
    /// `SURVEY_API__CORS__ALLOWED_ORIGINS` takes a comma-separated list.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(
        path: Option<&Path>,
        environment: Environment,
    ) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ConfigError::Message(format!("Failed to create config directory: {e}"))
                })?;
            }
        }

        if !config_path.exists() {
            std::fs::write(&config_path, default_config_file()).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .add_source(environment)
            .build()?;

        let mut config: ApiConfig = builder.try_deserialize()?;
        config.storage.path = expand_tilde(&config.storage.path);
        if let Some(file) = config.logging.file.take() {
            config.logging.file = Some(expand_tilde(&file));
        }

        Ok((config, config_path))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn allowed_origins(&self) -> &[String] {
        self.cors
            .as_ref()
            .map(|cors| cors.allowed_origins.as_slice())
            .unwrap_or_default()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("SURVEY_API")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("cors.allowed_origins")
}

fn default_config_file() -> String {
    format!(
        r#"
[server]
host = "127.0.0.1"
port = 5000

[storage]
# backend = "memory"  # keeps everything in process, lost on restart
backend = "sqlite"
path = "{}"

[cors]
allowed_origins = ["http://localhost:3000", "https://my-nps-platform.vercel.app"]

[responses]
enforce_required = false

[logging]
level = "info"
# file = "~/.local/share/survey-platform/api.log"
"#,
        get_default_db_path().display()
    )
}

fn expand_tilde(path: &Path) -> PathBuf {
    if path.starts_with("~") {
        if let Some(home) = home::home_dir() {
            let path_str = path.to_string_lossy();
            let expanded = path_str.replacen('~', &home.to_string_lossy(), 1);
            return PathBuf::from(expanded);
        }
    }
    path.to_path_buf()
}

fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("survey-platform/api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}

fn get_default_db_path() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        data_dir.join("survey-platform/surveys.db")
    } else {
        PathBuf::from("surveys.db")
    }
}
