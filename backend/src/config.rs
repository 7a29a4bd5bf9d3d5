use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use url::Url;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_PROCESSOR_URL: &str = "http://localhost:8001/process_image";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid processor URL {url:?}: {source}")]
    ProcessorUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub processor_url: String,
    pub frontend_dir: String,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let frontend_dir = if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
            format!("{}/../frontend/dist", manifest_dir)
        } else {
            "/usr/src/app/frontend/dist".to_string()
        };

        Self {
            port: DEFAULT_PORT,
            processor_url: DEFAULT_PROCESSOR_URL.to_string(),
            frontend_dir,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ServerConfig {
    /// Reads the YAML file named by `REMOVER_CONFIG` (or `config/server.yaml`
    /// when present), then applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var("REMOVER_CONFIG")
            .map(PathBuf::from)
            .ok()
            .or_else(|| {
                let fallback = PathBuf::from("config/server.yaml");
                fallback.exists().then_some(fallback)
            });

        let config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.with_env_overrides(|name| env::var(name).ok())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = serde_yaml::from_str(text)?;
        config.validated()
    }

    fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                name: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(limit) = lookup("MAX_UPLOAD_BYTES") {
            self.max_upload_bytes = limit.parse().map_err(|_| ConfigError::InvalidEnv {
                name: "MAX_UPLOAD_BYTES",
                value: limit.clone(),
            })?;
        }
        if let Some(url) = lookup("PROCESSOR_URL") {
            self.processor_url = url;
        }
        if let Some(dir) = lookup("FRONTEND_DIR") {
            self.frontend_dir = dir;
        }
        self.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        self.processor_url()?;
        Ok(self)
    }

    pub fn processor_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.processor_url).map_err(|source| ConfigError::ProcessorUrl {
            url: self.processor_url.clone(),
            source,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
