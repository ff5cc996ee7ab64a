use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, path::PathBuf, str::FromStr};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Host written into returned image URLs; falls back to `host`.
    #[serde(default)]
    pub public_host: Option<String>,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_image_dir")]
    pub image_dir: String,

    #[serde(default = "default_temp_dir")]
    pub temp_dir: String,

    #[serde(default = "default_public_dir")]
    pub public_dir: String,

    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,

    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,

    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    #[serde(default = "default_max_batch_files")]
    pub max_batch_files: usize,

    #[serde(default = "default_multipart_total_limit")]
    pub multipart_total_limit: usize,

    #[serde(default = "default_temp_max_age_secs")]
    pub temp_max_age_secs: u64,

    #[serde(default = "default_temp_sweep_interval_secs")]
    pub temp_sweep_interval_secs: u64,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Image-Upload".to_string()
}
fn default_port() -> u16 {
    3033
}
fn default_host() -> String {
    "localhost".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_image_dir() -> String {
    "./images".to_string()
}
fn default_temp_dir() -> String {
    "./temp".to_string()
}
fn default_public_dir() -> String {
    "./public".to_string()
}
fn default_url_prefix() -> String {
    "img".to_string()
}
fn default_allowed_extensions() -> Vec<String> {
    ["png", "jpg", "jpeg", "bmp", "webp", "gif"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_max_file_size() -> u64 {
    102_400
}
fn default_max_batch_files() -> usize {
    9
}
fn default_multipart_total_limit() -> usize {
    10 * 1024 * 1024
}
fn default_temp_max_age_secs() -> u64 {
    60 * 60
}
fn default_temp_sweep_interval_secs() -> u64 {
    10 * 60
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            env: default_env(),
            name: default_name(),
            port: default_port(),
            host: default_host(),
            public_host: None,
            worker_count: default_worker_count(),
            image_dir: default_image_dir(),
            temp_dir: default_temp_dir(),
            public_dir: default_public_dir(),
            url_prefix: default_url_prefix(),
            allowed_extensions: default_allowed_extensions(),
            max_file_size: default_max_file_size(),
            max_batch_files: default_max_batch_files(),
            multipart_total_limit: default_multipart_total_limit(),
            temp_max_age_secs: default_temp_max_age_secs(),
            temp_sweep_interval_secs: default_temp_sweep_interval_secs(),
            cors_allowed_origins: default_cors_origins(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("allowed_extensions")
                    .with_list_parse_key("cors_allowed_origins")
                    .ignore_empty(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.allowed_extensions.is_empty() {
            errors.push("ALLOWED_EXTENSIONS cannot be empty");
        }
        if self.allowed_extensions.iter().any(|ext| ext.is_empty() || ext.contains('.')) {
            errors.push("ALLOWED_EXTENSIONS entries must be non-empty and contain no dots");
        }
        if self.url_prefix.trim().is_empty() || self.url_prefix.contains('/') {
            errors.push("URL_PREFIX must be a single non-empty path segment");
        }
        if self.image_dir.trim().is_empty() {
            errors.push("IMAGE_DIR cannot be empty");
        }
        if self.temp_dir.trim().is_empty() {
            errors.push("TEMP_DIR cannot be empty");
        }
        if self.max_file_size == 0 {
            errors.push("MAX_FILE_SIZE must be greater than zero");
        }
        if self.max_batch_files == 0 {
            errors.push("MAX_BATCH_FILES must be greater than zero");
        }
        if self.temp_sweep_interval_secs == 0 {
            errors.push("TEMP_SWEEP_INTERVAL_SECS must be greater than zero");
        }
        if (self.multipart_total_limit as u64) < self.max_file_size {
            errors.push("MULTIPART_TOTAL_LIMIT must be at least MAX_FILE_SIZE");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

/// Immutable view of the configuration that the upload pipeline needs.
#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub public_host: String,
    pub public_port: u16,
    pub url_prefix: String,
    pub image_dir: PathBuf,
    pub allowed_extensions: Vec<String>,
    pub max_file_size: u64,
    pub max_batch_files: usize,
}

impl UploadSettings {
    pub fn is_allowed_extension(&self, ext: &str) -> bool {
        self.allowed_extensions.iter().any(|allowed| allowed == ext)
    }

    pub fn public_url(&self, file_name: &str) -> String {
        format!(
            "http://{}:{}/{}/{}",
            self.public_host, self.public_port, self.url_prefix, file_name
        )
    }
}

impl From<&AppConfig> for UploadSettings {
    fn from(config: &AppConfig) -> Self {
        UploadSettings {
            public_host: config
                .public_host
                .clone()
                .filter(|h| !h.trim().is_empty())
                .unwrap_or_else(|| config.host.clone()),
            public_port: config.port,
            url_prefix: config.url_prefix.clone(),
            image_dir: PathBuf::from(&config.image_dir),
            allowed_extensions: config.allowed_extensions.clone(),
            max_file_size: config.max_file_size,
            max_batch_files: config.max_batch_files,
        }
    }
}
