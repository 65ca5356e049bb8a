use serde::Deserialize;
use service_core::config::{configuration_directory, load_settings};
use service_core::error::AppError;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub server: ServerSettings,
    pub directory: DirectorySettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub pagination: PaginationSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP collector endpoint; span export is disabled when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Clone, Debug)]
pub struct DirectorySettings {
    /// Base URL of the directory service API, without a trailing slash.
    #[serde(default = "default_directory_url")]
    pub base_url: String,
    /// Deadline for every outbound call; a timeout is reported as a network error.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Department whose members are returned by `/api/connect`.
    #[serde(default = "default_root_department_id")]
    pub root_department_id: u64,
}

fn default_directory_url() -> String {
    "https://qyapi.weixin.qq.com".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_root_department_id() -> u64 {
    1
}

#[derive(Deserialize, Clone, Debug)]
pub struct SessionSettings {
    #[serde(default)]
    pub secure_cookie: bool,
    #[serde(default = "default_inactivity_hours")]
    pub inactivity_hours: i64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            secure_cookie: false,
            inactivity_hours: default_inactivity_hours(),
        }
    }
}

fn default_inactivity_hours() -> i64 {
    24
}

#[derive(Deserialize, Clone, Debug)]
pub struct PaginationSettings {
    #[serde(default = "default_page_limit")]
    pub default_limit: usize,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            default_limit: default_page_limit(),
        }
    }
}

fn default_page_limit() -> usize {
    crate::pagination::DEFAULT_LIMIT
}

pub fn get_configuration() -> Result<Settings, AppError> {
    let configuration_directory = configuration_directory("directory-proxy")?;
    load_settings(&configuration_directory)
}
