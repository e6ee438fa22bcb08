#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Spreadsheet sync settings. Present only when a spreadsheet id is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub tab: String,
    pub api_base: String,
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub drive_access_token: String,
    pub drive_api_base: String,
    pub drive_upload_base: String,
    pub drive_root_folder_name: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub fetch_max_retries: u32,
    pub fetch_retry_delay_ms: u64,
    pub folder_list_limit: u32,
    pub sheets: Option<SheetsConfig>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("drive_access_token", &"[redacted]")
            .field("drive_api_base", &self.drive_api_base)
            .field("drive_upload_base", &self.drive_upload_base)
            .field("drive_root_folder_name", &self.drive_root_folder_name)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("fetch_max_retries", &self.fetch_max_retries)
            .field("fetch_retry_delay_ms", &self.fetch_retry_delay_ms)
            .field("folder_list_limit", &self.folder_list_limit)
            .field("sheets", &self.sheets)
            .finish()
    }
}
