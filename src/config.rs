use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants::{
    ACCOUNTS_FILE_PATH, CONFIG_FILE_PATH, COOKIES_FILE_PATH, DEFAULT_ACCOUNT_DELAY_MS,
    DEFAULT_ACCOUNT_PATH, DEFAULT_BASE_URL, DEFAULT_CLAIM_PATH, DEFAULT_USER_AGENT,
    TOKEN_FILE_PATH,
};

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CredentialKind {
    #[default]
    Cookie,
    Token,
    Accounts,
}

impl CredentialKind {
    pub fn default_file(self) -> &'static str {
        match self {
            CredentialKind::Cookie => COOKIES_FILE_PATH,
            CredentialKind::Token => TOKEN_FILE_PATH,
            CredentialKind::Accounts => ACCOUNTS_FILE_PATH,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct Config {
    pub base_url: String,
    pub account_path: String,
    pub claim_path: String,
    pub credential_kind: CredentialKind,
    pub credentials_file: Option<PathBuf>,
    pub session_cookie_name: Option<String>,
    // ms
    pub account_delay: u64,
    pub user_agent: String,
    // seconds
    pub request_timeout: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            account_path: DEFAULT_ACCOUNT_PATH.to_string(),
            claim_path: DEFAULT_CLAIM_PATH.to_string(),
            credential_kind: CredentialKind::default(),
            credentials_file: None,
            session_cookie_name: None,
            account_delay: DEFAULT_ACCOUNT_DELAY_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: None,
        }
    }
}

impl Config {
    async fn read_from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();

        match tokio::fs::read_to_string(path).await {
            Ok(cfg_str) => Ok(toml::from_str(&cfg_str)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("{} not found, using default configuration", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn read_default() -> eyre::Result<Self> {
        Self::read_from_file(CONFIG_FILE_PATH).await
    }

    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn account_url(&self) -> String {
        format!("{}{}", self.base_url(), self.account_path)
    }

    pub fn claim_url(&self) -> String {
        format!("{}{}", self.base_url(), self.claim_path)
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.credentials_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.credential_kind.default_file()))
    }
}
