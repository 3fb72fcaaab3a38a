pub const DEFAULT_BASE_URL: &str = "https://unlucid.ai";
pub const DEFAULT_ACCOUNT_PATH: &str = "/api/account";
pub const DEFAULT_CLAIM_PATH: &str = "/api/claim_free_gems";
pub const DEFAULT_USER_AGENT: &str = "ScriptKlaimGemsAman/1.0";

// FILES
pub const CONFIG_FILE_PATH: &str = "data/config.toml";
pub const COOKIES_FILE_PATH: &str = "data/cookies.txt";
pub const TOKEN_FILE_PATH: &str = "data/token.txt";
pub const ACCOUNTS_FILE_PATH: &str = "data/accounts.json";

pub const LOG_DIR: &str = "logs";
pub const LOG_FILE_NAME: &str = "gems-claimer.log";

pub const DEFAULT_ACCOUNT_DELAY_MS: u64 = 5000;
