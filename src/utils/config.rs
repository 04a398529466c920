use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MONGO_URL: &str = "mongodb://localhost:27017";
pub const DEFAULT_DB_NAME: &str = "pizoo_database";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub mongo_url: String,
    pub db_name: String,
    /// Connect and server-selection timeout
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs = match non_empty("MONGO_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                log::warn!(
                    "⚠️  Invalid MONGO_TIMEOUT_SECS '{}', using {}s",
                    raw,
                    DEFAULT_TIMEOUT_SECS
                );
                DEFAULT_TIMEOUT_SECS
            }),
            None => DEFAULT_TIMEOUT_SECS,
        };

        Self {
            mongo_url: non_empty("MONGO_URL").unwrap_or_else(|| DEFAULT_MONGO_URL.to_string()),
            db_name: non_empty("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// Hides the password of `user:password@host` URLs before printing
pub fn redact_credentials(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let authority_end = rest.find('/').unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => match rest[..at].split_once(':') {
            Some((user, _password)) => format!("{}://{}:****{}", scheme, user, &rest[at..]),
            None => url.to_string(),
        },
        None => url.to_string(),
    }
}

/// Loads `.env` from the working directory, then the file named by `ENV_FILE`.
/// Values already present in the process environment are never overwritten.
pub fn load_env_files() {
    dotenv::dotenv().ok();

    if let Some(path) = env::var_os("ENV_FILE").map(PathBuf::from) {
        match dotenv::from_path(&path) {
            Ok(_) => log::debug!("Loaded environment file {}", path.display()),
            Err(e) => log::warn!("⚠️  Could not load {}: {}", path.display(), e),
        }
    }
}
