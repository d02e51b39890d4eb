//! Environment configuration for the portal monitor.

use anyhow::Result;

const ENV_LOGIN_URL: &str = "PORTAL_LOGIN_URL";
const ENV_STATUS_URL: &str = "PORTAL_STATUS_URL";
const ENV_USERNAME: &str = "PORTAL_USERNAME";
const ENV_PASSWORD: &str = "PORTAL_PASSWORD";

/// Portal access settings, read once at process start.
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the portal's login form.
    pub login_url: String,
    /// URL of the alert status page.
    pub status_url: String,
    /// Login username.
    pub username: String,
    /// Login password.
    pub password: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            login_url: require(ENV_LOGIN_URL)?,
            status_url: require(ENV_STATUS_URL)?,
            username: require(ENV_USERNAME)?,
            password: require(ENV_PASSWORD)?,
        })
    }
}

fn require(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| anyhow::anyhow!("{name} not set"))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment mutation is process-wide, so all cases live in one test.
    #[test]
    fn test_from_env() {
        std::env::remove_var(ENV_LOGIN_URL);
        std::env::remove_var(ENV_STATUS_URL);
        std::env::remove_var(ENV_USERNAME);
        std::env::remove_var(ENV_PASSWORD);

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains(ENV_LOGIN_URL));

        std::env::set_var(ENV_LOGIN_URL, "https://portal.example/login");
        std::env::set_var(ENV_STATUS_URL, "https://portal.example/status");
        std::env::set_var(ENV_USERNAME, "facility-bot");

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains(ENV_PASSWORD));

        std::env::set_var(ENV_PASSWORD, "hunter2");

        let config = Config::from_env().unwrap();
        assert_eq!(config.login_url, "https://portal.example/login");
        assert_eq!(config.username, "facility-bot");
    }
}
