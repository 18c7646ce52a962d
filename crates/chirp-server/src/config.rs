use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub session_secret: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("CHIRP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("CHIRP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| "Invalid CHIRP_PORT")?;

        let database_path = env::var("CHIRP_DB_PATH").unwrap_or_else(|_| "chirp.db".to_string());

        let session_secret =
            env::var("CHIRP_SECRET").unwrap_or_else(|_| "dev-secret-change-me".to_string());

        Ok(Config {
            host,
            port,
            database_path,
            session_secret,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_env() {
        // Env vars are unset in the test environment
        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.database_path, "chirp.db");
        assert_eq!(config.server_address(), "0.0.0.0:3000");
    }
}
