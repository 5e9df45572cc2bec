//! Database configuration

use serde::Deserialize;

use super::error::ValidationError;

/// PostgreSQL connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL (postgres://...)
    pub url: String,

    /// Maximum pool connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum pool connections
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > 100 {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_acquire_timeout() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
        }
    }

    #[test]
    fn postgres_url_is_valid() {
        assert!(config("postgres://localhost/clinicore").validate().is_ok());
        assert!(config("postgresql://localhost/clinicore").validate().is_ok());
    }

    #[test]
    fn other_schemes_are_rejected() {
        assert!(matches!(
            config("mysql://localhost/clinicore").validate(),
            Err(ValidationError::InvalidDatabaseUrl)
        ));
    }

    #[test]
    fn inverted_pool_bounds_are_rejected() {
        let mut c = config("postgres://localhost/clinicore");
        c.min_connections = 20;
        c.max_connections = 5;
        assert!(matches!(c.validate(), Err(ValidationError::InvalidPoolSize)));
    }
}
